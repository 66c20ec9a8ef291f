// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role checks at the API boundary.
//!
//! A rejected call must leave no trace in the audit trail.

use crate::{
    ApiError, AssignTechnicianRequest, AttendanceRequest, CreateAccountRequest,
    CreatePayrollRequest, DeductionsInput, EarningsInput, ReplyToRequestRequest,
    SubmitRequestRequest, assign_technician, check_in, create_account, create_payroll_record,
    get_audit_timeline, reply_to_request, review_request, submit_request,
};

use super::helpers::{
    add_project, context, create_test_accountant, create_test_employee, create_test_manager,
    setup_test_persistence, status, tenant,
};

fn assert_unauthorized<T: std::fmt::Debug>(result: Result<T, ApiError>) {
    match result {
        Err(ApiError::Unauthorized { .. }) => {}
        other => panic!("Expected Unauthorized, got {other:?}"),
    }
}

#[test]
fn test_create_account_rejects_employee() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = create_account(
        &mut persistence,
        &context(create_test_employee()),
        CreateAccountRequest {
            code: String::from("1000"),
            name_en: String::from("Cash"),
            name_ar: None,
            account_type: String::from("asset"),
            parent_id: None,
        },
    );

    assert_unauthorized(result);
    let timeline = get_audit_timeline(&mut persistence, &tenant()).unwrap();
    assert!(timeline.is_empty());
}

#[test]
fn test_payroll_rejects_manager() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = create_payroll_record(
        &mut persistence,
        &context(create_test_manager()),
        &CreatePayrollRequest {
            employee: String::from("tech-1"),
            period_start: String::from("2024-03-01"),
            period_end: String::from("2024-03-31"),
            earnings: EarningsInput {
                basic: Some(String::from("8000")),
                ..EarningsInput::default()
            },
            deductions: DeductionsInput::default(),
        },
    );

    assert_unauthorized(result);
}

#[test]
fn test_assign_technician_rejects_accountant() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let project_id: i64 = add_project(&mut persistence, "Substation upgrade", "50000");

    let result = assign_technician(
        &mut persistence,
        &context(create_test_accountant()),
        &AssignTechnicianRequest {
            project_id,
            technician: String::from("tech-1"),
        },
    );

    assert_unauthorized(result);
}

#[test]
fn test_employee_cannot_submit_for_colleague() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = submit_request(
        &mut persistence,
        &context(create_test_employee()),
        SubmitRequestRequest {
            request_type: String::from("leave"),
            requester: Some(String::from("tech-2")),
            project_id: None,
            amount: None,
            description: String::from("Annual leave"),
            submitted_on: String::from("2024-03-05"),
        },
    );

    assert_unauthorized(result);
}

#[test]
fn test_employee_cannot_review_own_request() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let request_id: i64 = submit_request(
        &mut persistence,
        &context(create_test_employee()),
        SubmitRequestRequest {
            request_type: String::from("material"),
            requester: None,
            project_id: None,
            amount: Some(String::from("250")),
            description: String::from("Cable ties"),
            submitted_on: String::from("2024-03-05"),
        },
    )
    .unwrap()
    .entity_id;

    let result = review_request(
        &mut persistence,
        &context(create_test_employee()),
        request_id,
        status("approved", None),
    );

    assert_unauthorized(result);
}

#[test]
fn test_only_requester_may_reply() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let request_id: i64 = submit_request(
        &mut persistence,
        &context(create_test_employee()),
        SubmitRequestRequest {
            request_type: String::from("expense"),
            requester: None,
            project_id: None,
            amount: Some(String::from("90.50")),
            description: String::from("Fuel"),
            submitted_on: String::from("2024-03-05"),
        },
    )
    .unwrap()
    .entity_id;
    review_request(
        &mut persistence,
        &context(create_test_manager()),
        request_id,
        status("needs_clarification", Some("Attach the receipt")),
    )
    .unwrap();

    let result = reply_to_request(
        &mut persistence,
        &context(create_test_manager()),
        request_id,
        ReplyToRequestRequest {
            reply: String::from("Receipt attached"),
        },
    );

    assert_unauthorized(result);
}

#[test]
fn test_manager_cannot_check_in_for_employee() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = check_in(
        &mut persistence,
        &context(create_test_manager()),
        &AttendanceRequest {
            employee: Some(String::from("tech-1")),
            at: Some(String::from("2024-03-05T06:00:00Z")),
            latitude: 24.7136,
            longitude: 46.6753,
        },
    );

    assert_unauthorized(result);
}
