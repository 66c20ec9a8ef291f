// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll and attendance tests.

use fieldops_persistence::Persistence;

use crate::{
    ApiError, AttendanceRequest, CreatePayrollRequest, DeductionsInput, EarningsInput,
    change_payroll_status, check_in, check_out, create_payroll_record, get_audit_timeline,
    list_attendance, list_payroll_records,
};

use super::helpers::{
    context, create_test_accountant, create_test_admin, create_test_employee,
    setup_test_persistence, status, tenant,
};

fn payroll_request(basic: &str, loans: &str) -> CreatePayrollRequest {
    CreatePayrollRequest {
        employee: String::from("tech-1"),
        period_start: String::from("2024-03-01"),
        period_end: String::from("2024-03-31"),
        earnings: EarningsInput {
            basic: Some(basic.to_string()),
            housing: Some(String::from("2000")),
            transport: Some(String::from("500")),
            overtime: Some(String::from("375.50")),
            other: None,
        },
        deductions: DeductionsInput {
            social_insurance: Some(String::from("800")),
            loans: Some(loans.to_string()),
            ..DeductionsInput::default()
        },
    }
}

fn attendance(at: &str) -> AttendanceRequest {
    AttendanceRequest {
        employee: None,
        at: Some(at.to_string()),
        latitude: 24.7136,
        longitude: 46.6753,
    }
}

fn payroll_id(persistence: &mut Persistence) -> i64 {
    create_payroll_record(
        persistence,
        &context(create_test_accountant()),
        &payroll_request("8000", "1000"),
    )
    .expect("payroll should be created")
    .entity_id
}

#[test]
fn test_payroll_totals_are_derived() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    payroll_id(&mut persistence);

    let records = list_payroll_records(&mut persistence, &tenant()).unwrap();
    let record = &records.records[0];
    assert_eq!(record.employee, "tech-1");
    assert_eq!(record.status, "draft");
    assert_eq!(record.gross, "10875.50");
    assert_eq!(record.total_deductions, "1800.00");
    assert_eq!(record.net_pay, "9075.50");
}

#[test]
fn test_deductions_may_not_exceed_earnings() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = create_payroll_record(
        &mut persistence,
        &context(create_test_accountant()),
        &payroll_request("8000", "20000"),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "non_negative_net_pay");
        }
        other => panic!("Expected net pay violation, got {other:?}"),
    }
}

#[test]
fn test_negative_component_is_invalid_input() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = create_payroll_record(
        &mut persistence,
        &context(create_test_accountant()),
        &payroll_request("-1", "0"),
    );

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_malformed_component_counts_as_zero() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let mut request = payroll_request("8000", "1000");
    request.earnings.overtime = Some(String::from("n/a"));

    create_payroll_record(
        &mut persistence,
        &context(create_test_accountant()),
        &request,
    )
    .unwrap();

    let records = list_payroll_records(&mut persistence, &tenant()).unwrap();
    assert_eq!(records.records[0].gross, "10500.00");
    assert_eq!(records.records[0].net_pay, "8700.00");
}

#[test]
fn test_same_period_cannot_be_recorded_twice() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    payroll_id(&mut persistence);

    let result = create_payroll_record(
        &mut persistence,
        &context(create_test_accountant()),
        &payroll_request("8000", "1000"),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "unique_payroll_period");
        }
        other => panic!("Expected duplicate period violation, got {other:?}"),
    }
}

#[test]
fn test_failed_payment_needs_a_reason() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let id: i64 = payroll_id(&mut persistence);
    let accountant = context(create_test_accountant());
    for next in ["under_review", "approved"] {
        change_payroll_status(&mut persistence, &accountant, id, status(next, None)).unwrap();
    }

    let result = change_payroll_status(&mut persistence, &accountant, id, status("failed", None));
    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => assert_eq!(rule, "notes_required"),
        other => panic!("Expected notes violation, got {other:?}"),
    }

    change_payroll_status(
        &mut persistence,
        &accountant,
        id,
        status("failed", Some("IBAN rejected by bank")),
    )
    .unwrap();
    let records = list_payroll_records(&mut persistence, &tenant()).unwrap();
    assert_eq!(records.records[0].status, "failed");
    assert_eq!(
        records.records[0].notes.as_deref(),
        Some("IBAN rejected by bank")
    );
}

#[test]
fn test_check_in_and_out_records_worked_minutes() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let employee = context(create_test_employee());

    check_in(&mut persistence, &employee, &attendance("2024-03-05T06:45:00Z")).unwrap();
    let open = list_attendance(&mut persistence, &tenant(), "tech-1").unwrap();
    assert_eq!(open.records.len(), 1);
    assert_eq!(open.records[0].check_out_at, None);
    assert_eq!(open.records[0].worked_minutes, None);

    check_out(&mut persistence, &employee, &attendance("2024-03-05T15:00:00Z")).unwrap();
    let closed = list_attendance(&mut persistence, &tenant(), "tech-1").unwrap();
    let record = &closed.records[0];
    assert_eq!(record.check_in_at, "2024-03-05T06:45:00Z");
    assert_eq!(record.check_out_at.as_deref(), Some("2024-03-05T15:00:00Z"));
    assert_eq!(record.worked_minutes, Some(495));
    assert!((record.check_in_latitude - 24.7136).abs() < 1e-6);
}

#[test]
fn test_second_check_in_is_rejected() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let employee = context(create_test_employee());
    check_in(&mut persistence, &employee, &attendance("2024-03-05T06:45:00Z")).unwrap();

    let result = check_in(&mut persistence, &employee, &attendance("2024-03-05T07:00:00Z"));

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "single_open_attendance");
        }
        other => panic!("Expected open attendance violation, got {other:?}"),
    }
}

#[test]
fn test_check_out_without_check_in_is_rejected() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = check_out(
        &mut persistence,
        &context(create_test_employee()),
        &attendance("2024-03-05T15:00:00Z"),
    );

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "open_attendance_exists");
        }
        other => panic!("Expected missing check-in violation, got {other:?}"),
    }
}

#[test]
fn test_check_out_before_check_in_is_rejected() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");
    let employee = context(create_test_employee());
    check_in(&mut persistence, &employee, &attendance("2024-03-05T06:45:00Z")).unwrap();

    let result = check_out(&mut persistence, &employee, &attendance("2024-03-05T06:00:00Z"));

    match result {
        Err(ApiError::DomainRuleViolation { rule, .. }) => {
            assert_eq!(rule, "check_out_after_check_in");
        }
        other => panic!("Expected ordering violation, got {other:?}"),
    }
}

#[test]
fn test_out_of_range_coordinates_are_invalid() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    let result = check_in(
        &mut persistence,
        &context(create_test_employee()),
        &AttendanceRequest {
            employee: None,
            at: None,
            latitude: 91.0,
            longitude: 46.6753,
        },
    );

    match result {
        Err(ApiError::InvalidInput { field, .. }) => assert_eq!(field, "location"),
        other => panic!("Expected invalid coordinates, got {other:?}"),
    }
    assert!(get_audit_timeline(&mut persistence, &tenant()).unwrap().is_empty());
}

#[test]
fn test_admin_records_attendance_for_employee() {
    let mut persistence = setup_test_persistence().expect("Failed to setup test persistence");

    check_in(
        &mut persistence,
        &context(create_test_admin()),
        &AttendanceRequest {
            employee: Some(String::from("tech-7")),
            at: Some(String::from("2024-03-05T05:30:00Z")),
            latitude: 21.4858,
            longitude: 39.1925,
        },
    )
    .unwrap();

    let timeline = get_audit_timeline(&mut persistence, &tenant()).unwrap();
    assert_eq!(timeline.len(), 1);
    assert_eq!(timeline[0].actor_id, "admin-1");
    assert_eq!(timeline[0].entity_kind, "attendance");
    assert_eq!(
        list_attendance(&mut persistence, &tenant(), "tech-7")
            .unwrap()
            .records
            .len(),
        1
    );
}
