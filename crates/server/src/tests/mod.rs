// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP tests driving the router with `oneshot`.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode as HttpStatusCode},
};
use fieldops_api::JournalLineInput;
use serde::de::DeserializeOwned;
use tower::ServiceExt;

/// Helper to create test app state with in-memory persistence.
fn create_test_app_state() -> AppState {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    }
}

fn envelope<T>(actor_id: &str, role: &str, body: T) -> WriteEnvelope<T> {
    WriteEnvelope {
        tenant: String::from("acme"),
        actor_id: actor_id.to_string(),
        actor_role: role.to_string(),
        cause_id: String::from("test-cause"),
        cause_description: String::from("HTTP test"),
        body,
    }
}

async fn post_json<T: Serialize>(app: &Router, uri: &str, body: &T) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap()
}

async fn get_uri(app: &Router, uri: &str) -> Response {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

fn account(code: &str, name: &str, account_type: &str) -> CreateAccountRequest {
    CreateAccountRequest {
        code: code.to_string(),
        name_en: name.to_string(),
        name_ar: None,
        account_type: account_type.to_string(),
        parent_id: None,
    }
}

async fn create_account_via_http(app: &Router, code: &str, name: &str, kind: &str) -> i64 {
    let response: Response = post_json(
        app,
        "/accounts",
        &envelope("acct-1", "accountant", account(code, name, kind)),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    read_json::<WriteResponse>(response).await.entity_id
}

async fn post_entry_via_http(app: &Router, date: &str, debit: i64, credit: i64, amount: &str) {
    let request: RecordJournalEntryRequest = RecordJournalEntryRequest {
        entry_date: date.to_string(),
        reference: format!("JV-{date}"),
        description: Some(String::from("Posted via HTTP")),
        status: Some(String::from("posted")),
        lines: vec![
            JournalLineInput {
                account_id: debit,
                debit: Some(amount.to_string()),
                credit: None,
                memo: None,
            },
            JournalLineInput {
                account_id: credit,
                debit: None,
                credit: Some(amount.to_string()),
                memo: None,
            },
        ],
    };
    let response: Response = post_json(
        app,
        "/journal_entries",
        &envelope("acct-1", "accountant", request),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = get_uri(&app, "/health").await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let health: HealthResponse = read_json(response).await;
    assert_eq!(health.status, "ok");
}

#[tokio::test]
async fn test_create_account_as_accountant_succeeds() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = post_json(
        &app,
        "/accounts",
        &envelope("acct-1", "accountant", account("1100", "Cash", "asset")),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let write: WriteResponse = read_json(response).await;
    assert!(write.entity_id > 0);
    assert!(write.event_id > 0);
}

#[tokio::test]
async fn test_create_account_as_employee_is_forbidden() {
    let app_state: AppState = create_test_app_state();
    let app: Router = build_router(app_state);

    let response: Response = post_json(
        &app,
        "/accounts",
        &envelope("tech-1", "employee", account("1100", "Cash", "asset")),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::FORBIDDEN);
    let error_response: ErrorResponse = read_json(response).await;
    assert!(error_response.error);

    let timeline: Response = get_uri(&app, "/audit/timeline?tenant=acme").await;
    let events: Vec<AuditEventInfo> = read_json(timeline).await;
    assert!(events.is_empty());
}

#[tokio::test]
async fn test_unknown_role_is_unauthenticated() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = post_json(
        &app,
        "/accounts",
        &envelope("acct-1", "auditor", account("1100", "Cash", "asset")),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_duplicate_account_code_is_unprocessable() {
    let app: Router = build_router(create_test_app_state());
    create_account_via_http(&app, "1100", "Cash", "asset").await;

    let response: Response = post_json(
        &app,
        "/accounts",
        &envelope("acct-1", "accountant", account("1100", "Petty cash", "asset")),
    )
    .await;

    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_blank_tenant_is_bad_request() {
    let app: Router = build_router(create_test_app_state());
    let mut request = envelope("acct-1", "accountant", account("1100", "Cash", "asset"));
    request.tenant = String::from("  ");

    let response: Response = post_json(&app, "/accounts", &request).await;

    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_ledger_and_trial_balance_over_http() {
    let app: Router = build_router(create_test_app_state());
    let cash: i64 = create_account_via_http(&app, "1100", "Cash", "asset").await;
    let capital: i64 = create_account_via_http(&app, "3000", "Capital", "equity").await;
    let rent: i64 = create_account_via_http(&app, "5000", "Rent", "expense").await;
    post_entry_via_http(&app, "2024-01-01", cash, capital, "1000").await;
    post_entry_via_http(&app, "2024-01-15", rent, cash, "400").await;

    let response: Response = get_uri(
        &app,
        &format!("/ledger/{cash}?tenant=acme&from=2024-01-10"),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let ledger: LedgerResponse = read_json(response).await;
    assert_eq!(ledger.opening_balance, "1000.00");
    assert_eq!(ledger.lines.len(), 1);
    assert_eq!(ledger.closing_balance, "600.00");

    let response: Response = get_uri(&app, "/trial_balance?tenant=acme").await;
    let trial_balance: TrialBalanceResponse = read_json(response).await;
    assert!(trial_balance.balanced);
    assert_eq!(trial_balance.total_debit, "1000.00");
}

#[tokio::test]
async fn test_ledger_csv_has_csv_content_type() {
    let app: Router = build_router(create_test_app_state());
    let cash: i64 = create_account_via_http(&app, "1100", "Cash", "asset").await;
    let capital: i64 = create_account_via_http(&app, "3000", "Capital", "equity").await;
    post_entry_via_http(&app, "2024-01-01", cash, capital, "250.50").await;

    let response: Response = get_uri(&app, &format!("/ledger/{cash}/csv?tenant=acme")).await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "text/csv; charset=utf-8"
    );
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv: String = String::from_utf8(body_bytes.to_vec()).unwrap();
    assert!(csv.starts_with("date,reference,description,debit,credit,signed_amount,balance"));
    assert!(csv.contains("Closing balance,250.50,0.00,,250.50"));
}

#[tokio::test]
async fn test_unknown_account_ledger_is_not_found() {
    let app: Router = build_router(create_test_app_state());

    let response: Response = get_uri(&app, "/ledger/42?tenant=acme").await;

    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_workflow_over_http() {
    let app: Router = build_router(create_test_app_state());

    let submit: SubmitRequestRequest = SubmitRequestRequest {
        request_type: String::from("custody"),
        requester: None,
        project_id: None,
        amount: Some(String::from("1500")),
        description: String::from("Site petty cash"),
        submitted_on: String::from("2024-03-01"),
    };
    let response: Response =
        post_json(&app, "/requests", &envelope("tech-1", "employee", submit)).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let request_id: i64 = read_json::<WriteResponse>(response).await.entity_id;

    let review: ChangeStatusRequest = ChangeStatusRequest {
        status: String::from("rejected"),
        notes: None,
    };
    let response: Response = post_json(
        &app,
        &format!("/requests/{request_id}/review"),
        &envelope("mgr-1", "manager", review),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::UNPROCESSABLE_ENTITY);

    let review: ChangeStatusRequest = ChangeStatusRequest {
        status: String::from("manager_approved"),
        notes: None,
    };
    let response: Response = post_json(
        &app,
        &format!("/requests/{request_id}/review"),
        &envelope("mgr-1", "manager", review),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let response: Response = get_uri(&app, "/requests?tenant=acme").await;
    let requests: ListRequestsResponse = read_json(response).await;
    assert_eq!(requests.requests[0].status, "manager_approved");
    assert_eq!(requests.requests[0].reviewed_by.as_deref(), Some("mgr-1"));
}

#[tokio::test]
async fn test_attendance_over_http() {
    let app: Router = build_router(create_test_app_state());
    let attendance = |at: &str| AttendanceRequest {
        employee: None,
        at: Some(at.to_string()),
        latitude: 24.7136,
        longitude: 46.6753,
    };

    let response: Response = post_json(
        &app,
        "/attendance/check_in",
        &envelope("tech-1", "employee", attendance("2024-03-05T07:00:00Z")),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let response: Response = post_json(
        &app,
        "/attendance/check_out",
        &envelope("tech-1", "employee", attendance("2024-03-05T15:30:00Z")),
    )
    .await;
    assert_eq!(response.status(), HttpStatusCode::OK);

    let response: Response = get_uri(&app, "/attendance?tenant=acme&employee=tech-1").await;
    let records: ListAttendanceResponse = read_json(response).await;
    assert_eq!(records.records.len(), 1);
    assert_eq!(records.records[0].worked_minutes, Some(510));
}

#[tokio::test]
async fn test_audit_event_lookup() {
    let app: Router = build_router(create_test_app_state());
    let response: Response = post_json(
        &app,
        "/accounts",
        &envelope("acct-1", "accountant", account("1100", "Cash", "asset")),
    )
    .await;
    let write: WriteResponse = read_json(response).await;

    let uri: String = format!("/audit/event/{}?tenant=acme", write.event_id);
    let response: Response = get_uri(&app, &uri).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let event: AuditEventInfo = read_json(response).await;
    assert_eq!(event.action_name, "CreateAccount");
    assert_eq!(event.cause_id, "test-cause");

    let response: Response = get_uri(&app, "/audit/event/9999?tenant=acme").await;
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_audit_event_is_hidden_from_other_tenants() {
    let app: Router = build_router(create_test_app_state());
    let response: Response = post_json(
        &app,
        "/accounts",
        &envelope("acct-1", "accountant", account("2100", "Payroll payable", "liability")),
    )
    .await;
    let write: WriteResponse = read_json(response).await;

    let uri: String = format!("/audit/event/{}?tenant=globex", write.event_id);
    let response: Response = get_uri(&app, &uri).await;
    assert_eq!(response.status(), HttpStatusCode::NOT_FOUND);

    let response: Response = get_uri(&app, &format!("/audit/event/{}", write.event_id)).await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_entity_history_lists_events_for_one_record() {
    let app: Router = build_router(create_test_app_state());
    let cash: i64 = create_account_via_http(&app, "1100", "Cash", "asset").await;
    create_account_via_http(&app, "1200", "Bank", "asset").await;

    let uri: String = format!("/audit/entity/account/{cash}?tenant=acme");
    let response: Response = get_uri(&app, &uri).await;
    assert_eq!(response.status(), HttpStatusCode::OK);
    let history: Vec<AuditEventInfo> = read_json(response).await;
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].entity_id, Some(cash));

    let uri: String = format!("/audit/entity/account/{cash}?tenant=globex");
    let history: Vec<AuditEventInfo> = read_json(get_uri(&app, &uri).await).await;
    assert!(history.is_empty());

    let response: Response = get_uri(&app, "/audit/entity/invoice/1?tenant=acme").await;
    assert_eq!(response.status(), HttpStatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tenants_are_isolated() {
    let app: Router = build_router(create_test_app_state());
    create_account_via_http(&app, "1100", "Cash", "asset").await;

    let response: Response = get_uri(&app, "/accounts/tree?tenant=globex").await;

    assert_eq!(response.status(), HttpStatusCode::OK);
    let tree: AccountTreeResponse = read_json(response).await;
    assert!(tree.accounts.is_empty());
}
