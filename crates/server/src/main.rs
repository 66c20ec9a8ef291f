// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use fieldops_api::{
    AccountTreeResponse, ApiError, AssignTechnicianRequest, AttendanceRequest, AuditEventInfo,
    AuthenticatedActor, ChangeStatusRequest, CreateAccountRequest, CreatePayrollRequest,
    CreateProjectRequest, LedgerQuery, LedgerResponse, ListAssignmentsResponse,
    ListAttendanceResponse, ListJournalEntriesResponse, ListPayrollResponse, ListProjectsResponse,
    ListRequestsResponse, RecordJournalEntryRequest, ReplyToRequestRequest, RequestContext, Role,
    SubmitRequestRequest, TrialBalanceResponse, WorkloadResponse, WriteResponse,
    assign_technician, authenticate_stub, change_journal_status, change_payroll_status,
    change_project_status, check_in, check_out, create_account, create_payroll_record,
    create_project, export_ledger_csv, get_account_tree, get_audit_event, get_audit_timeline,
    get_entity_history, get_ledger, get_trial_balance, get_workload, list_assignments, list_attendance,
    list_journal_entries, list_payroll_records, list_projects, list_requests,
    record_journal_entry, reply_to_request, respond_to_assignment, review_request, submit_request,
    translate_domain_error,
};
use fieldops_audit::Cause;
use fieldops_domain::{Locale, TenantId};
use fieldops_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

/// `FieldOps` Server - HTTP server for the `FieldOps` ERP backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, default_value = "127.0.0.1")]
    bind: IpAddr,
}

/// Application state shared across handlers.
///
/// Writes hold the lock across load, apply and persist.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// A state-changing request: who is acting, on which tenant and why, plus
/// the operation's own fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct WriteEnvelope<T> {
    /// The tenant the write applies to.
    tenant: String,
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    actor_role: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
    #[serde(flatten)]
    body: T,
}

impl<T> WriteEnvelope<T> {
    /// Authenticates the actor and splits off the operation body.
    fn into_parts(self) -> Result<(RequestContext, T), HttpError> {
        let role: Role = self.actor_role.parse().map_err(ApiError::from)?;
        let actor: AuthenticatedActor =
            authenticate_stub(self.actor_id, role).map_err(ApiError::from)?;
        let tenant: TenantId = parse_tenant(&self.tenant)?;
        let cause: Cause = Cause::new(self.cause_id, self.cause_description);
        Ok((RequestContext::new(tenant, actor, cause), self.body))
    }
}

/// Query parameters naming only the tenant.
#[derive(Debug, Deserialize)]
struct TenantQuery {
    tenant: String,
}

/// Query parameters for localized reports.
#[derive(Debug, Deserialize)]
struct ReportQuery {
    tenant: String,
    /// `en` or `ar`; defaults to `en`.
    locale: Option<String>,
    /// Inclusive cut-off date.
    as_of: Option<String>,
}

/// Query parameters for the general ledger.
#[derive(Debug, Deserialize)]
struct LedgerParams {
    tenant: String,
    locale: Option<String>,
    from: Option<String>,
    to: Option<String>,
}

/// Query parameters for listing assignments.
#[derive(Debug, Deserialize)]
struct AssignmentsQuery {
    tenant: String,
    project_id: Option<i64>,
}

/// Query parameters for listing attendance.
#[derive(Debug, Deserialize)]
struct AttendanceQuery {
    tenant: String,
    employee: String,
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    status: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Unauthorized { .. } => StatusCode::FORBIDDEN,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

fn parse_tenant(value: &str) -> Result<TenantId, HttpError> {
    Ok(TenantId::new(value).map_err(translate_domain_error)?)
}

fn parse_locale(value: Option<&str>) -> Result<Locale, HttpError> {
    match value {
        Some(locale) => Ok(locale.parse().map_err(translate_domain_error)?),
        None => Ok(Locale::default()),
    }
}

/// Authenticates the envelope, runs `write` under the persistence lock and
/// logs the outcome.
async fn run_write<T, F>(
    app_state: &AppState,
    operation: &'static str,
    envelope: WriteEnvelope<T>,
    write: F,
) -> Result<Json<WriteResponse>, HttpError>
where
    F: FnOnce(&mut Persistence, &RequestContext, T) -> Result<WriteResponse, ApiError>,
{
    info!(
        actor_id = %envelope.actor_id,
        role = %envelope.actor_role,
        tenant = %envelope.tenant,
        operation,
        "Handling write request"
    );

    let (ctx, body) = envelope.into_parts()?;

    let mut persistence = app_state.persistence.lock().await;
    let response: WriteResponse = write(&mut persistence, &ctx, body)?;
    drop(persistence);

    info!(
        event_id = response.event_id,
        entity_id = response.entity_id,
        operation,
        "{}",
        response.message
    );

    Ok(Json(response))
}

// ============================================================================
// Chart of accounts and journal
// ============================================================================

/// Handler for POST `/accounts`.
async fn handle_create_account(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<CreateAccountRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "create_account", req, create_account).await
}

/// Handler for GET `/accounts/tree`.
async fn handle_get_account_tree(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<AccountTreeResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling get_account_tree request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;
    let locale: Locale = parse_locale(params.locale.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let response: AccountTreeResponse =
        get_account_tree(&mut persistence, &tenant, locale, params.as_of.as_deref())?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/journal_entries`.
async fn handle_record_journal_entry(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<RecordJournalEntryRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "record_journal_entry", req, record_journal_entry).await
}

/// Handler for POST `/journal_entries/{entry_id}/status`.
async fn handle_change_journal_status(
    AxumState(app_state): AxumState<AppState>,
    Path(entry_id): Path<i64>,
    Json(req): Json<WriteEnvelope<ChangeStatusRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "change_journal_status", req, |p, ctx, body| {
        change_journal_status(p, ctx, entry_id, &body)
    })
    .await
}

/// Handler for GET `/journal_entries`.
async fn handle_list_journal_entries(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<ListJournalEntriesResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling list_journal_entries request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListJournalEntriesResponse = list_journal_entries(&mut persistence, &tenant)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Ledger reports
// ============================================================================

/// Handler for GET `/ledger/{account_id}`.
async fn handle_get_ledger(
    AxumState(app_state): AxumState<AppState>,
    Path(account_id): Path<i64>,
    Query(params): Query<LedgerParams>,
) -> Result<Json<LedgerResponse>, HttpError> {
    info!(
        tenant = %params.tenant,
        account_id = account_id,
        "Handling get_ledger request"
    );

    let tenant: TenantId = parse_tenant(&params.tenant)?;
    let locale: Locale = parse_locale(params.locale.as_deref())?;
    let query: LedgerQuery = LedgerQuery {
        from: params.from,
        to: params.to,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response: LedgerResponse =
        get_ledger(&mut persistence, &tenant, account_id, &query, locale)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/ledger/{account_id}/csv`.
async fn handle_export_ledger_csv(
    AxumState(app_state): AxumState<AppState>,
    Path(account_id): Path<i64>,
    Query(params): Query<LedgerParams>,
) -> Result<Response, HttpError> {
    info!(
        tenant = %params.tenant,
        account_id = account_id,
        "Handling export_ledger_csv request"
    );

    let tenant: TenantId = parse_tenant(&params.tenant)?;
    let locale: Locale = parse_locale(params.locale.as_deref())?;
    let query: LedgerQuery = LedgerQuery {
        from: params.from,
        to: params.to,
    };

    let mut persistence = app_state.persistence.lock().await;
    let csv: String = export_ledger_csv(&mut persistence, &tenant, account_id, &query, locale)?;
    drop(persistence);

    Ok(([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], csv).into_response())
}

/// Handler for GET `/trial_balance`.
async fn handle_get_trial_balance(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<ReportQuery>,
) -> Result<Json<TrialBalanceResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling get_trial_balance request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;
    let locale: Locale = parse_locale(params.locale.as_deref())?;

    let mut persistence = app_state.persistence.lock().await;
    let response: TrialBalanceResponse =
        get_trial_balance(&mut persistence, &tenant, params.as_of.as_deref(), locale)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Projects, assignments and requests
// ============================================================================

/// Handler for POST `/projects`.
async fn handle_create_project(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<CreateProjectRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "create_project", req, create_project).await
}

/// Handler for POST `/projects/{project_id}/status`.
async fn handle_change_project_status(
    AxumState(app_state): AxumState<AppState>,
    Path(project_id): Path<i64>,
    Json(req): Json<WriteEnvelope<ChangeStatusRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "change_project_status", req, |p, ctx, body| {
        change_project_status(p, ctx, project_id, &body)
    })
    .await
}

/// Handler for GET `/projects`.
async fn handle_list_projects(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<ListProjectsResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling list_projects request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListProjectsResponse = list_projects(&mut persistence, &tenant)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/assignments`.
async fn handle_assign_technician(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<AssignTechnicianRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "assign_technician", req, |p, ctx, body| {
        assign_technician(p, ctx, &body)
    })
    .await
}

/// Handler for POST `/assignments/{assignment_id}/respond`.
async fn handle_respond_to_assignment(
    AxumState(app_state): AxumState<AppState>,
    Path(assignment_id): Path<i64>,
    Json(req): Json<WriteEnvelope<ChangeStatusRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "respond_to_assignment", req, |p, ctx, body| {
        respond_to_assignment(p, ctx, assignment_id, body)
    })
    .await
}

/// Handler for GET `/assignments`.
async fn handle_list_assignments(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AssignmentsQuery>,
) -> Result<Json<ListAssignmentsResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling list_assignments request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListAssignmentsResponse =
        list_assignments(&mut persistence, &tenant, params.project_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/workload`.
async fn handle_get_workload(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<WorkloadResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling get_workload request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: WorkloadResponse = get_workload(&mut persistence, &tenant)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/requests`.
async fn handle_submit_request(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<SubmitRequestRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "submit_request", req, submit_request).await
}

/// Handler for POST `/requests/{request_id}/review`.
async fn handle_review_request(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<WriteEnvelope<ChangeStatusRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "review_request", req, |p, ctx, body| {
        review_request(p, ctx, request_id, body)
    })
    .await
}

/// Handler for POST `/requests/{request_id}/reply`.
async fn handle_reply_to_request(
    AxumState(app_state): AxumState<AppState>,
    Path(request_id): Path<i64>,
    Json(req): Json<WriteEnvelope<ReplyToRequestRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "reply_to_request", req, |p, ctx, body| {
        reply_to_request(p, ctx, request_id, body)
    })
    .await
}

/// Handler for GET `/requests`.
async fn handle_list_requests(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<ListRequestsResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling list_requests request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListRequestsResponse = list_requests(&mut persistence, &tenant)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Payroll and attendance
// ============================================================================

/// Handler for POST `/payroll`.
async fn handle_create_payroll_record(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<CreatePayrollRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "create_payroll_record", req, |p, ctx, body| {
        create_payroll_record(p, ctx, &body)
    })
    .await
}

/// Handler for POST `/payroll/{payroll_id}/status`.
async fn handle_change_payroll_status(
    AxumState(app_state): AxumState<AppState>,
    Path(payroll_id): Path<i64>,
    Json(req): Json<WriteEnvelope<ChangeStatusRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "change_payroll_status", req, |p, ctx, body| {
        change_payroll_status(p, ctx, payroll_id, body)
    })
    .await
}

/// Handler for GET `/payroll`.
async fn handle_list_payroll_records(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<ListPayrollResponse>, HttpError> {
    info!(tenant = %params.tenant, "Handling list_payroll_records request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListPayrollResponse = list_payroll_records(&mut persistence, &tenant)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for POST `/attendance/check_in`.
async fn handle_check_in(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<AttendanceRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "check_in", req, |p, ctx, body| {
        check_in(p, ctx, &body)
    })
    .await
}

/// Handler for POST `/attendance/check_out`.
async fn handle_check_out(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<WriteEnvelope<AttendanceRequest>>,
) -> Result<Json<WriteResponse>, HttpError> {
    run_write(&app_state, "check_out", req, |p, ctx, body| {
        check_out(p, ctx, &body)
    })
    .await
}

/// Handler for GET `/attendance`.
async fn handle_list_attendance(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<AttendanceQuery>,
) -> Result<Json<ListAttendanceResponse>, HttpError> {
    info!(
        tenant = %params.tenant,
        employee = %params.employee,
        "Handling list_attendance request"
    );

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: ListAttendanceResponse =
        list_attendance(&mut persistence, &tenant, &params.employee)?;
    drop(persistence);

    Ok(Json(response))
}

// ============================================================================
// Audit trail
// ============================================================================

/// Handler for GET `/audit/timeline`.
async fn handle_get_audit_timeline(
    AxumState(app_state): AxumState<AppState>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    info!(tenant = %params.tenant, "Handling get_audit_timeline request");

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<AuditEventInfo> = get_audit_timeline(&mut persistence, &tenant)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/event/{event_id}`.
async fn handle_get_audit_event(
    AxumState(app_state): AxumState<AppState>,
    Path(event_id): Path<i64>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<AuditEventInfo>, HttpError> {
    info!(
        tenant = %params.tenant,
        event_id = event_id,
        "Handling get_audit_event request"
    );

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: AuditEventInfo = get_audit_event(&mut persistence, &tenant, event_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/audit/entity/{entity_kind}/{entity_id}`.
async fn handle_get_entity_history(
    AxumState(app_state): AxumState<AppState>,
    Path((entity_kind, entity_id)): Path<(String, i64)>,
    Query(params): Query<TenantQuery>,
) -> Result<Json<Vec<AuditEventInfo>>, HttpError> {
    info!(
        tenant = %params.tenant,
        entity_kind = %entity_kind,
        entity_id = entity_id,
        "Handling get_entity_history request"
    );

    let tenant: TenantId = parse_tenant(&params.tenant)?;

    let mut persistence = app_state.persistence.lock().await;
    let response: Vec<AuditEventInfo> =
        get_entity_history(&mut persistence, &tenant, &entity_kind, entity_id)?;
    drop(persistence);

    Ok(Json(response))
}

/// Handler for GET `/health`.
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/accounts", post(handle_create_account))
        .route("/accounts/tree", get(handle_get_account_tree))
        .route(
            "/journal_entries",
            post(handle_record_journal_entry).get(handle_list_journal_entries),
        )
        .route(
            "/journal_entries/{entry_id}/status",
            post(handle_change_journal_status),
        )
        .route("/ledger/{account_id}", get(handle_get_ledger))
        .route("/ledger/{account_id}/csv", get(handle_export_ledger_csv))
        .route("/trial_balance", get(handle_get_trial_balance))
        .route(
            "/projects",
            post(handle_create_project).get(handle_list_projects),
        )
        .route(
            "/projects/{project_id}/status",
            post(handle_change_project_status),
        )
        .route(
            "/assignments",
            post(handle_assign_technician).get(handle_list_assignments),
        )
        .route(
            "/assignments/{assignment_id}/respond",
            post(handle_respond_to_assignment),
        )
        .route("/workload", get(handle_get_workload))
        .route(
            "/requests",
            post(handle_submit_request).get(handle_list_requests),
        )
        .route("/requests/{request_id}/review", post(handle_review_request))
        .route("/requests/{request_id}/reply", post(handle_reply_to_request))
        .route(
            "/payroll",
            post(handle_create_payroll_record).get(handle_list_payroll_records),
        )
        .route(
            "/payroll/{payroll_id}/status",
            post(handle_change_payroll_status),
        )
        .route("/attendance", get(handle_list_attendance))
        .route("/attendance/check_in", post(handle_check_in))
        .route("/attendance/check_out", post(handle_check_out))
        .route("/audit/timeline", get(handle_get_audit_timeline))
        .route("/audit/event/{event_id}", get(handle_get_audit_event))
        .route(
            "/audit/entity/{entity_kind}/{entity_id}",
            get(handle_get_entity_history),
        )
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing FieldOps Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: SocketAddr = SocketAddr::new(args.bind, args.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests;
