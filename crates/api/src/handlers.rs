// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every write follows the same path: authorize, translate the request into
//! a core `Command`, load the tenant state, apply, and persist the effect and
//! its audit event together. The caller holds the persistence lock for the
//! whole call.

use fieldops::{Command, State, TransitionResult, apply};
use fieldops_audit::AuditEvent;
use fieldops_domain::{
    Account, AccountNode, AccountType, AttendanceRecord, BudgetSummary, Deductions, Earnings,
    EmployeeId, GeoPoint, JournalEntry, JournalLine, JournalStatus, LedgerLine, LedgerRange,
    LedgerReport, Locale, Money, PayrollRecord, PayrollStatus, Project, ProjectStatus, Request,
    RequestStatus, RequestType, TaskAssignment, TaskAssignmentStatus, TechnicianWorkload, TenantId,
    TrialBalance, accumulate, build_account_tree, compute_trial_balance, compute_workload,
    parse_date, summarize_budget, validate_date_range,
};
use fieldops_persistence::{PersistTransitionResult, Persistence};
use std::collections::HashMap;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};
use tracing::debug;

use crate::auth::{AuthorizationService, RequestContext};
use crate::csv_export::ledger_to_csv;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AccountNodeInfo, AccountTreeResponse, AssignTechnicianRequest, AssignmentInfo,
    AttendanceInfo, AttendanceRequest, AuditEventInfo, ChangeStatusRequest, CreateAccountRequest,
    CreatePayrollRequest, CreateProjectRequest, DeductionsInput, EarningsInput, JournalEntryInfo,
    JournalLineInfo, LedgerLineInfo, LedgerQuery, LedgerResponse, ListAssignmentsResponse,
    ListAttendanceResponse, ListJournalEntriesResponse, ListPayrollResponse, ListProjectsResponse,
    ListRequestsResponse, PayrollInfo, ProjectInfo, RecordJournalEntryRequest,
    ReplyToRequestRequest, RequestInfo, SubmitRequestRequest, TrialBalanceResponse,
    TrialBalanceRowInfo, WorkloadInfo, WorkloadResponse, WriteResponse,
};

// ============================================================================
// Input translation
// ============================================================================

/// Entity kinds that carry an audit history.
const AUDITED_ENTITY_KINDS: [&str; 7] = [
    "account",
    "journal_entry",
    "project",
    "task_assignment",
    "request",
    "payroll_record",
    "attendance",
];

fn invalid_input(field: &str, message: impl std::fmt::Display) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: message.to_string(),
    }
}

fn parse_amount(field: &str, value: &str) -> Result<Money, ApiError> {
    Money::parse(value).map_err(|e| invalid_input(field, e))
}

/// A missing or blank amount is zero.
fn parse_optional_amount(field: &str, value: Option<&str>) -> Result<Money, ApiError> {
    match value.map(str::trim) {
        None | Some("") => Ok(Money::ZERO),
        Some(v) => parse_amount(field, v),
    }
}

fn parse_date_field(field: &str, value: &str) -> Result<Date, ApiError> {
    parse_date(value).map_err(|e| invalid_input(field, e))
}

fn parse_optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| parse_date_field(field, v))
        .transpose()
}

fn parse_employee(field: &str, value: &str) -> Result<EmployeeId, ApiError> {
    EmployeeId::new(value).map_err(|e| invalid_input(field, e))
}

/// Resolves an optional employee field, defaulting to the acting employee.
fn employee_or_actor(
    field: &str,
    value: Option<&str>,
    ctx: &RequestContext,
) -> Result<EmployeeId, ApiError> {
    parse_employee(field, value.unwrap_or(&ctx.actor.id))
}

fn parse_status<S>(value: &str) -> Result<S, ApiError>
where
    S: std::str::FromStr<Err = fieldops_domain::DomainError>,
{
    value
        .trim()
        .to_lowercase()
        .parse::<S>()
        .map_err(translate_domain_error)
}

fn format_date(date: Date) -> String {
    date.to_string()
}

fn format_timestamp(at: OffsetDateTime) -> Result<String, ApiError> {
    at.format(&Rfc3339).map_err(|e| ApiError::Internal {
        message: format!("Failed to format timestamp: {e}"),
    })
}

fn parse_timestamp(value: Option<&str>) -> Result<OffsetDateTime, ApiError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => OffsetDateTime::parse(v, &Rfc3339).map_err(|e| invalid_input("at", e)),
        None => Ok(OffsetDateTime::now_utc()),
    }
}

/// Payroll components are lenient: missing or malformed text counts as zero.
fn lenient_amount(value: Option<&str>) -> Money {
    value.map_or(Money::ZERO, Money::parse_lenient)
}

fn earnings_from(input: &EarningsInput) -> Earnings {
    Earnings {
        basic: lenient_amount(input.basic.as_deref()),
        housing: lenient_amount(input.housing.as_deref()),
        transport: lenient_amount(input.transport.as_deref()),
        overtime: lenient_amount(input.overtime.as_deref()),
        other: lenient_amount(input.other.as_deref()),
    }
}

fn deductions_from(input: &DeductionsInput) -> Deductions {
    Deductions {
        social_insurance: lenient_amount(input.social_insurance.as_deref()),
        tax: lenient_amount(input.tax.as_deref()),
        loans: lenient_amount(input.loans.as_deref()),
        absence: lenient_amount(input.absence.as_deref()),
        other: lenient_amount(input.other.as_deref()),
    }
}

// ============================================================================
// Write path
// ============================================================================

/// Loads the tenant state, applies `command` and persists the result.
fn execute(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    command: Command,
) -> Result<PersistTransitionResult, ApiError> {
    let name: &'static str = command.name();
    let state: State = persistence
        .load_state(&ctx.tenant)
        .map_err(translate_persistence_error)?;
    let result: TransitionResult = apply(
        &state,
        command,
        ctx.actor.to_audit_actor(),
        ctx.cause.clone(),
    )
    .map_err(translate_core_error)?;
    let persisted: PersistTransitionResult = persistence
        .persist_transition(&result)
        .map_err(translate_persistence_error)?;

    debug!(
        command = name,
        tenant = %ctx.tenant,
        actor_id = %ctx.actor.id,
        event_id = persisted.event_id,
        "Executed command"
    );
    Ok(persisted)
}

fn write_response(persisted: &PersistTransitionResult, message: String) -> WriteResponse {
    WriteResponse {
        entity_id: persisted.entity_id,
        event_id: persisted.event_id,
        message,
    }
}

/// Adds an account to the chart of accounts.
///
/// # Errors
///
/// Returns an error if the actor is not an admin or accountant, the input is
/// malformed, the code is taken, or the parent does not fit.
pub fn create_account(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: CreateAccountRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_create_account(&ctx.actor)?;

    let account_type: AccountType = request
        .account_type
        .parse()
        .map_err(translate_domain_error)?;
    let command: Command = Command::CreateAccount {
        code: request.code.clone(),
        name_en: request.name_en,
        name_ar: request.name_ar,
        account_type,
        parent_id: request.parent_id,
    };

    let persisted: PersistTransitionResult = execute(persistence, ctx, command)?;
    Ok(write_response(
        &persisted,
        format!("Created account '{}'", request.code.trim()),
    ))
}

/// Records a journal entry.
///
/// # Errors
///
/// Returns an error if the actor may not post journals, an amount or date is
/// malformed, or the entry is not a valid balanced draft.
pub fn record_journal_entry(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: RecordJournalEntryRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_journal(&ctx.actor)?;

    let entry_date: Date = parse_date_field("entry_date", &request.entry_date)?;
    let status: JournalStatus = match request.status.as_deref() {
        Some(status) => parse_status(status)?,
        None => JournalStatus::Draft,
    };

    let mut lines: Vec<JournalLine> = Vec::with_capacity(request.lines.len());
    for (idx, input) in request.lines.iter().enumerate() {
        let line_no: usize = idx + 1;
        let debit: Money =
            parse_optional_amount(&format!("lines[{line_no}].debit"), input.debit.as_deref())?;
        let credit: Money =
            parse_optional_amount(&format!("lines[{line_no}].credit"), input.credit.as_deref())?;
        let line: JournalLine = JournalLine::new(input.account_id, debit, credit);
        lines.push(match input.memo.as_deref() {
            Some(memo) => line.with_memo(memo),
            None => line,
        });
    }

    let command: Command = Command::RecordJournalEntry {
        entry_date,
        reference: request.reference.clone(),
        description: request.description.unwrap_or_default(),
        status,
        lines,
    };

    let persisted: PersistTransitionResult = execute(persistence, ctx, command)?;
    Ok(write_response(
        &persisted,
        format!("Recorded journal entry '{}' as {status}", request.reference.trim()),
    ))
}

/// Posts or voids a journal entry.
///
/// # Errors
///
/// Returns an error if the actor may not post journals, the entry does not
/// exist, or the lifecycle forbids the move.
pub fn change_journal_status(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    entry_id: i64,
    request: &ChangeStatusRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_journal(&ctx.actor)?;

    let status: JournalStatus = parse_status(&request.status)?;
    let persisted: PersistTransitionResult =
        execute(persistence, ctx, Command::ChangeJournalStatus { entry_id, status })?;
    Ok(write_response(
        &persisted,
        format!("Journal entry {entry_id} is now {status}"),
    ))
}

/// Opens a project.
///
/// # Errors
///
/// Returns an error if the actor may not manage projects or the input is
/// invalid.
pub fn create_project(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: CreateProjectRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_project(&ctx.actor)?;

    let command: Command = Command::CreateProject {
        manager: parse_employee("manager", &request.manager)?,
        budget: parse_amount("budget", &request.budget)?,
        start_date: parse_date_field("start_date", &request.start_date)?,
        end_date: parse_optional_date("end_date", request.end_date.as_deref())?,
        title: request.title.clone(),
        location: request.location,
    };

    let persisted: PersistTransitionResult = execute(persistence, ctx, command)?;
    Ok(write_response(
        &persisted,
        format!("Created project '{}'", request.title.trim()),
    ))
}

/// Moves a project through its lifecycle.
///
/// # Errors
///
/// Returns an error if the actor may not manage projects, the project does
/// not exist, or the lifecycle forbids the move.
pub fn change_project_status(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    project_id: i64,
    request: &ChangeStatusRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_manage_project(&ctx.actor)?;

    let status: ProjectStatus = parse_status(&request.status)?;
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::ChangeProjectStatus { project_id, status },
    )?;
    Ok(write_response(
        &persisted,
        format!("Project {project_id} is now {status}"),
    ))
}

/// Assigns a technician to a project.
///
/// # Errors
///
/// Returns an error if the actor may not assign work, the project is closed,
/// or the technician is already assigned.
pub fn assign_technician(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: &AssignTechnicianRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_assign_technician(&ctx.actor)?;

    let technician: EmployeeId = parse_employee("technician", &request.technician)?;
    let message: String = format!(
        "Assigned '{technician}' to project {}",
        request.project_id
    );
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::AssignTechnician {
            project_id: request.project_id,
            technician,
        },
    )?;
    Ok(write_response(&persisted, message))
}

/// Records a technician's response to an assignment.
///
/// # Errors
///
/// Returns an error if the assignment does not exist, the actor is an
/// employee other than the assigned technician, or the lifecycle forbids the
/// move.
pub fn respond_to_assignment(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    assignment_id: i64,
    request: ChangeStatusRequest,
) -> Result<WriteResponse, ApiError> {
    let assignment: TaskAssignment = persistence
        .list_assignments(&ctx.tenant, None)
        .map_err(translate_persistence_error)?
        .into_iter()
        .find(|a| a.assignment_id == Some(assignment_id))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("task_assignment"),
            message: format!("task_assignment {assignment_id} does not exist"),
        })?;
    AuthorizationService::authorize_respond_to_assignment(&ctx.actor, &assignment.technician)?;

    let status: TaskAssignmentStatus = parse_status(&request.status)?;
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::RespondToAssignment {
            assignment_id,
            status,
            notes: request.notes,
        },
    )?;
    Ok(write_response(
        &persisted,
        format!("Assignment {assignment_id} is now {status}"),
    ))
}

/// Submits a request for review.
///
/// # Errors
///
/// Returns an error if an employee submits for someone else, the input is
/// invalid, or the referenced project does not accept work.
pub fn submit_request(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: SubmitRequestRequest,
) -> Result<WriteResponse, ApiError> {
    let requester: EmployeeId = employee_or_actor("requester", request.requester.as_deref(), ctx)?;
    AuthorizationService::authorize_submit_request(&ctx.actor, &requester)?;

    let request_type: RequestType = request
        .request_type
        .parse()
        .map_err(translate_domain_error)?;
    let amount: Option<Money> = match request.amount.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => Some(parse_amount("amount", value)?),
    };

    let command: Command = Command::SubmitRequest {
        request_type,
        requester,
        project_id: request.project_id,
        amount,
        description: request.description,
        submitted_on: parse_date_field("submitted_on", &request.submitted_on)?,
    };

    let persisted: PersistTransitionResult = execute(persistence, ctx, command)?;
    Ok(write_response(
        &persisted,
        format!("Submitted {request_type} request"),
    ))
}

/// Applies a reviewer decision to a request.
///
/// # Errors
///
/// Returns an error if the actor may not review, the request does not exist,
/// the decision is not allowed, or required notes are missing.
pub fn review_request(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request_id: i64,
    request: ChangeStatusRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_review_request(&ctx.actor)?;

    let decision: RequestStatus = parse_status(&request.status)?;
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::ReviewRequest {
            request_id,
            decision,
            notes: request.notes,
        },
    )?;
    Ok(write_response(
        &persisted,
        format!("Request {request_id} is now {decision}"),
    ))
}

/// Answers a clarification question and returns the request to pending.
///
/// # Errors
///
/// Returns an error if the request does not exist, the actor is not the
/// requester, or the request is not awaiting clarification.
pub fn reply_to_request(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request_id: i64,
    request: ReplyToRequestRequest,
) -> Result<WriteResponse, ApiError> {
    let existing: Request = persistence
        .list_requests(&ctx.tenant)
        .map_err(translate_persistence_error)?
        .into_iter()
        .find(|r| r.request_id == Some(request_id))
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("request"),
            message: format!("request {request_id} does not exist"),
        })?;
    AuthorizationService::authorize_reply_to_request(&ctx.actor, &existing.requester)?;

    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::ReplyToRequest {
            request_id,
            reply: request.reply,
        },
    )?;
    Ok(write_response(
        &persisted,
        format!("Request {request_id} resubmitted"),
    ))
}

/// Creates a draft payroll record.
///
/// # Errors
///
/// Returns an error if the actor may not manage payroll, a component is
/// malformed or negative, deductions exceed earnings, or the period is
/// already recorded.
pub fn create_payroll_record(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: &CreatePayrollRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_payroll(&ctx.actor)?;

    let employee: EmployeeId = parse_employee("employee", &request.employee)?;
    let period_start: Date = parse_date_field("period_start", &request.period_start)?;
    let message: String = format!("Created payroll for '{employee}' starting {period_start}");
    let command: Command = Command::CreatePayrollRecord {
        employee,
        period_start,
        period_end: parse_date_field("period_end", &request.period_end)?,
        earnings: earnings_from(&request.earnings),
        deductions: deductions_from(&request.deductions),
    };

    let persisted: PersistTransitionResult = execute(persistence, ctx, command)?;
    Ok(write_response(&persisted, message))
}

/// Moves a payroll record through its lifecycle.
///
/// # Errors
///
/// Returns an error if the actor may not manage payroll, the record does not
/// exist, the lifecycle forbids the move, or a failure has no reason.
pub fn change_payroll_status(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    payroll_id: i64,
    request: ChangeStatusRequest,
) -> Result<WriteResponse, ApiError> {
    AuthorizationService::authorize_payroll(&ctx.actor)?;

    let status: PayrollStatus = parse_status(&request.status)?;
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::ChangePayrollStatus {
            payroll_id,
            status,
            notes: request.notes,
        },
    )?;
    Ok(write_response(
        &persisted,
        format!("Payroll record {payroll_id} is now {status}"),
    ))
}

fn attendance_command(
    ctx: &RequestContext,
    request: &AttendanceRequest,
) -> Result<(EmployeeId, OffsetDateTime, GeoPoint), ApiError> {
    let employee: EmployeeId = employee_or_actor("employee", request.employee.as_deref(), ctx)?;
    AuthorizationService::authorize_attendance(&ctx.actor, &employee)?;
    let at: OffsetDateTime = parse_timestamp(request.at.as_deref())?;
    let location: GeoPoint =
        GeoPoint::new(request.latitude, request.longitude).map_err(translate_domain_error)?;
    Ok((employee, at, location))
}

/// Opens an attendance record.
///
/// # Errors
///
/// Returns an error if the actor records for someone else without being an
/// admin, the coordinates are invalid, or the employee is already checked in.
pub fn check_in(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: &AttendanceRequest,
) -> Result<WriteResponse, ApiError> {
    let (employee, at, location) = attendance_command(ctx, request)?;
    let message: String = format!("'{employee}' checked in");
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::CheckIn {
            employee,
            at,
            location,
        },
    )?;
    Ok(write_response(&persisted, message))
}

/// Closes the employee's open attendance record.
///
/// # Errors
///
/// Returns an error if the actor records for someone else without being an
/// admin, the employee is not checked in, or the time precedes check-in.
pub fn check_out(
    persistence: &mut Persistence,
    ctx: &RequestContext,
    request: &AttendanceRequest,
) -> Result<WriteResponse, ApiError> {
    let (employee, at, location) = attendance_command(ctx, request)?;
    let message: String = format!("'{employee}' checked out");
    let persisted: PersistTransitionResult = execute(
        persistence,
        ctx,
        Command::CheckOut {
            employee,
            at,
            location,
        },
    )?;
    Ok(write_response(&persisted, message))
}

// ============================================================================
// Ledger reports
// ============================================================================

fn account_node_info(node: &AccountNode, locale: Locale) -> AccountNodeInfo {
    AccountNodeInfo {
        account_id: node.account.account_id,
        code: node.account.code.clone(),
        name: node.account.name.resolve(locale).to_string(),
        account_type: node.account.account_type.as_str().to_string(),
        normal_side: node.account.normal_side().as_str().to_string(),
        balance: node.balance.to_string(),
        rolled_up_balance: node.rolled_up_balance.to_string(),
        children: node
            .children
            .iter()
            .map(|child| account_node_info(child, locale))
            .collect(),
    }
}

/// The chart of accounts as a tree, with each account's balance and the
/// rolled-up balance of its subtree, named in `locale`.
///
/// # Errors
///
/// Returns an error if `as_of` is malformed or a query fails.
pub fn get_account_tree(
    persistence: &mut Persistence,
    tenant: &TenantId,
    locale: Locale,
    as_of: Option<&str>,
) -> Result<AccountTreeResponse, ApiError> {
    let as_of: Option<Date> = parse_optional_date("as_of", as_of)?;
    let accounts: Vec<Account> = persistence
        .list_accounts(tenant)
        .map_err(translate_persistence_error)?;
    let balances: HashMap<i64, Money> = persistence
        .account_balances(tenant, as_of)
        .map_err(translate_persistence_error)?;

    let tree: Vec<AccountNode> = build_account_tree(&accounts, &balances);
    Ok(AccountTreeResponse {
        locale: locale.as_str().to_string(),
        as_of: as_of.map(format_date),
        accounts: tree
            .iter()
            .map(|node| account_node_info(node, locale))
            .collect(),
    })
}

fn journal_entry_info(entry: &JournalEntry) -> JournalEntryInfo {
    let totals = entry.totals();
    JournalEntryInfo {
        entry_id: entry.entry_id,
        entry_date: format_date(entry.entry_date),
        reference: entry.reference.clone(),
        description: entry.description.clone(),
        status: entry.status.to_string(),
        total_debit: totals.debit.to_string(),
        total_credit: totals.credit.to_string(),
        balanced: totals.is_balanced(),
        lines: entry
            .lines
            .iter()
            .map(|line| JournalLineInfo {
                line_id: line.line_id,
                account_id: line.account_id,
                debit: line.debit.to_string(),
                credit: line.credit.to_string(),
                memo: line.memo.clone(),
            })
            .collect(),
    }
}

/// Lists every journal entry of the tenant with its lines.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_journal_entries(
    persistence: &mut Persistence,
    tenant: &TenantId,
) -> Result<ListJournalEntriesResponse, ApiError> {
    let entries: Vec<JournalEntry> = persistence
        .list_journal_entries(tenant)
        .map_err(translate_persistence_error)?;
    Ok(ListJournalEntriesResponse {
        entries: entries.iter().map(journal_entry_info).collect(),
    })
}

/// The general ledger of one account with opening balance, running balance
/// per line and closing balance.
///
/// # Errors
///
/// Returns an error if the account does not exist, a date is malformed, the
/// range is inverted, or a query fails.
pub fn get_ledger(
    persistence: &mut Persistence,
    tenant: &TenantId,
    account_id: i64,
    query: &LedgerQuery,
    locale: Locale,
) -> Result<LedgerResponse, ApiError> {
    let from: Option<Date> = parse_optional_date("from", query.from.as_deref())?;
    let to: Option<Date> = parse_optional_date("to", query.to.as_deref())?;
    if let (Some(start), Some(end)) = (from, to) {
        validate_date_range(start, end).map_err(translate_domain_error)?;
    }

    let account: Account = persistence
        .get_account(tenant, account_id)
        .map_err(translate_persistence_error)?;
    let lines: Vec<LedgerLine> = persistence
        .ledger_lines(tenant, account_id)
        .map_err(translate_persistence_error)?;
    let report: LedgerReport = accumulate(&lines, account.normal_side(), LedgerRange::new(from, to));

    Ok(LedgerResponse {
        account_id,
        code: account.code.clone(),
        name: account.name.resolve(locale).to_string(),
        normal_side: report.normal_side.as_str().to_string(),
        from: from.map(format_date),
        to: to.map(format_date),
        opening_balance: report.opening_balance.to_string(),
        closing_balance: report.closing_balance.to_string(),
        total_debit: report.total_debit.to_string(),
        total_credit: report.total_credit.to_string(),
        lines: report
            .lines
            .iter()
            .map(|running| LedgerLineInfo {
                date: format_date(running.line.date),
                entry_id: running.line.entry_id,
                reference: running.line.reference.clone(),
                description: running.line.description.clone(),
                debit: running.line.debit.to_string(),
                credit: running.line.credit.to_string(),
                signed_amount: running.signed_amount.to_string(),
                balance: running.balance.to_string(),
            })
            .collect(),
    })
}

/// The general ledger of one account rendered as CSV.
///
/// # Errors
///
/// Returns the errors of [`get_ledger`], or an internal error if the CSV
/// cannot be written.
pub fn export_ledger_csv(
    persistence: &mut Persistence,
    tenant: &TenantId,
    account_id: i64,
    query: &LedgerQuery,
    locale: Locale,
) -> Result<String, ApiError> {
    let ledger: LedgerResponse = get_ledger(persistence, tenant, account_id, query, locale)?;
    Ok(ledger_to_csv(&ledger)?)
}

/// The trial balance of posted entries up to `as_of`.
///
/// # Errors
///
/// Returns an error if `as_of` is malformed or a query fails.
pub fn get_trial_balance(
    persistence: &mut Persistence,
    tenant: &TenantId,
    as_of: Option<&str>,
    locale: Locale,
) -> Result<TrialBalanceResponse, ApiError> {
    let as_of: Option<Date> = parse_optional_date("as_of", as_of)?;
    let accounts: Vec<Account> = persistence
        .list_accounts(tenant)
        .map_err(translate_persistence_error)?;
    let lines: HashMap<i64, Vec<LedgerLine>> = persistence
        .posted_lines_by_account(tenant)
        .map_err(translate_persistence_error)?;

    let trial_balance: TrialBalance = compute_trial_balance(&accounts, &lines, as_of);
    Ok(TrialBalanceResponse {
        as_of: as_of.map(format_date),
        balanced: trial_balance.is_balanced(),
        total_debit: trial_balance.total_debit.to_string(),
        total_credit: trial_balance.total_credit.to_string(),
        rows: trial_balance
            .rows
            .iter()
            .map(|row| TrialBalanceRowInfo {
                account_id: row.account.account_id,
                code: row.account.code.clone(),
                name: row.account.name.resolve(locale).to_string(),
                debit: row.debit.to_string(),
                credit: row.credit.to_string(),
            })
            .collect(),
    })
}

// ============================================================================
// Workflow reports
// ============================================================================

/// Formats basis points as a percentage with two decimals.
fn format_basis_points(bp: i64) -> String {
    let sign: &str = if bp < 0 { "-" } else { "" };
    let abs: u64 = bp.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

/// Lists projects with their budget position against approved requests.
///
/// # Errors
///
/// Returns an error if a query fails.
pub fn list_projects(
    persistence: &mut Persistence,
    tenant: &TenantId,
) -> Result<ListProjectsResponse, ApiError> {
    let projects: Vec<Project> = persistence
        .list_projects(tenant)
        .map_err(translate_persistence_error)?;
    let requests: Vec<Request> = persistence
        .list_requests(tenant)
        .map_err(translate_persistence_error)?;

    let projects: Vec<ProjectInfo> = projects
        .iter()
        .map(|project| {
            let summary: BudgetSummary = summarize_budget(project, &requests);
            ProjectInfo {
                project_id: project.project_id,
                title: project.title.clone(),
                manager: project.manager.value().to_string(),
                location: project.location.clone(),
                status: project.status.to_string(),
                start_date: format_date(project.start_date),
                end_date: project.end_date.map(format_date),
                budget: summary.budget.to_string(),
                committed: summary.committed.to_string(),
                variance: summary.variance.to_string(),
                utilization_percent: format_basis_points(summary.utilization_bp),
                over_budget: summary.over_budget,
            }
        })
        .collect();
    Ok(ListProjectsResponse { projects })
}

/// Lists task assignments, optionally for one project.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_assignments(
    persistence: &mut Persistence,
    tenant: &TenantId,
    project_id: Option<i64>,
) -> Result<ListAssignmentsResponse, ApiError> {
    let assignments: Vec<TaskAssignment> = persistence
        .list_assignments(tenant, project_id)
        .map_err(translate_persistence_error)?;
    Ok(ListAssignmentsResponse {
        assignments: assignments
            .into_iter()
            .map(|a| AssignmentInfo {
                assignment_id: a.assignment_id,
                project_id: a.project_id,
                technician: a.technician.value().to_string(),
                status: a.status.to_string(),
                notes: a.notes,
            })
            .collect(),
    })
}

/// Open and completed assignment counts per technician.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_workload(
    persistence: &mut Persistence,
    tenant: &TenantId,
) -> Result<WorkloadResponse, ApiError> {
    let assignments: Vec<TaskAssignment> = persistence
        .list_assignments(tenant, None)
        .map_err(translate_persistence_error)?;
    let workload: Vec<TechnicianWorkload> = compute_workload(&assignments);
    Ok(WorkloadResponse {
        technicians: workload
            .into_iter()
            .map(|w| WorkloadInfo {
                technician: w.technician.value().to_string(),
                open: w.open,
                completed: w.completed,
            })
            .collect(),
    })
}

/// Lists requests, newest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_requests(
    persistence: &mut Persistence,
    tenant: &TenantId,
) -> Result<ListRequestsResponse, ApiError> {
    let requests: Vec<Request> = persistence
        .list_requests(tenant)
        .map_err(translate_persistence_error)?;
    Ok(ListRequestsResponse {
        requests: requests
            .into_iter()
            .map(|r| RequestInfo {
                request_id: r.request_id,
                request_type: r.request_type.as_str().to_string(),
                requester: r.requester.value().to_string(),
                project_id: r.project_id,
                amount: r.amount.map(|a| a.to_string()),
                description: r.description,
                status: r.status.to_string(),
                review_notes: r.review_notes,
                reply: r.reply,
                reviewed_by: r.reviewed_by,
                submitted_on: format_date(r.submitted_on),
            })
            .collect(),
    })
}

// ============================================================================
// Workforce reports
// ============================================================================

/// Lists payroll records with their derived totals.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_payroll_records(
    persistence: &mut Persistence,
    tenant: &TenantId,
) -> Result<ListPayrollResponse, ApiError> {
    let records: Vec<PayrollRecord> = persistence
        .list_payroll_records(tenant)
        .map_err(translate_persistence_error)?;
    Ok(ListPayrollResponse {
        records: records
            .iter()
            .map(|record| PayrollInfo {
                payroll_id: record.payroll_id,
                employee: record.employee.value().to_string(),
                period_start: format_date(record.period_start),
                period_end: format_date(record.period_end),
                gross: record.gross().to_string(),
                total_deductions: record.total_deductions().to_string(),
                net_pay: record.net_pay().to_string(),
                status: record.status.to_string(),
                notes: record.notes.clone(),
            })
            .collect(),
    })
}

/// Lists one employee's attendance records.
///
/// # Errors
///
/// Returns an error if the employee id is empty, a query fails, or a
/// timestamp cannot be formatted.
pub fn list_attendance(
    persistence: &mut Persistence,
    tenant: &TenantId,
    employee: &str,
) -> Result<ListAttendanceResponse, ApiError> {
    let employee: EmployeeId = parse_employee("employee", employee)?;
    let records: Vec<AttendanceRecord> = persistence
        .list_attendance(tenant, &employee)
        .map_err(translate_persistence_error)?;

    let mut infos: Vec<AttendanceInfo> = Vec::with_capacity(records.len());
    for record in &records {
        infos.push(AttendanceInfo {
            attendance_id: record.attendance_id,
            employee: record.employee.value().to_string(),
            check_in_at: format_timestamp(record.check_in_at)?,
            check_in_latitude: record.check_in_location.latitude(),
            check_in_longitude: record.check_in_location.longitude(),
            check_out_at: record.check_out_at.map(format_timestamp).transpose()?,
            worked_minutes: record.worked_minutes(),
        });
    }
    Ok(ListAttendanceResponse { records: infos })
}

// ============================================================================
// Audit trail
// ============================================================================

fn audit_event_info(event: &AuditEvent) -> Result<AuditEventInfo, ApiError> {
    Ok(AuditEventInfo {
        event_id: event.event_id,
        tenant: event.tenant.value().to_string(),
        entity_kind: event.entity.kind.clone(),
        entity_id: event.entity.id,
        actor_id: event.actor.id.clone(),
        actor_type: event.actor.actor_type.clone(),
        cause_id: event.cause.id.clone(),
        cause_description: event.cause.description.clone(),
        action_name: event.action.name.clone(),
        action_details: event.action.details.clone(),
        before_snapshot: event.before.data.clone(),
        after_snapshot: event.after.data.clone(),
        created_at: event.created_at.map(format_timestamp).transpose()?,
    })
}

/// The tenant's audit trail, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_audit_timeline(
    persistence: &mut Persistence,
    tenant: &TenantId,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    let events: Vec<AuditEvent> = persistence
        .get_audit_timeline(tenant)
        .map_err(translate_persistence_error)?;
    events.iter().map(audit_event_info).collect()
}

/// A single audit event of the tenant.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the tenant has no event with this id.
pub fn get_audit_event(
    persistence: &mut Persistence,
    tenant: &TenantId,
    event_id: i64,
) -> Result<AuditEventInfo, ApiError> {
    let event: AuditEvent = persistence
        .get_audit_event(tenant, event_id)
        .map_err(translate_persistence_error)?;
    audit_event_info(&event)
}

/// Every audit event recorded against one record, oldest first.
///
/// # Errors
///
/// Returns `InvalidInput` for an unknown entity kind, or an error if the
/// query fails.
pub fn get_entity_history(
    persistence: &mut Persistence,
    tenant: &TenantId,
    entity_kind: &str,
    entity_id: i64,
) -> Result<Vec<AuditEventInfo>, ApiError> {
    if !AUDITED_ENTITY_KINDS.contains(&entity_kind) {
        return Err(invalid_input(
            "entity_kind",
            format!("Unknown entity kind '{entity_kind}'"),
        ));
    }
    let events: Vec<AuditEvent> = persistence
        .get_entity_history(tenant, entity_kind, entity_id)
        .map_err(translate_persistence_error)?;
    events.iter().map(audit_event_info).collect()
}
