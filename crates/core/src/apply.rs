// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::snapshot;
use crate::state::{Effect, State, TransitionResult};
use fieldops_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use fieldops_domain::{
    Account, AccountType, AttendanceRecord, Deductions, DomainError, Earnings, EmployeeId,
    GeoPoint, JournalEntry, JournalHeader, JournalLine, JournalStatus, LocalizedName, Money,
    PayrollRecord, PayrollStatus, Project, ProjectStatus, Request, RequestStatus, RequestType,
    StatusLifecycle, TaskAssignment, TaskAssignmentStatus, open_record, validate_new_account,
};
use time::{Date, OffsetDateTime};

/// What a single command changed, before it is wrapped into an audit event.
struct Outcome {
    new_state: State,
    effect: Effect,
    entity: EntityRef,
    details: String,
    before: StateSnapshot,
    after: StateSnapshot,
}

/// Applies a command to the current state, producing a new state, the write
/// to perform, and an audit event.
///
/// # Arguments
///
/// * `state` - The current tenant state (immutable)
/// * `command` - The command to apply
/// * `actor` - The actor performing this action
/// * `cause` - The cause or reason for this action
///
/// # Errors
///
/// Returns an error if:
/// - The command violates domain rules
/// - The record the command targets does not exist
pub fn apply(
    state: &State,
    command: Command,
    actor: Actor,
    cause: Cause,
) -> Result<TransitionResult, CoreError> {
    let name: &'static str = command.name();

    let outcome: Outcome = match command {
        Command::CreateAccount {
            code,
            name_en,
            name_ar,
            account_type,
            parent_id,
        } => create_account(
            state,
            &code,
            LocalizedName::new(&name_en, name_ar.as_deref()),
            account_type,
            parent_id,
        )?,
        Command::RecordJournalEntry {
            entry_date,
            reference,
            description,
            status,
            lines,
        } => record_journal_entry(state, entry_date, &reference, &description, status, lines)?,
        Command::ChangeJournalStatus { entry_id, status } => {
            change_journal_status(state, entry_id, status)?
        }
        Command::CreateProject {
            title,
            manager,
            location,
            budget,
            start_date,
            end_date,
        } => create_project(
            state, &title, manager, &location, budget, start_date, end_date,
        )?,
        Command::ChangeProjectStatus { project_id, status } => {
            change_project_status(state, project_id, status)?
        }
        Command::AssignTechnician {
            project_id,
            technician,
        } => assign_technician(state, project_id, technician)?,
        Command::RespondToAssignment {
            assignment_id,
            status,
            notes,
        } => respond_to_assignment(state, assignment_id, status, notes)?,
        Command::SubmitRequest {
            request_type,
            requester,
            project_id,
            amount,
            description,
            submitted_on,
        } => submit_request(
            state,
            request_type,
            requester,
            project_id,
            amount,
            &description,
            submitted_on,
        )?,
        Command::ReviewRequest {
            request_id,
            decision,
            notes,
        } => review_request(state, request_id, decision, notes, &actor.id)?,
        Command::ReplyToRequest { request_id, reply } => {
            reply_to_request(state, request_id, &reply)?
        }
        Command::CreatePayrollRecord {
            employee,
            period_start,
            period_end,
            earnings,
            deductions,
        } => create_payroll_record(
            state,
            employee,
            period_start,
            period_end,
            earnings,
            deductions,
        )?,
        Command::ChangePayrollStatus {
            payroll_id,
            status,
            notes,
        } => change_payroll_status(state, payroll_id, status, notes)?,
        Command::CheckIn {
            employee,
            at,
            location,
        } => check_in(state, employee, at, location)?,
        Command::CheckOut {
            employee,
            at,
            location,
        } => check_out(state, &employee, at, location)?,
    };

    let action: Action = Action::new(name.to_string(), Some(outcome.details));
    let audit_event: AuditEvent = AuditEvent::new(
        state.tenant.clone(),
        outcome.entity,
        actor,
        cause,
        action,
        outcome.before,
        outcome.after,
    );

    Ok(TransitionResult {
        new_state: outcome.new_state,
        audit_event,
        effect: outcome.effect,
    })
}

/// Finds a record by id or reports the command target as missing.
fn find<'a, T>(
    items: &'a [T],
    entity: &'static str,
    id: i64,
    id_of: impl Fn(&T) -> Option<i64>,
) -> Result<&'a T, CoreError> {
    items
        .iter()
        .find(|item| id_of(*item) == Some(id))
        .ok_or(CoreError::EntityNotFound { entity, id })
}

/// Returns `items` with the record matching `id` swapped for `updated`.
fn replaced<T: Clone>(
    items: &[T],
    id: i64,
    id_of: impl Fn(&T) -> Option<i64>,
    updated: &T,
) -> Vec<T> {
    items
        .iter()
        .map(|item| {
            if id_of(item) == Some(id) {
                updated.clone()
            } else {
                item.clone()
            }
        })
        .collect()
}

fn create_account(
    state: &State,
    code: &str,
    name: LocalizedName,
    account_type: AccountType,
    parent_id: Option<i64>,
) -> Result<Outcome, CoreError> {
    let account: Account = Account::new(code, name, account_type, parent_id);
    validate_new_account(&state.accounts, &account)?;

    let mut new_state: State = state.clone();
    new_state.accounts.push(account.clone());

    Ok(Outcome {
        details: format!(
            "Created {} account '{}' ({})",
            account.account_type, account.code, account.name.en
        ),
        entity: EntityRef::new("account", None),
        before: StateSnapshot::absent(),
        after: snapshot::account(&account),
        effect: Effect::Account(account),
        new_state,
    })
}

fn record_journal_entry(
    state: &State,
    entry_date: Date,
    reference: &str,
    description: &str,
    status: JournalStatus,
    lines: Vec<JournalLine>,
) -> Result<Outcome, CoreError> {
    let entry: JournalEntry = JournalEntry::new(entry_date, reference, description, status, lines)?;

    if let Some(unknown) = entry
        .lines
        .iter()
        .find(|line| state.account(line.account_id).is_none())
    {
        return Err(DomainError::AccountNotFound(unknown.account_id).into());
    }

    let mut new_state: State = state.clone();
    new_state.journal_entries.push(entry.header());

    Ok(Outcome {
        details: format!(
            "Recorded {} journal entry '{}' dated {} for {}",
            entry.status,
            entry.reference,
            entry.entry_date,
            entry.totals().debit
        ),
        entity: EntityRef::new("journal_entry", None),
        before: StateSnapshot::absent(),
        after: snapshot::journal_entry(&entry),
        effect: Effect::JournalEntry(entry),
        new_state,
    })
}

fn change_journal_status(
    state: &State,
    entry_id: i64,
    status: JournalStatus,
) -> Result<Outcome, CoreError> {
    let id_of = |h: &JournalHeader| h.entry_id;
    let current: &JournalHeader = find(&state.journal_entries, "journal entry", entry_id, id_of)?;
    current.status.validate_transition(status)?;

    let updated: JournalHeader = JournalHeader {
        status,
        ..current.clone()
    };
    let mut new_state: State = state.clone();
    new_state.journal_entries = replaced(&state.journal_entries, entry_id, id_of, &updated);

    Ok(Outcome {
        details: format!(
            "Journal entry '{}' moved from {} to {}",
            current.reference, current.status, status
        ),
        entity: EntityRef::new("journal_entry", Some(entry_id)),
        before: snapshot::journal_header(current),
        after: snapshot::journal_header(&updated),
        effect: Effect::JournalStatus { entry_id, status },
        new_state,
    })
}

fn create_project(
    state: &State,
    title: &str,
    manager: EmployeeId,
    location: &str,
    budget: Money,
    start_date: Date,
    end_date: Option<Date>,
) -> Result<Outcome, CoreError> {
    let project: Project = Project::new(title, manager, location, budget, start_date, end_date)?;

    let mut new_state: State = state.clone();
    new_state.projects.push(project.clone());

    Ok(Outcome {
        details: format!(
            "Created project '{}' with budget {}",
            project.title, project.budget
        ),
        entity: EntityRef::new("project", None),
        before: StateSnapshot::absent(),
        after: snapshot::project(&project),
        effect: Effect::Project(project),
        new_state,
    })
}

fn change_project_status(
    state: &State,
    project_id: i64,
    status: ProjectStatus,
) -> Result<Outcome, CoreError> {
    let id_of = |p: &Project| p.project_id;
    let current: &Project = find(&state.projects, "project", project_id, id_of)?;
    let updated: Project = current.transition(status)?;

    let mut new_state: State = state.clone();
    new_state.projects = replaced(&state.projects, project_id, id_of, &updated);

    Ok(Outcome {
        details: format!(
            "Project '{}' moved from {} to {}",
            current.title, current.status, status
        ),
        entity: EntityRef::new("project", Some(project_id)),
        before: snapshot::project(current),
        after: snapshot::project(&updated),
        effect: Effect::Project(updated),
        new_state,
    })
}

fn assign_technician(
    state: &State,
    project_id: i64,
    technician: EmployeeId,
) -> Result<Outcome, CoreError> {
    let project: &Project = state
        .project(project_id)
        .ok_or(DomainError::ProjectNotFound(project_id))?;
    project.ensure_accepts_work()?;

    if state
        .assignments
        .iter()
        .any(|a| a.project_id == project_id && a.technician == technician && a.status.is_open())
    {
        return Err(DomainError::DuplicateAssignment {
            project_id,
            technician: technician.value().to_string(),
        }
        .into());
    }

    let assignment: TaskAssignment = TaskAssignment::new(project_id, technician);
    let mut new_state: State = state.clone();
    new_state.assignments.push(assignment.clone());

    Ok(Outcome {
        details: format!(
            "Assigned technician '{}' to project '{}'",
            assignment.technician, project.title
        ),
        entity: EntityRef::new("task_assignment", None),
        before: StateSnapshot::absent(),
        after: snapshot::assignment(&assignment),
        effect: Effect::Assignment(assignment),
        new_state,
    })
}

fn respond_to_assignment(
    state: &State,
    assignment_id: i64,
    status: TaskAssignmentStatus,
    notes: Option<String>,
) -> Result<Outcome, CoreError> {
    let id_of = |a: &TaskAssignment| a.assignment_id;
    let current: &TaskAssignment =
        find(&state.assignments, "task assignment", assignment_id, id_of)?;
    let updated: TaskAssignment = current.respond(status, notes)?;

    let mut new_state: State = state.clone();
    new_state.assignments = replaced(&state.assignments, assignment_id, id_of, &updated);

    Ok(Outcome {
        details: format!(
            "Assignment of '{}' moved from {} to {}",
            current.technician, current.status, status
        ),
        entity: EntityRef::new("task_assignment", Some(assignment_id)),
        before: snapshot::assignment(current),
        after: snapshot::assignment(&updated),
        effect: Effect::Assignment(updated),
        new_state,
    })
}

fn submit_request(
    state: &State,
    request_type: RequestType,
    requester: EmployeeId,
    project_id: Option<i64>,
    amount: Option<Money>,
    description: &str,
    submitted_on: Date,
) -> Result<Outcome, CoreError> {
    if let Some(project_id) = project_id {
        state
            .project(project_id)
            .ok_or(DomainError::ProjectNotFound(project_id))?
            .ensure_accepts_work()?;
    }

    let request: Request = Request::new(
        request_type,
        requester,
        project_id,
        amount,
        description,
        submitted_on,
    )?;
    let mut new_state: State = state.clone();
    new_state.requests.push(request.clone());

    Ok(Outcome {
        details: format!(
            "Submitted {} request by '{}'",
            request.request_type, request.requester
        ),
        entity: EntityRef::new("request", None),
        before: StateSnapshot::absent(),
        after: snapshot::request(&request),
        effect: Effect::Request(request),
        new_state,
    })
}

fn review_request(
    state: &State,
    request_id: i64,
    decision: RequestStatus,
    notes: Option<String>,
    reviewer: &str,
) -> Result<Outcome, CoreError> {
    let id_of = |r: &Request| r.request_id;
    let current: &Request = find(&state.requests, "request", request_id, id_of)?;
    let updated: Request = current.review(decision, notes, reviewer)?;

    let mut new_state: State = state.clone();
    new_state.requests = replaced(&state.requests, request_id, id_of, &updated);

    Ok(Outcome {
        details: format!(
            "Request {request_id} moved from {} to {} by '{reviewer}'",
            current.status, decision
        ),
        entity: EntityRef::new("request", Some(request_id)),
        before: snapshot::request(current),
        after: snapshot::request(&updated),
        effect: Effect::Request(updated),
        new_state,
    })
}

fn reply_to_request(state: &State, request_id: i64, reply: &str) -> Result<Outcome, CoreError> {
    let id_of = |r: &Request| r.request_id;
    let current: &Request = find(&state.requests, "request", request_id, id_of)?;
    let updated: Request = current.reply(reply)?;

    let mut new_state: State = state.clone();
    new_state.requests = replaced(&state.requests, request_id, id_of, &updated);

    Ok(Outcome {
        details: format!("Request {request_id} clarified and resubmitted"),
        entity: EntityRef::new("request", Some(request_id)),
        before: snapshot::request(current),
        after: snapshot::request(&updated),
        effect: Effect::Request(updated),
        new_state,
    })
}

fn create_payroll_record(
    state: &State,
    employee: EmployeeId,
    period_start: Date,
    period_end: Date,
    earnings: Earnings,
    deductions: Deductions,
) -> Result<Outcome, CoreError> {
    if state
        .payroll_records
        .iter()
        .any(|r| r.employee == employee && r.period_start == period_start)
    {
        return Err(DomainError::DuplicatePayrollRecord {
            employee: employee.value().to_string(),
            period_start,
        }
        .into());
    }

    let record: PayrollRecord =
        PayrollRecord::new(employee, period_start, period_end, earnings, deductions)?;
    let mut new_state: State = state.clone();
    new_state.payroll_records.push(record.clone());

    Ok(Outcome {
        details: format!(
            "Created payroll for '{}' ({}..{}), net {}",
            record.employee,
            record.period_start,
            record.period_end,
            record.net_pay()
        ),
        entity: EntityRef::new("payroll_record", None),
        before: StateSnapshot::absent(),
        after: snapshot::payroll(&record),
        effect: Effect::Payroll(record),
        new_state,
    })
}

fn change_payroll_status(
    state: &State,
    payroll_id: i64,
    status: PayrollStatus,
    notes: Option<String>,
) -> Result<Outcome, CoreError> {
    let id_of = |r: &PayrollRecord| r.payroll_id;
    let current: &PayrollRecord = find(&state.payroll_records, "payroll record", payroll_id, id_of)?;
    let updated: PayrollRecord = current.transition(status, notes)?;

    let mut new_state: State = state.clone();
    new_state.payroll_records = replaced(&state.payroll_records, payroll_id, id_of, &updated);

    Ok(Outcome {
        details: format!(
            "Payroll {payroll_id} moved from {} to {}",
            current.status, status
        ),
        entity: EntityRef::new("payroll_record", Some(payroll_id)),
        before: snapshot::payroll(current),
        after: snapshot::payroll(&updated),
        effect: Effect::Payroll(updated),
        new_state,
    })
}

fn check_in(
    state: &State,
    employee: EmployeeId,
    at: OffsetDateTime,
    location: GeoPoint,
) -> Result<Outcome, CoreError> {
    let record: AttendanceRecord =
        AttendanceRecord::check_in(&state.attendance, employee, at, location)?;

    let mut new_state: State = state.clone();
    new_state.attendance.push(record.clone());

    Ok(Outcome {
        details: format!("'{}' checked in at {}", record.employee, record.check_in_at),
        entity: EntityRef::new("attendance", None),
        before: StateSnapshot::absent(),
        after: snapshot::attendance(&record),
        effect: Effect::Attendance(record),
        new_state,
    })
}

fn check_out(
    state: &State,
    employee: &EmployeeId,
    at: OffsetDateTime,
    location: GeoPoint,
) -> Result<Outcome, CoreError> {
    let current: &AttendanceRecord =
        open_record(&state.attendance, employee).ok_or_else(|| DomainError::NotCheckedIn {
            employee: employee.value().to_string(),
        })?;
    let updated: AttendanceRecord = current.check_out(at, location)?;

    let mut new_state: State = state.clone();
    // Closed records leave the working set.
    new_state.attendance = state
        .attendance
        .iter()
        .filter(|r| r != &current)
        .cloned()
        .collect();

    Ok(Outcome {
        details: format!(
            "'{employee}' checked out after {} minutes",
            updated.worked_minutes().unwrap_or_default()
        ),
        entity: EntityRef::new("attendance", current.attendance_id),
        before: snapshot::attendance(current),
        after: snapshot::attendance(&updated),
        effect: Effect::Attendance(updated),
        new_state,
    })
}
