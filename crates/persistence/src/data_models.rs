// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row types read from the database and their conversion into domain values.
//!
//! Stored status and type strings go back through the domain parsers, so a
//! row holding a value the domain does not know about fails to load instead
//! of being silently coerced.

use diesel::prelude::*;
use fieldops_audit::{Action, Actor, AuditEvent, Cause, EntityRef, StateSnapshot};
use fieldops_domain::{
    Account, AccountType, AttendanceRecord, Deductions, Earnings, EmployeeId, GeoPoint,
    JournalEntry, JournalHeader, JournalLine, JournalStatus, LedgerLine, LocalizedName, Money,
    PayrollRecord, PayrollStatus, Project, ProjectStatus, Request, RequestStatus, RequestType,
    TaskAssignment, TaskAssignmentStatus, TenantId, parse_date,
};
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{
    accounts, attendance_records, audit_events, journal_entries, journal_lines, payroll_records,
    projects, requests, task_assignments,
};
use crate::error::PersistenceError;

/// Formats a calendar date for a TEXT column (`YYYY-MM-DD`).
#[must_use]
pub fn format_date(date: Date) -> String {
    date.to_string()
}

/// Formats a timestamp for a TEXT column (RFC 3339).
///
/// # Errors
///
/// Returns an error if the timestamp cannot be represented in RFC 3339.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("Invalid timestamp '{value}': {e}"))
    })
}

fn parse_optional_date(value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    Ok(value.map(parse_date).transpose()?)
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = accounts)]
pub struct AccountRow {
    pub account_id: i64,
    pub code: String,
    pub name_en: String,
    pub name_ar: Option<String>,
    pub account_type: String,
    pub parent_id: Option<i64>,
}

impl TryFrom<AccountRow> for Account {
    type Error = PersistenceError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        let account_type: AccountType = row.account_type.parse()?;
        Ok(Self::new(
            &row.code,
            LocalizedName::new(&row.name_en, row.name_ar.as_deref()),
            account_type,
            row.parent_id,
        )
        .with_id(row.account_id))
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = journal_entries)]
pub struct JournalEntryRow {
    pub entry_id: i64,
    pub entry_date: String,
    pub reference: String,
    pub description: String,
    pub status: String,
}

impl TryFrom<JournalEntryRow> for JournalHeader {
    type Error = PersistenceError;

    fn try_from(row: JournalEntryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            entry_id: Some(row.entry_id),
            entry_date: parse_date(&row.entry_date)?,
            reference: row.reference,
            status: row.status.parse::<JournalStatus>()?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = journal_lines)]
pub struct JournalLineRow {
    pub line_id: i64,
    pub entry_id: i64,
    pub account_id: i64,
    pub debit: i64,
    pub credit: i64,
    pub memo: Option<String>,
}

impl From<JournalLineRow> for JournalLine {
    fn from(row: JournalLineRow) -> Self {
        Self {
            line_id: Some(row.line_id),
            account_id: row.account_id,
            debit: Money::from_minor(row.debit),
            credit: Money::from_minor(row.credit),
            memo: row.memo,
        }
    }
}

/// Joins a header row with its lines (already in `line_id` order).
///
/// Stored entries are not revalidated: a voided entry is still readable.
///
/// # Errors
///
/// Returns an error if the date or status column is malformed.
pub fn assemble_journal_entry(
    row: JournalEntryRow,
    lines: Vec<JournalLineRow>,
) -> Result<JournalEntry, PersistenceError> {
    Ok(JournalEntry {
        entry_id: Some(row.entry_id),
        entry_date: parse_date(&row.entry_date)?,
        reference: row.reference,
        description: row.description,
        status: row.status.parse::<JournalStatus>()?,
        lines: lines.into_iter().map(JournalLine::from).collect(),
    })
}

/// One posted journal line joined with its header, as selected for the ledger.
#[derive(Debug, Queryable)]
pub struct LedgerLineRow {
    pub account_id: i64,
    pub entry_id: i64,
    pub entry_date: String,
    pub reference: String,
    pub description: String,
    pub debit: i64,
    pub credit: i64,
}

impl TryFrom<LedgerLineRow> for LedgerLine {
    type Error = PersistenceError;

    fn try_from(row: LedgerLineRow) -> Result<Self, Self::Error> {
        Ok(Self {
            date: parse_date(&row.entry_date)?,
            debit: Money::from_minor(row.debit),
            credit: Money::from_minor(row.credit),
            entry_id: Some(row.entry_id),
            reference: row.reference,
            description: row.description,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = projects)]
pub struct ProjectRow {
    pub project_id: i64,
    pub title: String,
    pub manager: String,
    pub location: String,
    pub budget: i64,
    pub status: String,
    pub start_date: String,
    pub end_date: Option<String>,
}

impl TryFrom<ProjectRow> for Project {
    type Error = PersistenceError;

    fn try_from(row: ProjectRow) -> Result<Self, Self::Error> {
        Ok(Self {
            project_id: Some(row.project_id),
            title: row.title,
            manager: EmployeeId::new(&row.manager)?,
            location: row.location,
            budget: Money::from_minor(row.budget),
            status: row.status.parse::<ProjectStatus>()?,
            start_date: parse_date(&row.start_date)?,
            end_date: parse_optional_date(row.end_date.as_deref())?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = task_assignments)]
pub struct TaskAssignmentRow {
    pub assignment_id: i64,
    pub project_id: i64,
    pub technician: String,
    pub status: String,
    pub notes: Option<String>,
}

impl TryFrom<TaskAssignmentRow> for TaskAssignment {
    type Error = PersistenceError;

    fn try_from(row: TaskAssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            assignment_id: Some(row.assignment_id),
            project_id: row.project_id,
            technician: EmployeeId::new(&row.technician)?,
            status: row.status.parse::<TaskAssignmentStatus>()?,
            notes: row.notes,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = requests)]
pub struct RequestRow {
    pub request_id: i64,
    pub request_type: String,
    pub requester: String,
    pub project_id: Option<i64>,
    pub amount: Option<i64>,
    pub description: String,
    pub status: String,
    pub review_notes: Option<String>,
    pub reply: Option<String>,
    pub reviewed_by: Option<String>,
    pub submitted_on: String,
}

impl TryFrom<RequestRow> for Request {
    type Error = PersistenceError;

    fn try_from(row: RequestRow) -> Result<Self, Self::Error> {
        Ok(Self {
            request_id: Some(row.request_id),
            request_type: row.request_type.parse::<RequestType>()?,
            requester: EmployeeId::new(&row.requester)?,
            project_id: row.project_id,
            amount: row.amount.map(Money::from_minor),
            description: row.description,
            status: row.status.parse::<RequestStatus>()?,
            review_notes: row.review_notes,
            reply: row.reply,
            reviewed_by: row.reviewed_by,
            submitted_on: parse_date(&row.submitted_on)?,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = payroll_records)]
pub struct PayrollRow {
    pub payroll_id: i64,
    pub employee: String,
    pub period_start: String,
    pub period_end: String,
    pub basic: i64,
    pub housing: i64,
    pub transport: i64,
    pub overtime: i64,
    pub other_earnings: i64,
    pub social_insurance: i64,
    pub tax: i64,
    pub loans: i64,
    pub absence: i64,
    pub other_deductions: i64,
    pub status: String,
    pub notes: Option<String>,
}

impl TryFrom<PayrollRow> for PayrollRecord {
    type Error = PersistenceError;

    fn try_from(row: PayrollRow) -> Result<Self, Self::Error> {
        Ok(Self {
            payroll_id: Some(row.payroll_id),
            employee: EmployeeId::new(&row.employee)?,
            period_start: parse_date(&row.period_start)?,
            period_end: parse_date(&row.period_end)?,
            earnings: Earnings {
                basic: Money::from_minor(row.basic),
                housing: Money::from_minor(row.housing),
                transport: Money::from_minor(row.transport),
                overtime: Money::from_minor(row.overtime),
                other: Money::from_minor(row.other_earnings),
            },
            deductions: Deductions {
                social_insurance: Money::from_minor(row.social_insurance),
                tax: Money::from_minor(row.tax),
                loans: Money::from_minor(row.loans),
                absence: Money::from_minor(row.absence),
                other: Money::from_minor(row.other_deductions),
            },
            status: row.status.parse::<PayrollStatus>()?,
            notes: row.notes,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = attendance_records)]
pub struct AttendanceRow {
    pub attendance_id: i64,
    pub employee: String,
    pub check_in_at: String,
    pub check_in_latitude: i32,
    pub check_in_longitude: i32,
    pub check_out_at: Option<String>,
    pub check_out_latitude: Option<i32>,
    pub check_out_longitude: Option<i32>,
}

impl TryFrom<AttendanceRow> for AttendanceRecord {
    type Error = PersistenceError;

    fn try_from(row: AttendanceRow) -> Result<Self, Self::Error> {
        let check_out_location: Option<GeoPoint> =
            match (row.check_out_latitude, row.check_out_longitude) {
                (Some(latitude), Some(longitude)) => Some(GeoPoint::from_micro(latitude, longitude)?),
                (None, None) => None,
                _ => {
                    return Err(PersistenceError::ReconstructionError(format!(
                        "Attendance {} has a partial check-out location",
                        row.attendance_id
                    )));
                }
            };

        Ok(Self {
            attendance_id: Some(row.attendance_id),
            employee: EmployeeId::new(&row.employee)?,
            check_in_at: parse_timestamp(&row.check_in_at)?,
            check_in_location: GeoPoint::from_micro(
                row.check_in_latitude,
                row.check_in_longitude,
            )?,
            check_out_at: row.check_out_at.as_deref().map(parse_timestamp).transpose()?,
            check_out_location,
        })
    }
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = audit_events)]
pub struct AuditEventRow {
    pub event_id: i64,
    pub tenant: String,
    pub entity_kind: String,
    pub entity_id: Option<i64>,
    pub actor_json: String,
    pub cause_json: String,
    pub action_json: String,
    pub before_snapshot_json: String,
    pub after_snapshot_json: String,
    pub created_at: String,
}

impl TryFrom<AuditEventRow> for AuditEvent {
    type Error = PersistenceError;

    fn try_from(row: AuditEventRow) -> Result<Self, Self::Error> {
        let actor: Actor = serde_json::from_str(&row.actor_json)?;
        let cause: Cause = serde_json::from_str(&row.cause_json)?;
        let action: Action = serde_json::from_str(&row.action_json)?;
        let before: StateSnapshot = serde_json::from_str(&row.before_snapshot_json)?;
        let after: StateSnapshot = serde_json::from_str(&row.after_snapshot_json)?;

        Ok(Self::new(
            TenantId::new(&row.tenant)?,
            EntityRef::new(&row.entity_kind, row.entity_id),
            actor,
            cause,
            action,
            before,
            after,
        )
        .persisted(row.event_id, parse_timestamp(&row.created_at)?))
    }
}
