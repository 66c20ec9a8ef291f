// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fieldops_domain::{
    AccountType, Deductions, Earnings, EmployeeId, GeoPoint, JournalLine, JournalStatus, Money,
    PayrollStatus, ProjectStatus, RequestStatus, RequestType, TaskAssignmentStatus,
};
use time::{Date, OffsetDateTime};

/// A command represents user or system intent as data only.
///
/// Commands are the only way to request state changes. Anything time
/// dependent (entry dates, submission dates, attendance timestamps) is
/// carried in the command so that applying it stays deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add an account to the chart of accounts.
    CreateAccount {
        code: String,
        name_en: String,
        name_ar: Option<String>,
        account_type: AccountType,
        parent_id: Option<i64>,
    },
    /// Record a balanced journal entry as a draft or directly as posted.
    RecordJournalEntry {
        entry_date: Date,
        reference: String,
        description: String,
        status: JournalStatus,
        lines: Vec<JournalLine>,
    },
    /// Post or void a journal entry.
    ChangeJournalStatus {
        entry_id: i64,
        status: JournalStatus,
    },
    CreateProject {
        title: String,
        manager: EmployeeId,
        location: String,
        budget: Money,
        start_date: Date,
        end_date: Option<Date>,
    },
    ChangeProjectStatus {
        project_id: i64,
        status: ProjectStatus,
    },
    /// Assign a technician to a project.
    AssignTechnician {
        project_id: i64,
        technician: EmployeeId,
    },
    /// Accept, reject, ask about, or complete an assignment.
    RespondToAssignment {
        assignment_id: i64,
        status: TaskAssignmentStatus,
        notes: Option<String>,
    },
    SubmitRequest {
        request_type: RequestType,
        requester: EmployeeId,
        project_id: Option<i64>,
        amount: Option<Money>,
        description: String,
        submitted_on: Date,
    },
    /// Record a reviewer decision. The reviewer is the acting actor.
    ReviewRequest {
        request_id: i64,
        decision: RequestStatus,
        notes: Option<String>,
    },
    /// Answer a clarification request and send the request back for review.
    ReplyToRequest {
        request_id: i64,
        reply: String,
    },
    CreatePayrollRecord {
        employee: EmployeeId,
        period_start: Date,
        period_end: Date,
        earnings: Earnings,
        deductions: Deductions,
    },
    ChangePayrollStatus {
        payroll_id: i64,
        status: PayrollStatus,
        notes: Option<String>,
    },
    CheckIn {
        employee: EmployeeId,
        at: OffsetDateTime,
        location: GeoPoint,
    },
    CheckOut {
        employee: EmployeeId,
        at: OffsetDateTime,
        location: GeoPoint,
    },
}

impl Command {
    /// The action name recorded in the audit trail.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CreateAccount { .. } => "CreateAccount",
            Self::RecordJournalEntry { .. } => "RecordJournalEntry",
            Self::ChangeJournalStatus { .. } => "ChangeJournalStatus",
            Self::CreateProject { .. } => "CreateProject",
            Self::ChangeProjectStatus { .. } => "ChangeProjectStatus",
            Self::AssignTechnician { .. } => "AssignTechnician",
            Self::RespondToAssignment { .. } => "RespondToAssignment",
            Self::SubmitRequest { .. } => "SubmitRequest",
            Self::ReviewRequest { .. } => "ReviewRequest",
            Self::ReplyToRequest { .. } => "ReplyToRequest",
            Self::CreatePayrollRecord { .. } => "CreatePayrollRecord",
            Self::ChangePayrollStatus { .. } => "ChangePayrollStatus",
            Self::CheckIn { .. } => "CheckIn",
            Self::CheckOut { .. } => "CheckOut",
        }
    }
}
