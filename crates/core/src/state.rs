// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use fieldops_audit::AuditEvent;
use fieldops_domain::{
    Account, AttendanceRecord, JournalEntry, JournalHeader, JournalStatus, PayrollRecord, Project,
    Request, TaskAssignment, TenantId,
};

/// The state a command is validated against, scoped to a single tenant.
///
/// Journal entries are carried as headers only; their lines never change
/// after recording. Attendance holds the records still open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct State {
    pub tenant: TenantId,
    pub accounts: Vec<Account>,
    pub journal_entries: Vec<JournalHeader>,
    pub projects: Vec<Project>,
    pub assignments: Vec<TaskAssignment>,
    pub requests: Vec<Request>,
    pub payroll_records: Vec<PayrollRecord>,
    pub attendance: Vec<AttendanceRecord>,
}

impl State {
    /// Creates an empty state for a tenant.
    #[must_use]
    pub const fn new(tenant: TenantId) -> Self {
        Self {
            tenant,
            accounts: Vec::new(),
            journal_entries: Vec::new(),
            projects: Vec::new(),
            assignments: Vec::new(),
            requests: Vec::new(),
            payroll_records: Vec::new(),
            attendance: Vec::new(),
        }
    }

    #[must_use]
    pub fn account(&self, account_id: i64) -> Option<&Account> {
        self.accounts
            .iter()
            .find(|a| a.account_id == Some(account_id))
    }

    #[must_use]
    pub fn project(&self, project_id: i64) -> Option<&Project> {
        self.projects
            .iter()
            .find(|p| p.project_id == Some(project_id))
    }
}

/// The single logical write produced by a command.
///
/// Records whose id is `None` are inserted; records carrying an id replace
/// the stored row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Account(Account),
    /// A new journal header together with its lines.
    JournalEntry(JournalEntry),
    JournalStatus {
        entry_id: i64,
        status: JournalStatus,
    },
    Project(Project),
    Assignment(TaskAssignment),
    Request(Request),
    Payroll(PayrollRecord),
    Attendance(AttendanceRecord),
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
    /// What persistence must write.
    pub effect: Effect,
}
