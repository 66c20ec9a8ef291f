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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod assignment;
mod attendance;
mod chart;
mod error;
mod journal;
mod ledger;
mod money;
mod payroll;
mod project;
mod request;
mod status;
mod trial_balance;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use assignment::{TaskAssignment, TaskAssignmentStatus, TechnicianWorkload, compute_workload};
pub use attendance::{AttendanceRecord, GeoPoint, open_record};
pub use chart::{AccountNode, build_account_tree, validate_new_account};
pub use journal::{
    JournalEntry, JournalHeader, JournalLine, JournalStatus, JournalTotals, is_balanced,
    validate_journal_draft,
};
pub use ledger::{
    LedgerLine, LedgerRange, LedgerReport, Posting, RunningLine, accumulate, balance_as_of,
};
pub use payroll::{Deductions, Earnings, PayrollRecord, PayrollStatus};
pub use project::{BudgetSummary, Project, ProjectStatus, summarize_budget};
pub use request::{Request, RequestStatus, RequestType};
pub use status::StatusLifecycle;
pub use trial_balance::{TrialBalance, TrialBalanceRow, compute_trial_balance};

// Re-export public types
pub use error::DomainError;
pub use money::{MINOR_UNITS_PER_MAJOR, Money};
pub use types::{
    Account, AccountType, EmployeeId, Locale, LocalizedName, NormalSide, TenantId,
};
pub use validation::{normalize_notes, parse_date, validate_date_range};
