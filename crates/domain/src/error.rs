// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::money::Money;
use crate::types::AccountType;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Tenant identifier is empty or invalid.
    InvalidTenant(String),
    /// Employee identifier is empty or invalid.
    InvalidEmployeeId(String),
    /// Locale code is not supported.
    InvalidLocale(String),
    /// An amount could not be parsed.
    InvalidAmount {
        /// The raw input that failed to parse.
        value: String,
    },
    /// An amount that must be zero or positive was negative.
    NegativeAmount {
        /// The field holding the negative amount.
        field: String,
    },
    /// Account code is empty or malformed.
    InvalidAccountCode(String),
    /// Account name is empty or malformed.
    InvalidAccountName(String),
    /// Account type string is not recognized.
    InvalidAccountType(String),
    /// Account code already exists for the tenant.
    DuplicateAccountCode {
        /// The duplicated code.
        code: String,
    },
    /// Account does not exist.
    AccountNotFound(i64),
    /// The referenced parent account does not exist.
    ParentAccountNotFound(i64),
    /// Parent and child accounts must share an account type.
    ParentAccountTypeMismatch {
        /// The parent's account type.
        parent: AccountType,
        /// The child's account type.
        child: AccountType,
    },
    /// A journal entry needs at least one line.
    EmptyJournalEntry,
    /// A journal line carries both a debit and a credit.
    JournalLineBothSides {
        /// The 1-based line number.
        line: usize,
    },
    /// A journal line carries neither a debit nor a credit.
    JournalLineEmpty {
        /// The 1-based line number.
        line: usize,
    },
    /// Total debits and credits differ, or both are zero.
    UnbalancedJournalEntry {
        /// Sum of all debits.
        total_debit: Money,
        /// Sum of all credits.
        total_credit: Money,
    },
    /// Journal reference is empty.
    InvalidJournalReference(String),
    /// Status string is not recognized for the entity.
    InvalidStatus {
        /// The entity the status belongs to.
        entity: &'static str,
        /// The unrecognized status.
        status: String,
    },
    /// Status transition is not permitted by the lifecycle table.
    InvalidStatusTransition {
        /// The entity being transitioned.
        entity: &'static str,
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The target status requires explanatory notes.
    NotesRequired {
        /// The entity being transitioned.
        entity: &'static str,
        /// The status that requires notes.
        status: String,
    },
    /// Project title is empty.
    InvalidProjectTitle(String),
    /// Project does not exist.
    ProjectNotFound(i64),
    /// Project no longer accepts assignments or requests.
    ProjectClosed {
        /// The project identifier.
        project_id: i64,
        /// The project's current status.
        status: String,
    },
    /// A date range ends before it starts.
    InvalidDateRange {
        /// Start of the range.
        start: time::Date,
        /// End of the range.
        end: time::Date,
    },
    /// Failed to parse date from string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Technician is already assigned to the project.
    DuplicateAssignment {
        /// The project identifier.
        project_id: i64,
        /// The technician.
        technician: String,
    },
    /// Request type string is not recognized.
    InvalidRequestType(String),
    /// Free-text description is empty.
    InvalidDescription(String),
    /// A clarification reply must not be empty.
    ReplyRequired,
    /// Payroll deductions exceed gross earnings.
    NegativeNetPay {
        /// Gross earnings.
        gross: Money,
        /// Total deductions.
        deductions: Money,
    },
    /// Payroll record already exists for the employee and period.
    DuplicatePayrollRecord {
        /// The employee.
        employee: String,
        /// Start of the pay period.
        period_start: time::Date,
    },
    /// Coordinates are outside the valid range.
    InvalidCoordinates(String),
    /// Employee already has an open attendance record.
    AlreadyCheckedIn {
        /// The employee.
        employee: String,
    },
    /// Employee has no open attendance record.
    NotCheckedIn {
        /// The employee.
        employee: String,
    },
    /// Check-out time precedes check-in time.
    CheckOutBeforeCheckIn,
}

impl std::fmt::Display for DomainError {
    #[allow(clippy::too_many_lines)]
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTenant(msg) => write!(f, "Invalid tenant: {msg}"),
            Self::InvalidEmployeeId(msg) => write!(f, "Invalid employee id: {msg}"),
            Self::InvalidLocale(locale) => {
                write!(f, "Invalid locale '{locale}'. Must be 'en' or 'ar'")
            }
            Self::InvalidAmount { value } => write!(f, "Invalid amount: '{value}'"),
            Self::NegativeAmount { field } => {
                write!(f, "Amount for '{field}' must not be negative")
            }
            Self::InvalidAccountCode(msg) => write!(f, "Invalid account code: {msg}"),
            Self::InvalidAccountName(msg) => write!(f, "Invalid account name: {msg}"),
            Self::InvalidAccountType(value) => write!(f, "Invalid account type: '{value}'"),
            Self::DuplicateAccountCode { code } => {
                write!(f, "Account with code '{code}' already exists")
            }
            Self::AccountNotFound(id) => write!(f, "Account {id} not found"),
            Self::ParentAccountNotFound(id) => write!(f, "Parent account {id} not found"),
            Self::ParentAccountTypeMismatch { parent, child } => {
                write!(
                    f,
                    "Account of type {child} cannot be placed under a {parent} account"
                )
            }
            Self::EmptyJournalEntry => write!(f, "Journal entry must have at least one line"),
            Self::JournalLineBothSides { line } => {
                write!(f, "Journal line {line} has both a debit and a credit")
            }
            Self::JournalLineEmpty { line } => {
                write!(f, "Journal line {line} has neither a debit nor a credit")
            }
            Self::UnbalancedJournalEntry {
                total_debit,
                total_credit,
            } => {
                write!(
                    f,
                    "Journal entry is not balanced: debits {total_debit}, credits {total_credit}"
                )
            }
            Self::InvalidJournalReference(msg) => write!(f, "Invalid journal reference: {msg}"),
            Self::InvalidStatus { entity, status } => {
                write!(f, "Invalid {entity} status: '{status}'")
            }
            Self::InvalidStatusTransition { entity, from, to } => {
                write!(f, "Cannot transition {entity} from '{from}' to '{to}'")
            }
            Self::NotesRequired { entity, status } => {
                write!(f, "Moving a {entity} to '{status}' requires notes")
            }
            Self::InvalidProjectTitle(msg) => write!(f, "Invalid project title: {msg}"),
            Self::ProjectNotFound(id) => write!(f, "Project {id} not found"),
            Self::ProjectClosed { project_id, status } => {
                write!(f, "Project {project_id} is {status} and accepts no new work")
            }
            Self::InvalidDateRange { start, end } => {
                write!(f, "Date range end {end} is before start {start}")
            }
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DuplicateAssignment {
                project_id,
                technician,
            } => {
                write!(
                    f,
                    "Technician '{technician}' is already assigned to project {project_id}"
                )
            }
            Self::InvalidRequestType(value) => write!(f, "Invalid request type: '{value}'"),
            Self::InvalidDescription(msg) => write!(f, "Invalid description: {msg}"),
            Self::ReplyRequired => write!(f, "Clarification reply must not be empty"),
            Self::NegativeNetPay { gross, deductions } => {
                write!(
                    f,
                    "Deductions {deductions} exceed gross earnings {gross}"
                )
            }
            Self::DuplicatePayrollRecord {
                employee,
                period_start,
            } => {
                write!(
                    f,
                    "Payroll record for '{employee}' starting {period_start} already exists"
                )
            }
            Self::InvalidCoordinates(msg) => write!(f, "Invalid coordinates: {msg}"),
            Self::AlreadyCheckedIn { employee } => {
                write!(f, "Employee '{employee}' is already checked in")
            }
            Self::NotCheckedIn { employee } => {
                write!(f, "Employee '{employee}' is not checked in")
            }
            Self::CheckOutBeforeCheckIn => write!(f, "Check-out time precedes check-in time"),
        }
    }
}

impl std::error::Error for DomainError {}
