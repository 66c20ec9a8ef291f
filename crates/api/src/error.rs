// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use fieldops::CoreError;
use fieldops_domain::DomainError;
use fieldops_persistence::PersistenceError;

use crate::csv_export::CsvExportError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<CsvExportError> for ApiError {
    fn from(err: CsvExportError) -> Self {
        Self::Internal {
            message: err.to_string(),
        }
    }
}

fn invalid(field: &str, message: String) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message,
    }
}

fn rule(rule: &str, message: String) -> ApiError {
    ApiError::DomainRuleViolation {
        rule: rule.to_string(),
        message,
    }
}

fn not_found(resource_type: &str, message: String) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: resource_type.to_string(),
        message,
    }
}

/// Translates a domain error into an API error.
///
/// Malformed values become `InvalidInput`, broken business rules become
/// `DomainRuleViolation`, and references to records that are not in the
/// tenant become `DomainRuleViolation` as well, since they arrive in the
/// request payload rather than the path.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidTenant(_) => invalid("tenant", message),
        DomainError::InvalidEmployeeId(_) => invalid("employee", message),
        DomainError::InvalidLocale(_) => invalid("locale", message),
        DomainError::InvalidAmount { .. } => invalid("amount", message),
        DomainError::NegativeAmount { field } => invalid(&field, message),
        DomainError::InvalidAccountCode(_) => invalid("code", message),
        DomainError::InvalidAccountName(_) => invalid("name_en", message),
        DomainError::InvalidAccountType(_) => invalid("account_type", message),
        DomainError::InvalidJournalReference(_) => invalid("reference", message),
        DomainError::InvalidStatus { .. } => invalid("status", message),
        DomainError::InvalidProjectTitle(_) => invalid("title", message),
        DomainError::DateParseError { .. } => invalid("date", message),
        DomainError::InvalidRequestType(_) => invalid("request_type", message),
        DomainError::InvalidDescription(_) => invalid("description", message),
        DomainError::InvalidCoordinates(_) => invalid("location", message),
        DomainError::DuplicateAccountCode { .. } => rule("unique_account_code", message),
        DomainError::AccountNotFound(_) => rule("account_exists", message),
        DomainError::ParentAccountNotFound(_) => rule("parent_account_exists", message),
        DomainError::ParentAccountTypeMismatch { .. } => rule("parent_account_type", message),
        DomainError::EmptyJournalEntry
        | DomainError::JournalLineBothSides { .. }
        | DomainError::JournalLineEmpty { .. } => rule("journal_line_shape", message),
        DomainError::UnbalancedJournalEntry { .. } => rule("balanced_journal_entry", message),
        DomainError::InvalidStatusTransition { .. } => rule("status_transition", message),
        DomainError::NotesRequired { .. } => rule("notes_required", message),
        DomainError::ReplyRequired => rule("reply_required", message),
        DomainError::ProjectNotFound(_) => rule("project_exists", message),
        DomainError::ProjectClosed { .. } => rule("project_accepts_work", message),
        DomainError::InvalidDateRange { .. } => rule("date_range", message),
        DomainError::DuplicateAssignment { .. } => rule("unique_assignment", message),
        DomainError::NegativeNetPay { .. } => rule("non_negative_net_pay", message),
        DomainError::DuplicatePayrollRecord { .. } => rule("unique_payroll_period", message),
        DomainError::AlreadyCheckedIn { .. } => rule("single_open_attendance", message),
        DomainError::NotCheckedIn { .. } => rule("open_attendance_exists", message),
        DomainError::CheckOutBeforeCheckIn => rule("check_out_after_check_in", message),
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::EntityNotFound { entity, id } => {
            not_found(entity, format!("{entity} {id} does not exist"))
        }
    }
}

/// Translates a persistence error into an API error.
///
/// Missing rows surface as `ResourceNotFound`; everything else is internal.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => not_found("Record", message),
        PersistenceError::EventNotFound(event_id) => {
            not_found("Audit event", format!("Audit event {event_id} does not exist"))
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
