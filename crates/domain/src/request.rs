// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Employee requests (material, custody, expense, leave, manpower, other).
//!
//! Requests move through a two-stage approval: a manager approves first, then
//! final approval follows. Either stage may reject or ask for clarification.
//! A clarification is answered by the requester, which returns the request
//! to `pending`.

use crate::error::DomainError;
use crate::money::Money;
use crate::status::{StatusLifecycle, status_text};
use crate::types::EmployeeId;
use crate::validation::normalize_notes;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Material,
    Custody,
    Expense,
    Leave,
    Manpower,
    Other,
}

impl RequestType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Material => "material",
            Self::Custody => "custody",
            Self::Expense => "expense",
            Self::Leave => "leave",
            Self::Manpower => "manpower",
            Self::Other => "other",
        }
    }
}

impl FromStr for RequestType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "material" => Ok(Self::Material),
            "custody" => Ok(Self::Custody),
            "expense" => Ok(Self::Expense),
            "leave" => Ok(Self::Leave),
            "manpower" => Ok(Self::Manpower),
            "other" => Ok(Self::Other),
            _ => Err(DomainError::InvalidRequestType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RequestType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    ManagerApproved,
    Approved,
    Rejected,
    NeedsClarification,
}

impl RequestStatus {
    /// Statuses that must carry reviewer notes.
    #[must_use]
    pub const fn requires_notes(&self) -> bool {
        matches!(self, Self::Rejected | Self::NeedsClarification)
    }
}

impl StatusLifecycle for RequestStatus {
    const ENTITY: &'static str = "request";
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::ManagerApproved,
        Self::Approved,
        Self::Rejected,
        Self::NeedsClarification,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ManagerApproved => "manager_approved",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::NeedsClarification => "needs_clarification",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::ManagerApproved, Self::Rejected, Self::NeedsClarification],
            Self::ManagerApproved => &[Self::Approved, Self::Rejected, Self::NeedsClarification],
            Self::NeedsClarification => &[Self::Pending],
            Self::Approved | Self::Rejected => &[],
        }
    }
}

status_text!(RequestStatus);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// Assigned by the database; `None` until persisted.
    pub request_id: Option<i64>,
    pub request_type: RequestType,
    pub requester: EmployeeId,
    pub project_id: Option<i64>,
    /// Monetary value for material and expense style requests.
    pub amount: Option<Money>,
    pub description: String,
    pub status: RequestStatus,
    pub review_notes: Option<String>,
    pub reply: Option<String>,
    pub reviewed_by: Option<String>,
    pub submitted_on: Date,
}

impl Request {
    /// Creates a pending request.
    ///
    /// # Errors
    ///
    /// Returns an error if the description is blank or the amount is negative.
    pub fn new(
        request_type: RequestType,
        requester: EmployeeId,
        project_id: Option<i64>,
        amount: Option<Money>,
        description: &str,
        submitted_on: Date,
    ) -> Result<Self, DomainError> {
        let description: &str = description.trim();
        if description.is_empty() {
            return Err(DomainError::InvalidDescription(String::from(
                "Description cannot be empty",
            )));
        }
        if amount.is_some_and(Money::is_negative) {
            return Err(DomainError::NegativeAmount {
                field: String::from("amount"),
            });
        }

        Ok(Self {
            request_id: None,
            request_type,
            requester,
            project_id,
            amount,
            description: description.to_string(),
            status: RequestStatus::Pending,
            review_notes: None,
            reply: None,
            reviewed_by: None,
            submitted_on,
        })
    }

    /// Applies a reviewer decision.
    ///
    /// Returning a request to `pending` is reserved for the requester's reply.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not permitted or if a rejection
    /// or clarification request carries no notes.
    pub fn review(
        &self,
        decision: RequestStatus,
        notes: Option<String>,
        reviewer: &str,
    ) -> Result<Self, DomainError> {
        if decision == RequestStatus::Pending {
            return Err(DomainError::InvalidStatusTransition {
                entity: RequestStatus::ENTITY,
                from: self.status.as_str().to_string(),
                to: decision.as_str().to_string(),
            });
        }
        self.status.validate_transition(decision)?;

        let notes: Option<String> = normalize_notes(notes);
        if decision.requires_notes() && notes.is_none() {
            return Err(DomainError::NotesRequired {
                entity: RequestStatus::ENTITY,
                status: decision.as_str().to_string(),
            });
        }

        Ok(Self {
            status: decision,
            review_notes: notes.or_else(|| self.review_notes.clone()),
            reviewed_by: Some(reviewer.to_string()),
            ..self.clone()
        })
    }

    /// Answers a clarification request and resubmits.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is not awaiting clarification or the
    /// reply is blank.
    pub fn reply(&self, reply: &str) -> Result<Self, DomainError> {
        if self.status != RequestStatus::NeedsClarification {
            return Err(DomainError::InvalidStatusTransition {
                entity: RequestStatus::ENTITY,
                from: self.status.as_str().to_string(),
                to: RequestStatus::Pending.as_str().to_string(),
            });
        }
        let reply: &str = reply.trim();
        if reply.is_empty() {
            return Err(DomainError::ReplyRequired);
        }
        Ok(Self {
            status: RequestStatus::Pending,
            reply: Some(reply.to_string()),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions_from_pending() {
        let current = RequestStatus::Pending;

        assert!(
            current
                .validate_transition(RequestStatus::ManagerApproved)
                .is_ok()
        );
        assert!(current.validate_transition(RequestStatus::Rejected).is_ok());
        assert!(
            current
                .validate_transition(RequestStatus::NeedsClarification)
                .is_ok()
        );
        assert!(current.validate_transition(RequestStatus::Approved).is_err());
    }

    #[test]
    fn test_valid_transitions_from_manager_approved() {
        let current = RequestStatus::ManagerApproved;

        assert!(current.validate_transition(RequestStatus::Approved).is_ok());
        assert!(current.validate_transition(RequestStatus::Rejected).is_ok());
        assert!(current.validate_transition(RequestStatus::Pending).is_err());
    }

    #[test]
    fn test_clarification_only_returns_to_pending() {
        let current = RequestStatus::NeedsClarification;

        assert!(current.validate_transition(RequestStatus::Pending).is_ok());
        assert!(current.validate_transition(RequestStatus::Approved).is_err());
        assert!(
            current
                .validate_transition(RequestStatus::ManagerApproved)
                .is_err()
        );
    }

    #[test]
    fn test_terminal_states() {
        assert!(RequestStatus::Approved.is_terminal());
        assert!(RequestStatus::Rejected.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
        assert!(!RequestStatus::NeedsClarification.is_terminal());
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in RequestStatus::ALL {
            match status.as_str().parse::<RequestStatus>() {
                Ok(parsed) => assert_eq!(*status, parsed),
                Err(e) => panic!("Failed to parse status string: {status}: {e}"),
            }
        }
        assert!("manager-approved".parse::<RequestStatus>().is_err());
    }

    #[test]
    fn test_request_type_parsing_is_case_insensitive() {
        assert_eq!("Expense".parse::<RequestType>(), Ok(RequestType::Expense));
        assert_eq!("MANPOWER".parse::<RequestType>(), Ok(RequestType::Manpower));
        assert!("vehicle".parse::<RequestType>().is_err());
    }
}
