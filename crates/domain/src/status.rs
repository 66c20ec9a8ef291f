// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shared status lifecycle behavior.
//!
//! Every workflow entity (requests, task assignments, payroll records,
//! journal entries, projects) carries a status enum with an explicit
//! transition table. Transitions not listed in the table are rejected;
//! a status field is never overwritten blindly.

use crate::error::DomainError;

/// A status enum governed by an explicit transition table.
pub trait StatusLifecycle: Copy + Eq + Sized + 'static {
    /// Entity name used in error messages (e.g. `"request"`).
    const ENTITY: &'static str;

    /// Every status, in declaration order.
    const ALL: &'static [Self];

    /// Returns the string representation used for persistence and the API.
    fn as_str(&self) -> &'static str;

    /// Returns the statuses reachable from this one in a single step.
    fn successors(&self) -> &'static [Self];

    /// Returns true if no transition leaves this status.
    fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    /// Returns true if the transition table contains `self -> target`.
    fn can_transition_to(&self, target: Self) -> bool {
        self.successors().contains(&target)
    }

    /// Validates a transition against the table.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatusTransition` if the transition is not
    /// listed.
    fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                entity: Self::ENTITY,
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStatus` if the string is unknown.
    fn parse_status(s: &str) -> Result<Self, DomainError> {
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::InvalidStatus {
                entity: Self::ENTITY,
                status: s.to_string(),
            })
    }
}

/// Implements `Display` and `FromStr` for a `StatusLifecycle` enum.
macro_rules! status_text {
    ($status:ty) => {
        impl std::fmt::Display for $status {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::status::StatusLifecycle::as_str(self))
            }
        }

        impl std::str::FromStr for $status {
            type Err = $crate::error::DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <Self as $crate::status::StatusLifecycle>::parse_status(s)
            }
        }
    };
}

pub(crate) use status_text;
