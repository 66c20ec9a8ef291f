// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `ledger`: Accounts, journal entries and journal status
//! - `workflow`: Projects, task assignments and requests
//! - `workforce`: Payroll records and attendance
//! - `audit`: Audit event persistence
//! - `transition`: `persist_transition`, which writes one effect and its
//!   audit event atomically
//!
//! Ids come from `PersistenceBackend::get_last_insert_rowid`; everything
//! else is Diesel DSL.

pub mod audit;
pub mod ledger;
pub mod transition;
pub mod workflow;
pub mod workforce;

pub use transition::{PersistTransitionResult, persist_transition};

use crate::error::PersistenceError;

/// Turns an update that matched no row into `PersistenceError::NotFound`.
pub fn ensure_updated(
    affected: usize,
    entity: &str,
    id: i64,
) -> Result<(), PersistenceError> {
    if affected == 0 {
        return Err(PersistenceError::NotFound(format!("{entity} {id}")));
    }
    Ok(())
}
