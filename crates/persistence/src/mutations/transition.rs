// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Transition orchestration.
//!
//! A `TransitionResult` carries exactly one `Effect` and one audit event.
//! Both are written in a single transaction: either the record change and
//! its audit trail are committed together, or nothing is.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops::{Effect, TransitionResult};
use fieldops_audit::AuditEvent;
use fieldops_domain::TenantId;
use time::OffsetDateTime;
use tracing::info;

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::ledger::{insert_account, insert_journal_entry, update_journal_status};
use crate::mutations::workflow::{save_assignment, save_project, save_request};
use crate::mutations::workforce::{save_attendance, save_payroll_record};

/// Outcome of persisting a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistTransitionResult {
    /// The id assigned to the audit event.
    pub event_id: i64,
    /// The id of the record the effect wrote.
    pub entity_id: i64,
    /// The audit event as stored, with its entity id, event id and timestamp.
    pub audit_event: AuditEvent,
}

/// Writes the effect of `result`, then its audit event, in one transaction.
///
/// # Errors
///
/// Returns an error if any statement fails. The transaction is rolled back,
/// so a journal entry whose lines cannot be written leaves no header.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<PersistTransitionResult, PersistenceError> {
    let persisted: PersistTransitionResult =
        conn.transaction::<_, PersistenceError, _>(|conn| {
            let tenant: &TenantId = &result.audit_event.tenant;
            let entity_id: i64 = apply_effect(conn, tenant, &result.effect)?;

            let event: AuditEvent = result.audit_event.clone().for_entity_id(entity_id);
            let (event_id, created_at): (i64, OffsetDateTime) = persist_audit_event(conn, &event)?;

            Ok(PersistTransitionResult {
                event_id,
                entity_id,
                audit_event: event.persisted(event_id, created_at),
            })
        })?;

    info!(
        event_id = persisted.event_id,
        entity_id = persisted.entity_id,
        action = %persisted.audit_event.action.name,
        tenant = %persisted.audit_event.tenant,
        "Persisted transition"
    );
    Ok(persisted)
}

fn apply_effect(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    effect: &Effect,
) -> Result<i64, PersistenceError> {
    match effect {
        Effect::Account(account) => insert_account(conn, tenant, account),
        Effect::JournalEntry(entry) => insert_journal_entry(conn, tenant, entry),
        Effect::JournalStatus { entry_id, status } => {
            update_journal_status(conn, tenant, *entry_id, *status)?;
            Ok(*entry_id)
        }
        Effect::Project(project) => save_project(conn, tenant, project),
        Effect::Assignment(assignment) => save_assignment(conn, tenant, assignment),
        Effect::Request(request) => save_request(conn, tenant, request),
        Effect::Payroll(record) => save_payroll_record(conn, tenant, record),
        Effect::Attendance(record) => save_attendance(conn, tenant, record),
    }
}
