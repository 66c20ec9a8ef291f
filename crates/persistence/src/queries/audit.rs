// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event and timeline queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops_audit::AuditEvent;
use fieldops_domain::TenantId;

use crate::data_models::AuditEventRow;
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

/// Retrieves one of the tenant's audit events by id.
///
/// # Errors
///
/// Returns `PersistenceError::EventNotFound` if the tenant has no event with
/// this id, or an error if the stored JSON cannot be deserialized.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::tenant.eq(tenant.value()))
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first::<AuditEventRow>(conn)
        .optional()?
        .ok_or(PersistenceError::EventNotFound(event_id))?;

    AuditEvent::try_from(row)
}

/// Retrieves the tenant's audit timeline in event order.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_audit_timeline(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::tenant.eq(tenant.value()))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEvent::try_from)
        .collect()
}

/// Audit events touching one record, in event order.
///
/// # Errors
///
/// Returns an error if the query fails or an event cannot be deserialized.
pub fn get_entity_history(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    entity_kind: &str,
    entity_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    audit_events::table
        .filter(audit_events::tenant.eq(tenant.value()))
        .filter(audit_events::entity_kind.eq(entity_kind))
        .filter(audit_events::entity_id.eq(entity_id))
        .order(audit_events::event_id.asc())
        .select(AuditEventRow::as_select())
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(AuditEvent::try_from)
        .collect()
}
