// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project, task assignment and request mutations.
//!
//! Each `save_*` function inserts when the record has no id yet and
//! otherwise rewrites the mutable columns of the existing row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops_domain::{Project, Request, StatusLifecycle, TaskAssignment, TenantId};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::format_date;
use crate::diesel_schema::{projects, requests, task_assignments};
use crate::error::PersistenceError;
use crate::mutations::ensure_updated;

/// Inserts or updates a project and returns its id.
///
/// # Errors
///
/// Returns an error if the statement fails or an update matches no row.
pub fn save_project(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    project: &Project,
) -> Result<i64, PersistenceError> {
    let columns = (
        projects::title.eq(&project.title),
        projects::manager.eq(project.manager.value()),
        projects::location.eq(&project.location),
        projects::budget.eq(project.budget.minor()),
        projects::status.eq(project.status.as_str()),
        projects::start_date.eq(format_date(project.start_date)),
        projects::end_date.eq(project.end_date.map(format_date)),
    );

    if let Some(project_id) = project.project_id {
        let affected: usize = diesel::update(
            projects::table
                .filter(projects::project_id.eq(project_id))
                .filter(projects::tenant.eq(tenant.value())),
        )
        .set(columns)
        .execute(conn)?;
        ensure_updated(affected, "project", project_id)?;
        debug!(project_id, status = %project.status, "Updated project");
        return Ok(project_id);
    }

    diesel::insert_into(projects::table)
        .values((projects::tenant.eq(tenant.value()), columns))
        .execute(conn)?;
    let project_id: i64 = conn.get_last_insert_rowid()?;
    debug!(project_id, title = %project.title, "Inserted project");
    Ok(project_id)
}

/// Inserts or updates a task assignment and returns its id.
///
/// # Errors
///
/// Returns an error if the statement fails or an update matches no row.
pub fn save_assignment(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    assignment: &TaskAssignment,
) -> Result<i64, PersistenceError> {
    if let Some(assignment_id) = assignment.assignment_id {
        let affected: usize = diesel::update(
            task_assignments::table
                .filter(task_assignments::assignment_id.eq(assignment_id))
                .filter(task_assignments::tenant.eq(tenant.value())),
        )
        .set((
            task_assignments::status.eq(assignment.status.as_str()),
            task_assignments::notes.eq(assignment.notes.as_deref()),
        ))
        .execute(conn)?;
        ensure_updated(affected, "task assignment", assignment_id)?;
        debug!(assignment_id, status = %assignment.status, "Updated task assignment");
        return Ok(assignment_id);
    }

    diesel::insert_into(task_assignments::table)
        .values((
            task_assignments::tenant.eq(tenant.value()),
            task_assignments::project_id.eq(assignment.project_id),
            task_assignments::technician.eq(assignment.technician.value()),
            task_assignments::status.eq(assignment.status.as_str()),
            task_assignments::notes.eq(assignment.notes.as_deref()),
        ))
        .execute(conn)?;
    let assignment_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        assignment_id,
        project_id = assignment.project_id,
        technician = %assignment.technician,
        "Inserted task assignment"
    );
    Ok(assignment_id)
}

/// Inserts or updates a request and returns its id.
///
/// # Errors
///
/// Returns an error if the statement fails or an update matches no row.
pub fn save_request(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    request: &Request,
) -> Result<i64, PersistenceError> {
    if let Some(request_id) = request.request_id {
        let affected: usize = diesel::update(
            requests::table
                .filter(requests::request_id.eq(request_id))
                .filter(requests::tenant.eq(tenant.value())),
        )
        .set((
            requests::status.eq(request.status.as_str()),
            requests::review_notes.eq(request.review_notes.as_deref()),
            requests::reply.eq(request.reply.as_deref()),
            requests::reviewed_by.eq(request.reviewed_by.as_deref()),
        ))
        .execute(conn)?;
        ensure_updated(affected, "request", request_id)?;
        debug!(request_id, status = %request.status, "Updated request");
        return Ok(request_id);
    }

    diesel::insert_into(requests::table)
        .values((
            requests::tenant.eq(tenant.value()),
            requests::request_type.eq(request.request_type.as_str()),
            requests::requester.eq(request.requester.value()),
            requests::project_id.eq(request.project_id),
            requests::amount.eq(request.amount.map(fieldops_domain::Money::minor)),
            requests::description.eq(&request.description),
            requests::status.eq(request.status.as_str()),
            requests::submitted_on.eq(format_date(request.submitted_on)),
        ))
        .execute(conn)?;
    let request_id: i64 = conn.get_last_insert_rowid()?;
    debug!(request_id, request_type = %request.request_type, "Inserted request");
    Ok(request_id)
}
