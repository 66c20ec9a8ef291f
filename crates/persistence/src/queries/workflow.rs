// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Project, task assignment and request queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use fieldops_domain::{Project, Request, TaskAssignment, TenantId};

use crate::data_models::{ProjectRow, RequestRow, TaskAssignmentRow};
use crate::diesel_schema::{projects, requests, task_assignments};
use crate::error::PersistenceError;

/// Lists the tenant's projects in creation order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_projects(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<Project>, PersistenceError> {
    projects::table
        .filter(projects::tenant.eq(tenant.value()))
        .order(projects::project_id.asc())
        .select(ProjectRow::as_select())
        .load::<ProjectRow>(conn)?
        .into_iter()
        .map(Project::try_from)
        .collect()
}

/// Lists task assignments, optionally limited to one project.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_assignments(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    project_id: Option<i64>,
) -> Result<Vec<TaskAssignment>, PersistenceError> {
    let mut query = task_assignments::table
        .filter(task_assignments::tenant.eq(tenant.value()))
        .order(task_assignments::assignment_id.asc())
        .select(TaskAssignmentRow::as_select())
        .into_boxed::<Sqlite>();

    if let Some(project_id) = project_id {
        query = query.filter(task_assignments::project_id.eq(project_id));
    }

    query
        .load::<TaskAssignmentRow>(conn)?
        .into_iter()
        .map(TaskAssignment::try_from)
        .collect()
}

/// Lists requests, newest submission first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_requests(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<Request>, PersistenceError> {
    requests::table
        .filter(requests::tenant.eq(tenant.value()))
        .order((requests::submitted_on.desc(), requests::request_id.desc()))
        .select(RequestRow::as_select())
        .load::<RequestRow>(conn)?
        .into_iter()
        .map(Request::try_from)
        .collect()
}
