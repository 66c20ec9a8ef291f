// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tenant state reconstruction for the command core.

use diesel::SqliteConnection;
use fieldops::State;
use fieldops_domain::TenantId;
use tracing::debug;

use crate::error::PersistenceError;
use crate::queries::ledger::{list_accounts, list_journal_headers};
use crate::queries::workflow::{list_assignments, list_projects, list_requests};
use crate::queries::workforce::{list_open_attendance, list_payroll_records};

/// Loads everything `apply` validates against for one tenant.
///
/// Journal entries are loaded as headers only, and attendance only as open
/// records; closed attendance never affects a command.
///
/// # Errors
///
/// Returns an error if any query fails or a row cannot be converted.
pub fn load_state(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<State, PersistenceError> {
    let state: State = State {
        tenant: tenant.clone(),
        accounts: list_accounts(conn, tenant)?,
        journal_entries: list_journal_headers(conn, tenant)?,
        projects: list_projects(conn, tenant)?,
        assignments: list_assignments(conn, tenant, None)?,
        requests: list_requests(conn, tenant)?,
        payroll_records: list_payroll_records(conn, tenant)?,
        attendance: list_open_attendance(conn, tenant)?,
    };

    debug!(
        tenant = %tenant,
        accounts = state.accounts.len(),
        journal_entries = state.journal_entries.len(),
        projects = state.projects.len(),
        "Loaded tenant state"
    );
    Ok(state)
}
