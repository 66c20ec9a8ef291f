// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use fieldops::{State, TransitionResult};
use fieldops_audit::AuditEvent;
use fieldops_domain::{
    Account, AttendanceRecord, EmployeeId, JournalEntry, LedgerLine, Money, PayrollRecord,
    Project, Request, TaskAssignment, TenantId,
};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Date;

static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use mutations::PersistTransitionResult;

use backend::PersistenceBackend;

/// Persistence adapter over a single Diesel `SQLite` connection.
///
/// All access goes through `&mut self`; callers that share it across tasks
/// wrap it in a mutex.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared-cache database named from an atomic
    /// counter, so tests never observe each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:fieldops_mem_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database
    /// in WAL mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists the effect and audit event of a transition atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if persistence fails; nothing is written in that case.
    pub fn persist_transition(
        &mut self,
        result: &TransitionResult,
    ) -> Result<PersistTransitionResult, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Loads the tenant state the command core validates against.
    ///
    /// # Errors
    ///
    /// Returns an error if any query fails.
    pub fn load_state(&mut self, tenant: &TenantId) -> Result<State, PersistenceError> {
        queries::state::load_state(&mut self.conn, tenant)
    }

    // ========================================================================
    // Ledger
    // ========================================================================

    /// Lists the tenant's chart of accounts ordered by code.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_accounts(&mut self, tenant: &TenantId) -> Result<Vec<Account>, PersistenceError> {
        queries::ledger::list_accounts(&mut self.conn, tenant)
    }

    /// Retrieves one account.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the tenant has no such account.
    pub fn get_account(
        &mut self,
        tenant: &TenantId,
        account_id: i64,
    ) -> Result<Account, PersistenceError> {
        queries::ledger::get_account(&mut self.conn, tenant, account_id)
    }

    /// Normal-side balance of every account as of a date.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn account_balances(
        &mut self,
        tenant: &TenantId,
        as_of: Option<Date>,
    ) -> Result<HashMap<i64, Money>, PersistenceError> {
        queries::ledger::account_balances(&mut self.conn, tenant, as_of)
    }

    /// Lists journal entries with their lines.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn list_journal_entries(
        &mut self,
        tenant: &TenantId,
    ) -> Result<Vec<JournalEntry>, PersistenceError> {
        queries::ledger::list_journal_entries(&mut self.conn, tenant)
    }

    /// Retrieves one journal entry with its lines.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the tenant has no such entry.
    pub fn get_journal_entry(
        &mut self,
        tenant: &TenantId,
        entry_id: i64,
    ) -> Result<JournalEntry, PersistenceError> {
        queries::ledger::get_journal_entry(&mut self.conn, tenant, entry_id)
    }

    /// Posted ledger lines of one account ordered by
    /// `(entry_date, entry_id, line_id)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn ledger_lines(
        &mut self,
        tenant: &TenantId,
        account_id: i64,
    ) -> Result<Vec<LedgerLine>, PersistenceError> {
        queries::ledger::ledger_lines_for_account(&mut self.conn, tenant, account_id)
    }

    /// Posted ledger lines for all accounts, keyed by account id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn posted_lines_by_account(
        &mut self,
        tenant: &TenantId,
    ) -> Result<HashMap<i64, Vec<LedgerLine>>, PersistenceError> {
        queries::ledger::posted_lines_by_account(&mut self.conn, tenant)
    }

    // ========================================================================
    // Workflow
    // ========================================================================

    /// Lists the tenant's projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_projects(&mut self, tenant: &TenantId) -> Result<Vec<Project>, PersistenceError> {
        queries::workflow::list_projects(&mut self.conn, tenant)
    }

    /// Lists task assignments, optionally for one project.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_assignments(
        &mut self,
        tenant: &TenantId,
        project_id: Option<i64>,
    ) -> Result<Vec<TaskAssignment>, PersistenceError> {
        queries::workflow::list_assignments(&mut self.conn, tenant, project_id)
    }

    /// Lists requests, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_requests(&mut self, tenant: &TenantId) -> Result<Vec<Request>, PersistenceError> {
        queries::workflow::list_requests(&mut self.conn, tenant)
    }

    // ========================================================================
    // Workforce
    // ========================================================================

    /// Lists payroll records, most recent pay cycle first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_payroll_records(
        &mut self,
        tenant: &TenantId,
    ) -> Result<Vec<PayrollRecord>, PersistenceError> {
        queries::workforce::list_payroll_records(&mut self.conn, tenant)
    }

    /// Lists an employee's attendance records, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_attendance(
        &mut self,
        tenant: &TenantId,
        employee: &EmployeeId,
    ) -> Result<Vec<AttendanceRecord>, PersistenceError> {
        queries::workforce::list_attendance_for_employee(&mut self.conn, tenant, employee)
    }

    // ========================================================================
    // Audit
    // ========================================================================

    /// Retrieves one of the tenant's audit events by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::EventNotFound` if the tenant has no such event.
    pub fn get_audit_event(
        &mut self,
        tenant: &TenantId,
        event_id: i64,
    ) -> Result<AuditEvent, PersistenceError> {
        queries::audit::get_audit_event(&mut self.conn, tenant, event_id)
    }

    /// Retrieves the tenant's audit timeline, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_audit_timeline(
        &mut self,
        tenant: &TenantId,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_audit_timeline(&mut self.conn, tenant)
    }

    /// Audit events recorded against one entity.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_entity_history(
        &mut self,
        tenant: &TenantId,
        entity_kind: &str,
        entity_id: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::audit::get_entity_history(&mut self.conn, tenant, entity_kind, entity_id)
    }
}
