// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chart-of-accounts and journal mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops_domain::{Account, JournalEntry, JournalStatus, StatusLifecycle, TenantId};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::format_date;
use crate::diesel_schema::{accounts, journal_entries, journal_lines};
use crate::error::PersistenceError;
use crate::mutations::ensure_updated;

/// Inserts a new account and returns its id.
///
/// # Errors
///
/// Returns an error if the insert fails (for example a duplicate code
/// within the tenant) or the account was already persisted.
pub fn insert_account(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    account: &Account,
) -> Result<i64, PersistenceError> {
    if let Some(id) = account.account_id {
        return Err(PersistenceError::ImmutableRecord {
            entity: "account",
            id,
        });
    }

    diesel::insert_into(accounts::table)
        .values((
            accounts::tenant.eq(tenant.value()),
            accounts::code.eq(&account.code),
            accounts::name_en.eq(&account.name.en),
            accounts::name_ar.eq(account.name.ar.as_deref()),
            accounts::account_type.eq(account.account_type.as_str()),
            accounts::parent_id.eq(account.parent_id),
        ))
        .execute(conn)?;

    let account_id: i64 = conn.get_last_insert_rowid()?;
    debug!(account_id, code = %account.code, "Inserted account");
    Ok(account_id)
}

/// Inserts a journal header and all of its lines.
///
/// Callers run this inside a transaction so that a failing line leaves no
/// header behind.
///
/// # Errors
///
/// Returns an error if any insert fails, for example a line pointing at an
/// account that does not exist.
pub fn insert_journal_entry(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    entry: &JournalEntry,
) -> Result<i64, PersistenceError> {
    if let Some(id) = entry.entry_id {
        return Err(PersistenceError::ImmutableRecord {
            entity: "journal entry",
            id,
        });
    }

    diesel::insert_into(journal_entries::table)
        .values((
            journal_entries::tenant.eq(tenant.value()),
            journal_entries::entry_date.eq(format_date(entry.entry_date)),
            journal_entries::reference.eq(&entry.reference),
            journal_entries::description.eq(&entry.description),
            journal_entries::status.eq(entry.status.as_str()),
        ))
        .execute(conn)?;
    let entry_id: i64 = conn.get_last_insert_rowid()?;

    for line in &entry.lines {
        diesel::insert_into(journal_lines::table)
            .values((
                journal_lines::entry_id.eq(entry_id),
                journal_lines::account_id.eq(line.account_id),
                journal_lines::debit.eq(line.debit.minor()),
                journal_lines::credit.eq(line.credit.minor()),
                journal_lines::memo.eq(line.memo.as_deref()),
            ))
            .execute(conn)?;
    }

    debug!(
        entry_id,
        reference = %entry.reference,
        lines = entry.lines.len(),
        "Inserted journal entry"
    );
    Ok(entry_id)
}

/// Moves a journal entry to a new status.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the entry does not belong to
/// `tenant`.
pub fn update_journal_status(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    entry_id: i64,
    status: JournalStatus,
) -> Result<(), PersistenceError> {
    let affected: usize = diesel::update(
        journal_entries::table
            .filter(journal_entries::entry_id.eq(entry_id))
            .filter(journal_entries::tenant.eq(tenant.value())),
    )
    .set(journal_entries::status.eq(status.as_str()))
    .execute(conn)?;

    ensure_updated(affected, "journal entry", entry_id)?;
    debug!(entry_id, status = %status, "Updated journal status");
    Ok(())
}
