// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chart-of-accounts, journal and ledger queries.
//!
//! Ledger lines come only from posted entries and are always ordered by
//! `(entry_date, entry_id, line_id)`, so lines sharing a date keep entry
//! creation order and then line order.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use fieldops_domain::{
    Account, JournalEntry, JournalHeader, JournalStatus, LedgerLine, Money, StatusLifecycle,
    TenantId, balance_as_of,
};
use std::collections::HashMap;
use time::Date;

use crate::data_models::{
    AccountRow, JournalEntryRow, JournalLineRow, LedgerLineRow, assemble_journal_entry,
};
use crate::diesel_schema::{accounts, journal_entries, journal_lines};
use crate::error::PersistenceError;

/// Lists the tenant's accounts ordered by code.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_accounts(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<Account>, PersistenceError> {
    accounts::table
        .filter(accounts::tenant.eq(tenant.value()))
        .order(accounts::code.asc())
        .select(AccountRow::as_select())
        .load::<AccountRow>(conn)?
        .into_iter()
        .map(Account::try_from)
        .collect()
}

/// Looks up one account of the tenant.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the account does not exist for
/// `tenant`.
pub fn get_account(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    account_id: i64,
) -> Result<Account, PersistenceError> {
    let row: AccountRow = accounts::table
        .filter(accounts::tenant.eq(tenant.value()))
        .filter(accounts::account_id.eq(account_id))
        .select(AccountRow::as_select())
        .first::<AccountRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("account {account_id}")))?;
    Account::try_from(row)
}

/// Lists journal headers (without lines) in ledger order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_journal_headers(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<JournalHeader>, PersistenceError> {
    journal_entries::table
        .filter(journal_entries::tenant.eq(tenant.value()))
        .order((journal_entries::entry_date.asc(), journal_entries::entry_id.asc()))
        .select(JournalEntryRow::as_select())
        .load::<JournalEntryRow>(conn)?
        .into_iter()
        .map(JournalHeader::try_from)
        .collect()
}

/// Lists journal entries with their lines, in ledger order.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be converted.
pub fn list_journal_entries(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<JournalEntry>, PersistenceError> {
    let headers: Vec<JournalEntryRow> = journal_entries::table
        .filter(journal_entries::tenant.eq(tenant.value()))
        .order((journal_entries::entry_date.asc(), journal_entries::entry_id.asc()))
        .select(JournalEntryRow::as_select())
        .load::<JournalEntryRow>(conn)?;

    let entry_ids: Vec<i64> = headers.iter().map(|h| h.entry_id).collect();
    let mut lines_by_entry: HashMap<i64, Vec<JournalLineRow>> = HashMap::new();
    for line in journal_lines::table
        .filter(journal_lines::entry_id.eq_any(&entry_ids))
        .order(journal_lines::line_id.asc())
        .select(JournalLineRow::as_select())
        .load::<JournalLineRow>(conn)?
    {
        lines_by_entry.entry(line.entry_id).or_default().push(line);
    }

    headers
        .into_iter()
        .map(|header| {
            let lines: Vec<JournalLineRow> =
                lines_by_entry.remove(&header.entry_id).unwrap_or_default();
            assemble_journal_entry(header, lines)
        })
        .collect()
}

/// Loads one journal entry with its lines.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the entry does not exist for
/// `tenant`.
pub fn get_journal_entry(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    entry_id: i64,
) -> Result<JournalEntry, PersistenceError> {
    let header: JournalEntryRow = journal_entries::table
        .filter(journal_entries::tenant.eq(tenant.value()))
        .filter(journal_entries::entry_id.eq(entry_id))
        .select(JournalEntryRow::as_select())
        .first::<JournalEntryRow>(conn)
        .optional()?
        .ok_or_else(|| PersistenceError::NotFound(format!("journal entry {entry_id}")))?;

    let lines: Vec<JournalLineRow> = journal_lines::table
        .filter(journal_lines::entry_id.eq(entry_id))
        .order(journal_lines::line_id.asc())
        .select(JournalLineRow::as_select())
        .load::<JournalLineRow>(conn)?;

    assemble_journal_entry(header, lines)
}

fn load_posted_lines(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    account_id: Option<i64>,
) -> Result<Vec<LedgerLineRow>, PersistenceError> {
    let mut query = journal_lines::table
        .inner_join(journal_entries::table)
        .filter(journal_entries::tenant.eq(tenant.value()))
        .filter(journal_entries::status.eq(JournalStatus::Posted.as_str()))
        .order((
            journal_entries::entry_date.asc(),
            journal_entries::entry_id.asc(),
            journal_lines::line_id.asc(),
        ))
        .select((
            journal_lines::account_id,
            journal_entries::entry_id,
            journal_entries::entry_date,
            journal_entries::reference,
            journal_entries::description,
            journal_lines::debit,
            journal_lines::credit,
        ))
        .into_boxed::<Sqlite>();

    if let Some(account_id) = account_id {
        query = query.filter(journal_lines::account_id.eq(account_id));
    }

    Ok(query.load::<LedgerLineRow>(conn)?)
}

/// Posted ledger lines for one account, in ledger order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn ledger_lines_for_account(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    account_id: i64,
) -> Result<Vec<LedgerLine>, PersistenceError> {
    load_posted_lines(conn, tenant, Some(account_id))?
        .into_iter()
        .map(LedgerLine::try_from)
        .collect()
}

/// Posted ledger lines for every account of the tenant, keyed by account id.
///
/// Each account's lines are in ledger order.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn posted_lines_by_account(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<HashMap<i64, Vec<LedgerLine>>, PersistenceError> {
    let mut by_account: HashMap<i64, Vec<LedgerLine>> = HashMap::new();
    for row in load_posted_lines(conn, tenant, None)? {
        let account_id: i64 = row.account_id;
        by_account
            .entry(account_id)
            .or_default()
            .push(LedgerLine::try_from(row)?);
    }
    Ok(by_account)
}

/// Balance of every account on its normal side, as of `as_of` (inclusive).
///
/// Accounts without posted lines are reported with a zero balance.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be converted.
pub fn account_balances(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    as_of: Option<Date>,
) -> Result<HashMap<i64, Money>, PersistenceError> {
    let accounts: Vec<Account> = list_accounts(conn, tenant)?;
    let lines: HashMap<i64, Vec<LedgerLine>> = posted_lines_by_account(conn, tenant)?;

    Ok(accounts
        .iter()
        .filter_map(|account| {
            let account_id: i64 = account.account_id?;
            let account_lines: &[LedgerLine] = lines.get(&account_id).map_or(&[], Vec::as_slice);
            Some((
                account_id,
                balance_as_of(account_lines, account.normal_side(), as_of),
            ))
        })
        .collect())
}
