// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod transaction_tests;

use crate::{PersistTransitionResult, Persistence};
use fieldops::{Command, State, TransitionResult, apply};
use fieldops_audit::{Actor, Cause};
use fieldops_domain::{AccountType, EmployeeId, JournalLine, JournalStatus, Money, TenantId, parse_date};
use time::Date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("acct-123"), String::from("accountant"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Month-end close"))
}

pub fn tenant() -> TenantId {
    TenantId::new("acme").unwrap()
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn employee(id: &str) -> EmployeeId {
    EmployeeId::new(id).unwrap()
}

/// Loads the tenant state, applies the command and persists the result.
pub fn run(persistence: &mut Persistence, command: Command) -> PersistTransitionResult {
    let result: TransitionResult = transition(persistence, command);
    persistence.persist_transition(&result).unwrap()
}

/// Loads the tenant state and applies the command without persisting it.
pub fn transition(persistence: &mut Persistence, command: Command) -> TransitionResult {
    let state: State = persistence.load_state(&tenant()).unwrap();
    apply(&state, command, create_test_actor(), create_test_cause()).unwrap()
}

pub fn create_account(persistence: &mut Persistence, code: &str, account_type: AccountType) -> i64 {
    run(
        persistence,
        Command::CreateAccount {
            code: code.to_string(),
            name_en: format!("Account {code}"),
            name_ar: None,
            account_type,
            parent_id: None,
        },
    )
    .entity_id
}

pub fn post_entry(
    persistence: &mut Persistence,
    entry_date: &str,
    reference: &str,
    lines: Vec<JournalLine>,
) -> i64 {
    run(
        persistence,
        Command::RecordJournalEntry {
            entry_date: date(entry_date),
            reference: reference.to_string(),
            description: format!("{reference} description"),
            status: JournalStatus::Posted,
            lines,
        },
    )
    .entity_id
}

pub fn debit(account_id: i64, minor: i64) -> JournalLine {
    JournalLine::new(account_id, Money::from_minor(minor), Money::ZERO)
}

pub fn credit(account_id: i64, minor: i64) -> JournalLine {
    JournalLine::new(account_id, Money::ZERO, Money::from_minor(minor))
}
