// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, State, TransitionResult, apply};
use fieldops_audit::{Actor, Cause};
use fieldops_domain::{
    Account, AccountType, EmployeeId, JournalLine, LocalizedName, Money, Project, TenantId,
    parse_date,
};
use time::Date;

pub fn create_test_actor() -> Actor {
    Actor::new(String::from("acct-123"), String::from("accountant"))
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Month-end close"))
}

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn employee(id: &str) -> EmployeeId {
    EmployeeId::new(id).unwrap()
}

fn account(id: i64, code: &str, account_type: AccountType) -> Account {
    Account::new(
        code,
        LocalizedName::new(&format!("Account {code}"), None),
        account_type,
        None,
    )
    .with_id(id)
}

/// A tenant with cash (1), capital (2), revenue (3), expense (4) accounts
/// and one active project (10).
pub fn create_test_state() -> State {
    let mut state: State = State::new(TenantId::new("acme").unwrap());
    state.accounts = vec![
        account(1, "1100", AccountType::Asset),
        account(2, "3000", AccountType::Equity),
        account(3, "4000", AccountType::Revenue),
        account(4, "5000", AccountType::Expense),
    ];

    let mut project: Project = Project::new(
        "Pump station",
        employee("mgr-1"),
        "Jeddah",
        Money::from_major(50_000),
        date("2026-01-01"),
        None,
    )
    .unwrap();
    project.project_id = Some(10);
    project.status = fieldops_domain::ProjectStatus::Active;
    state.projects.push(project);
    state
}

pub fn balanced_lines(minor: i64) -> Vec<JournalLine> {
    vec![
        JournalLine::new(1, Money::from_minor(minor), Money::ZERO),
        JournalLine::new(2, Money::ZERO, Money::from_minor(minor)),
    ]
}

pub fn apply_ok(state: &State, command: Command) -> TransitionResult {
    apply(state, command, create_test_actor(), create_test_cause()).unwrap()
}
