// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Account, AccountType, EmployeeId, LedgerLine, LocalizedName, Money, parse_date};
use time::Date;

pub fn date(value: &str) -> Date {
    parse_date(value).unwrap()
}

pub fn debit(date_str: &str, minor: i64) -> LedgerLine {
    LedgerLine::new(date(date_str), Money::from_minor(minor), Money::ZERO)
}

pub fn credit(date_str: &str, minor: i64) -> LedgerLine {
    LedgerLine::new(date(date_str), Money::ZERO, Money::from_minor(minor))
}

pub fn create_test_account(
    id: i64,
    code: &str,
    account_type: AccountType,
    parent_id: Option<i64>,
) -> Account {
    Account::new(
        code,
        LocalizedName::new(&format!("Account {code}"), None),
        account_type,
        parent_id,
    )
    .with_id(id)
}

pub fn employee(id: &str) -> EmployeeId {
    EmployeeId::new(id).unwrap()
}
