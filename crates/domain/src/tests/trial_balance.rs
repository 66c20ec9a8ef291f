// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{create_test_account, credit, date, debit};
use crate::{AccountType, LedgerLine, Money, TrialBalance, compute_trial_balance};
use std::collections::HashMap;

#[test]
fn test_trial_balance_columns_follow_normal_side() {
    let accounts = vec![
        create_test_account(1, "1000", AccountType::Asset, None),
        create_test_account(2, "3000", AccountType::Equity, None),
        create_test_account(3, "4000", AccountType::Revenue, None),
        create_test_account(4, "5000", AccountType::Expense, None),
        create_test_account(5, "2000", AccountType::Liability, None),
    ];
    let mut lines: HashMap<i64, Vec<LedgerLine>> = HashMap::new();
    // Capital injection, a sale, and an expense paid in cash.
    lines.insert(
        1,
        vec![
            debit("2024-01-01", 500_000),
            debit("2024-01-05", 120_000),
            credit("2024-01-07", 30_000),
        ],
    );
    lines.insert(2, vec![credit("2024-01-01", 500_000)]);
    lines.insert(3, vec![credit("2024-01-05", 120_000)]);
    lines.insert(4, vec![debit("2024-01-07", 30_000)]);

    let trial: TrialBalance = compute_trial_balance(&accounts, &lines, None);

    let codes: Vec<&str> = trial.rows.iter().map(|r| r.account.code.as_str()).collect();
    assert_eq!(codes, vec!["1000", "3000", "4000", "5000"]);
    assert_eq!(trial.rows[0].debit, Money::from_minor(590_000));
    assert_eq!(trial.rows[1].credit, Money::from_minor(500_000));
    assert_eq!(trial.rows[2].credit, Money::from_minor(120_000));
    assert_eq!(trial.rows[3].debit, Money::from_minor(30_000));
    assert_eq!(trial.total_debit, Money::from_minor(620_000));
    assert!(trial.is_balanced());
}

#[test]
fn test_trial_balance_respects_as_of() {
    let accounts = vec![
        create_test_account(1, "1000", AccountType::Asset, None),
        create_test_account(2, "4000", AccountType::Revenue, None),
    ];
    let mut lines: HashMap<i64, Vec<LedgerLine>> = HashMap::new();
    lines.insert(1, vec![debit("2024-01-05", 100), debit("2024-02-05", 200)]);
    lines.insert(2, vec![credit("2024-01-05", 100), credit("2024-02-05", 200)]);

    let trial: TrialBalance = compute_trial_balance(&accounts, &lines, Some(date("2024-01-31")));
    assert_eq!(trial.total_debit, Money::from_minor(100));
    assert_eq!(trial.total_credit, Money::from_minor(100));
}

#[test]
fn test_overdrawn_asset_lands_in_credit_column() {
    let accounts = vec![create_test_account(1, "1000", AccountType::Asset, None)];
    let mut lines: HashMap<i64, Vec<LedgerLine>> = HashMap::new();
    lines.insert(1, vec![credit("2024-01-05", 700)]);

    let trial: TrialBalance = compute_trial_balance(&accounts, &lines, None);
    assert_eq!(trial.rows[0].debit, Money::ZERO);
    assert_eq!(trial.rows[0].credit, Money::from_minor(700));
}
