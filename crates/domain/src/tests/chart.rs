// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::create_test_account;
use crate::{
    Account, AccountNode, AccountType, DomainError, LocalizedName, Money, build_account_tree,
    validate_new_account,
};
use std::collections::HashMap;

fn chart() -> Vec<Account> {
    vec![
        create_test_account(1, "1000", AccountType::Asset, None),
        create_test_account(2, "1100", AccountType::Asset, Some(1)),
        create_test_account(3, "1200", AccountType::Asset, Some(1)),
        create_test_account(4, "1110", AccountType::Asset, Some(2)),
        create_test_account(5, "4000", AccountType::Revenue, None),
    ]
}

#[test]
fn test_tree_is_ordered_by_code_and_rolls_up() {
    let mut accounts: Vec<Account> = chart();
    accounts.reverse();
    let balances: HashMap<i64, Money> = HashMap::from([
        (1, Money::from_minor(100)),
        (2, Money::from_minor(1_000)),
        (3, Money::from_minor(250)),
        (4, Money::from_minor(40)),
        (5, Money::from_minor(9_000)),
    ]);

    let tree: Vec<AccountNode> = build_account_tree(&accounts, &balances);

    assert_eq!(tree.len(), 2);
    assert_eq!(tree[0].account.code, "1000");
    assert_eq!(tree[1].account.code, "4000");

    let assets: &AccountNode = &tree[0];
    let child_codes: Vec<&str> = assets
        .children
        .iter()
        .map(|n| n.account.code.as_str())
        .collect();
    assert_eq!(child_codes, vec!["1100", "1200"]);
    assert_eq!(assets.children[0].rolled_up_balance, Money::from_minor(1_040));
    assert_eq!(assets.rolled_up_balance, Money::from_minor(1_390));
    assert_eq!(assets.balance, Money::from_minor(100));
}

#[test]
fn test_orphaned_account_becomes_root() {
    let accounts: Vec<Account> = vec![
        create_test_account(1, "1000", AccountType::Asset, None),
        create_test_account(9, "1900", AccountType::Asset, Some(77)),
    ];
    let tree: Vec<AccountNode> = build_account_tree(&accounts, &HashMap::new());
    assert_eq!(tree.len(), 2);
    assert_eq!(tree[1].account.code, "1900");
    assert_eq!(tree[1].rolled_up_balance, Money::ZERO);
}

#[test]
fn test_parent_cycle_members_still_appear() {
    let accounts: Vec<Account> = vec![
        create_test_account(1, "1000", AccountType::Asset, None),
        create_test_account(2, "2200", AccountType::Liability, Some(3)),
        create_test_account(3, "2100", AccountType::Liability, Some(2)),
    ];
    let balances: HashMap<i64, Money> =
        HashMap::from([(2, Money::from_minor(30)), (3, Money::from_minor(70))]);

    let tree: Vec<AccountNode> = build_account_tree(&accounts, &balances);

    let root_codes: Vec<&str> = tree.iter().map(|n| n.account.code.as_str()).collect();
    assert_eq!(root_codes, vec!["1000", "2100"]);
    assert_eq!(tree[1].children.len(), 1);
    assert_eq!(tree[1].children[0].account.code, "2200");
    assert!(tree[1].children[0].children.is_empty());
    assert_eq!(tree[1].rolled_up_balance, Money::from_minor(100));
}

#[test]
fn test_new_account_accepted() {
    let account: Account = Account::new(
        "1300",
        LocalizedName::new("Inventory", Some("المخزون")),
        AccountType::Asset,
        Some(1),
    );
    assert!(validate_new_account(&chart(), &account).is_ok());
}

#[test]
fn test_duplicate_code_rejected() {
    let account: Account = Account::new(
        "1100",
        LocalizedName::new("Cash", None),
        AccountType::Asset,
        None,
    );
    assert_eq!(
        validate_new_account(&chart(), &account),
        Err(DomainError::DuplicateAccountCode {
            code: String::from("1100")
        })
    );
}

#[test]
fn test_missing_parent_rejected() {
    let account: Account = Account::new(
        "1300",
        LocalizedName::new("Inventory", None),
        AccountType::Asset,
        Some(42),
    );
    assert_eq!(
        validate_new_account(&chart(), &account),
        Err(DomainError::ParentAccountNotFound(42))
    );
}

#[test]
fn test_parent_type_mismatch_rejected() {
    let account: Account = Account::new(
        "4100",
        LocalizedName::new("Service revenue", None),
        AccountType::Revenue,
        Some(1),
    );
    assert_eq!(
        validate_new_account(&chart(), &account),
        Err(DomainError::ParentAccountTypeMismatch {
            parent: AccountType::Asset,
            child: AccountType::Revenue,
        })
    );
}

#[test]
fn test_blank_code_and_name_rejected() {
    let blank_code: Account = Account::new(
        "  ",
        LocalizedName::new("Cash", None),
        AccountType::Asset,
        None,
    );
    assert!(matches!(
        validate_new_account(&chart(), &blank_code),
        Err(DomainError::InvalidAccountCode(_))
    ));

    let spaced_code: Account = Account::new(
        "11 00",
        LocalizedName::new("Cash", None),
        AccountType::Asset,
        None,
    );
    assert!(matches!(
        validate_new_account(&chart(), &spaced_code),
        Err(DomainError::InvalidAccountCode(_))
    ));

    let blank_name: Account = Account::new(
        "1300",
        LocalizedName::new(" ", Some("المخزون")),
        AccountType::Asset,
        None,
    );
    assert!(matches!(
        validate_new_account(&chart(), &blank_name),
        Err(DomainError::InvalidAccountName(_))
    ));
}
