// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Chart of accounts validation and tree assembly.

use crate::error::DomainError;
use crate::money::Money;
use crate::types::Account;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Validates a new account against the existing chart.
///
/// # Errors
///
/// Returns an error if:
/// - The code or English name is blank
/// - The code is already used
/// - The parent does not exist
/// - The parent has a different account type
pub fn validate_new_account(existing: &[Account], account: &Account) -> Result<(), DomainError> {
    if account.code.is_empty() {
        return Err(DomainError::InvalidAccountCode(String::from(
            "Account code cannot be empty",
        )));
    }
    if account.code.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidAccountCode(format!(
            "Account code '{}' must not contain whitespace",
            account.code
        )));
    }
    if account.name.en.is_empty() {
        return Err(DomainError::InvalidAccountName(String::from(
            "English name cannot be empty",
        )));
    }
    if existing.iter().any(|a| a.code == account.code) {
        return Err(DomainError::DuplicateAccountCode {
            code: account.code.clone(),
        });
    }

    if let Some(parent_id) = account.parent_id {
        let parent: &Account = existing
            .iter()
            .find(|a| a.account_id == Some(parent_id))
            .ok_or(DomainError::ParentAccountNotFound(parent_id))?;
        if parent.account_type != account.account_type {
            return Err(DomainError::ParentAccountTypeMismatch {
                parent: parent.account_type,
                child: account.account_type,
            });
        }
    }

    Ok(())
}

/// A node of the chart-of-accounts tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNode {
    pub account: Account,
    /// Balance of postings made directly to this account.
    pub balance: Money,
    /// Own balance plus the rolled-up balances of all children.
    pub rolled_up_balance: Money,
    pub children: Vec<Self>,
}

/// Assembles a flat account list into a forest ordered by account code.
///
/// Accounts whose parent is absent from `accounts` become roots. Balances
/// missing from `balances` count as zero. Unpersisted accounts (no id) are
/// skipped since nothing can reference them. Accounts caught in a parent
/// cycle are never reachable from a root; the lowest code of each cycle is
/// promoted to a root so every persisted account appears exactly once.
#[must_use]
pub fn build_account_tree(accounts: &[Account], balances: &HashMap<i64, Money>) -> Vec<AccountNode> {
    let known: HashSet<i64> = accounts.iter().filter_map(|a| a.account_id).collect();

    let mut children_of: BTreeMap<i64, Vec<&Account>> = BTreeMap::new();
    let mut roots: Vec<&Account> = Vec::new();
    for account in accounts.iter().filter(|a| a.account_id.is_some()) {
        match account.parent_id {
            Some(parent_id) if known.contains(&parent_id) => {
                children_of.entry(parent_id).or_default().push(account);
            }
            _ => roots.push(account),
        }
    }
    roots.sort_by(|a, b| a.code.cmp(&b.code));

    let mut visited: HashSet<i64> = HashSet::new();
    let mut forest: Vec<AccountNode> = roots
        .into_iter()
        .filter_map(|root| build_node(root, &children_of, balances, &mut visited))
        .collect();

    let mut stranded: Vec<&Account> = accounts
        .iter()
        .filter(|a| a.account_id.is_some_and(|id| !visited.contains(&id)))
        .collect();
    stranded.sort_by(|a, b| a.code.cmp(&b.code));
    for account in stranded {
        if let Some(node) = build_node(account, &children_of, balances, &mut visited) {
            forest.push(node);
        }
    }
    forest.sort_by(|a, b| a.account.code.cmp(&b.account.code));

    forest
}

fn build_node(
    account: &Account,
    children_of: &BTreeMap<i64, Vec<&Account>>,
    balances: &HashMap<i64, Money>,
    visited: &mut HashSet<i64>,
) -> Option<AccountNode> {
    let account_id: i64 = account.account_id?;
    // A parent cycle would otherwise recurse forever.
    if !visited.insert(account_id) {
        return None;
    }

    let mut children: Vec<&Account> = children_of.get(&account_id).cloned().unwrap_or_default();
    children.sort_by(|a, b| a.code.cmp(&b.code));

    let child_nodes: Vec<AccountNode> = children
        .into_iter()
        .filter_map(|child| build_node(child, children_of, balances, visited))
        .collect();

    let balance: Money = balances.get(&account_id).copied().unwrap_or_default();
    let rolled_up_balance: Money =
        balance + child_nodes.iter().map(|n| n.rolled_up_balance).sum::<Money>();

    Some(AccountNode {
        account: account.clone(),
        balance,
        rolled_up_balance,
        children: child_nodes,
    })
}
