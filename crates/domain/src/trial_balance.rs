// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Trial balance over posted ledger lines.

use crate::ledger::{LedgerLine, balance_as_of};
use crate::money::Money;
use crate::types::{Account, NormalSide};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use time::Date;

/// One account's row in a trial balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRow {
    pub account: Account,
    pub debit: Money,
    pub credit: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalance {
    pub as_of: Option<Date>,
    pub rows: Vec<TrialBalanceRow>,
    pub total_debit: Money,
    pub total_credit: Money,
}

impl TrialBalance {
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.total_debit == self.total_credit
    }
}

/// Computes the trial balance as of a date.
///
/// A positive balance lands on the account's normal side, a negative one on
/// the opposite side. Accounts with a zero balance are omitted. Rows are
/// ordered by account code.
#[must_use]
pub fn compute_trial_balance(
    accounts: &[Account],
    lines_by_account: &HashMap<i64, Vec<LedgerLine>>,
    as_of: Option<Date>,
) -> TrialBalance {
    let mut rows: Vec<TrialBalanceRow> = accounts
        .iter()
        .filter_map(|account| {
            let account_id: i64 = account.account_id?;
            let lines: &[LedgerLine] = lines_by_account.get(&account_id).map_or(&[], Vec::as_slice);
            let balance: Money = balance_as_of(lines, account.normal_side(), as_of);
            if balance.is_zero() {
                return None;
            }

            let on_normal_side: bool = balance.is_positive();
            let debit_side: bool = match account.normal_side() {
                NormalSide::Debit => on_normal_side,
                NormalSide::Credit => !on_normal_side,
            };
            let amount: Money = balance.abs();
            Some(TrialBalanceRow {
                account: account.clone(),
                debit: if debit_side { amount } else { Money::ZERO },
                credit: if debit_side { Money::ZERO } else { amount },
            })
        })
        .collect();
    rows.sort_by(|a, b| a.account.code.cmp(&b.account.code));

    let total_debit: Money = rows.iter().map(|r| r.debit).sum();
    let total_credit: Money = rows.iter().map(|r| r.credit).sum();

    TrialBalance {
        as_of,
        rows,
        total_debit,
        total_credit,
    }
}
