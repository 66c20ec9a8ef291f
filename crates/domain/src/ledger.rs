// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! General ledger balance accumulation.
//!
//! Given the posted lines of one account, this module computes the opening
//! balance as of a start date and a running balance per line thereafter,
//! using the account's normal-side sign convention.
//!
//! The accumulation is a pure function of its inputs. Lines are expected in
//! ascending date order; lines sharing a date keep their input order.

use crate::money::Money;
use crate::types::NormalSide;
use serde::{Deserialize, Serialize};
use time::Date;

/// Anything carrying a debit and a credit amount.
pub trait Posting {
    fn debit(&self) -> Money;
    fn credit(&self) -> Money;
}

/// A posted line as seen from a single account's ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLine {
    pub date: Date,
    pub debit: Money,
    pub credit: Money,
    /// The journal entry this line belongs to, when known.
    pub entry_id: Option<i64>,
    pub reference: String,
    pub description: String,
}

impl LedgerLine {
    /// Creates a bare line with no journal metadata.
    #[must_use]
    pub const fn new(date: Date, debit: Money, credit: Money) -> Self {
        Self {
            date,
            debit,
            credit,
            entry_id: None,
            reference: String::new(),
            description: String::new(),
        }
    }
}

impl Posting for LedgerLine {
    fn debit(&self) -> Money {
        self.debit
    }

    fn credit(&self) -> Money {
        self.credit
    }
}

/// An inclusive date range. Missing bounds are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerRange {
    pub start: Option<Date>,
    pub end: Option<Date>,
}

impl LedgerRange {
    #[must_use]
    pub const fn new(start: Option<Date>, end: Option<Date>) -> Self {
        Self { start, end }
    }

    /// A range covering every date.
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            start: None,
            end: None,
        }
    }

    fn is_before_start(&self, date: Date) -> bool {
        self.start.is_some_and(|start| date < start)
    }

    fn is_after_end(&self, date: Date) -> bool {
        self.end.is_some_and(|end| date > end)
    }
}

/// A ledger line annotated with its signed amount and the running balance
/// after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunningLine {
    pub line: LedgerLine,
    pub signed_amount: Money,
    pub balance: Money,
}

/// The result of accumulating an account's ledger over a range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerReport {
    pub normal_side: NormalSide,
    pub range: LedgerRange,
    /// Signed sum of every line dated before the range start.
    pub opening_balance: Money,
    /// In-range lines with running balances, in input order.
    pub lines: Vec<RunningLine>,
    /// Final running balance, or the opening balance when no line is in range.
    pub closing_balance: Money,
    /// Sum of debits over the in-range lines.
    pub total_debit: Money,
    /// Sum of credits over the in-range lines.
    pub total_credit: Money,
}

/// Accumulates an account's ledger over a date range.
///
/// 1. Lines dated before `range.start` form the opening balance.
/// 2. Lines with `start <= date <= end` each add their signed amount to a
///    running total that starts at the opening balance.
/// 3. Lines after `range.end` are ignored.
///
/// A line carrying both a debit and a credit contributes its net amount.
#[must_use]
pub fn accumulate(lines: &[LedgerLine], normal_side: NormalSide, range: LedgerRange) -> LedgerReport {
    let opening_balance: Money = lines
        .iter()
        .filter(|line| range.is_before_start(line.date))
        .map(|line| normal_side.signed_amount(line.debit, line.credit))
        .sum();

    let mut balance: Money = opening_balance;
    let mut total_debit: Money = Money::ZERO;
    let mut total_credit: Money = Money::ZERO;
    let mut running: Vec<RunningLine> = Vec::new();

    for line in lines
        .iter()
        .filter(|line| !range.is_before_start(line.date) && !range.is_after_end(line.date))
    {
        let signed_amount: Money = normal_side.signed_amount(line.debit, line.credit);
        balance += signed_amount;
        total_debit += line.debit;
        total_credit += line.credit;
        running.push(RunningLine {
            line: line.clone(),
            signed_amount,
            balance,
        });
    }

    LedgerReport {
        normal_side,
        range,
        opening_balance,
        lines: running,
        closing_balance: balance,
        total_debit,
        total_credit,
    }
}

/// Computes an account balance over every line dated on or before `as_of`
/// (or over every line when `as_of` is `None`).
#[must_use]
pub fn balance_as_of(lines: &[LedgerLine], normal_side: NormalSide, as_of: Option<Date>) -> Money {
    lines
        .iter()
        .filter(|line| as_of.is_none_or(|cutoff| line.date <= cutoff))
        .map(|line| normal_side.signed_amount(line.debit, line.credit))
        .sum()
}
