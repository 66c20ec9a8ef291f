// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Journal entries and the double-entry balance check.

use crate::error::DomainError;
use crate::ledger::Posting;
use crate::money::Money;
use crate::status::{StatusLifecycle, status_text};
use serde::{Deserialize, Serialize};
use time::Date;

/// Tolerance below which debits and credits are considered equal, in minor
/// units. One cent, so only exact equality of cents qualifies.
const BALANCE_TOLERANCE: i64 = 1;

/// One line of a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Assigned by the database; `None` until persisted.
    pub line_id: Option<i64>,
    pub account_id: i64,
    pub debit: Money,
    pub credit: Money,
    pub memo: Option<String>,
}

impl JournalLine {
    #[must_use]
    pub const fn new(account_id: i64, debit: Money, credit: Money) -> Self {
        Self {
            line_id: None,
            account_id,
            debit,
            credit,
            memo: None,
        }
    }

    #[must_use]
    pub fn with_memo(mut self, memo: &str) -> Self {
        let trimmed: &str = memo.trim();
        self.memo = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }
}

impl Posting for JournalLine {
    fn debit(&self) -> Money {
        self.debit
    }

    fn credit(&self) -> Money {
        self.credit
    }
}

/// Debit and credit totals of a set of postings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JournalTotals {
    pub debit: Money,
    pub credit: Money,
}

impl JournalTotals {
    /// Sums the debits and credits of `lines`.
    #[must_use]
    pub fn of<P: Posting>(lines: &[P]) -> Self {
        lines.iter().fold(Self::default(), |totals, line| Self {
            debit: totals.debit + line.debit(),
            credit: totals.credit + line.credit(),
        })
    }

    /// Absolute difference between debits and credits.
    #[must_use]
    pub fn difference(&self) -> Money {
        (self.debit - self.credit).abs()
    }

    /// Balanced iff |debit − credit| < 0.01 and debit > 0.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.difference().minor() < BALANCE_TOLERANCE && self.debit.is_positive()
    }
}

/// Returns true if the postings balance and move a positive amount.
///
/// This is the gate for submitting a journal entry; an empty list is never
/// balanced because its debit total is zero.
#[must_use]
pub fn is_balanced<P: Posting>(lines: &[P]) -> bool {
    JournalTotals::of(lines).is_balanced()
}

/// Validates a journal draft before it may be recorded.
///
/// Stricter than [`is_balanced`]: each line must carry exactly one
/// non-negative, non-zero side.
///
/// # Errors
///
/// Returns an error if:
/// - There are no lines
/// - Any amount is negative
/// - A line has both a debit and a credit, or neither
/// - The entry does not balance
pub fn validate_journal_draft(lines: &[JournalLine]) -> Result<JournalTotals, DomainError> {
    if lines.is_empty() {
        return Err(DomainError::EmptyJournalEntry);
    }

    for (index, line) in lines.iter().enumerate() {
        let number: usize = index + 1;
        if line.debit.is_negative() || line.credit.is_negative() {
            return Err(DomainError::NegativeAmount {
                field: format!("lines[{number}]"),
            });
        }
        match (line.debit.is_zero(), line.credit.is_zero()) {
            (false, false) => return Err(DomainError::JournalLineBothSides { line: number }),
            (true, true) => return Err(DomainError::JournalLineEmpty { line: number }),
            _ => {}
        }
    }

    let totals: JournalTotals = JournalTotals::of(lines);
    if !totals.is_balanced() {
        return Err(DomainError::UnbalancedJournalEntry {
            total_debit: totals.debit,
            total_credit: totals.credit,
        });
    }
    Ok(totals)
}

/// Lifecycle of a journal entry. Only posted entries reach the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalStatus {
    Draft,
    Posted,
    Voided,
}

impl StatusLifecycle for JournalStatus {
    const ENTITY: &'static str = "journal entry";
    const ALL: &'static [Self] = &[Self::Draft, Self::Posted, Self::Voided];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Posted => "posted",
            Self::Voided => "voided",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::Posted, Self::Voided],
            Self::Posted => &[Self::Voided],
            Self::Voided => &[],
        }
    }
}

status_text!(JournalStatus);

/// A journal entry header with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// Assigned by the database; `None` until persisted.
    pub entry_id: Option<i64>,
    pub entry_date: Date,
    pub reference: String,
    pub description: String,
    pub status: JournalStatus,
    pub lines: Vec<JournalLine>,
}

impl JournalEntry {
    /// Creates a validated journal entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference is blank, if `status` is `Voided`,
    /// or if the lines fail [`validate_journal_draft`].
    pub fn new(
        entry_date: Date,
        reference: &str,
        description: &str,
        status: JournalStatus,
        lines: Vec<JournalLine>,
    ) -> Result<Self, DomainError> {
        let reference: &str = reference.trim();
        if reference.is_empty() {
            return Err(DomainError::InvalidJournalReference(String::from(
                "Reference cannot be empty",
            )));
        }
        if status == JournalStatus::Voided {
            return Err(DomainError::InvalidStatusTransition {
                entity: JournalStatus::ENTITY,
                from: String::from("new"),
                to: status.as_str().to_string(),
            });
        }
        validate_journal_draft(&lines)?;

        Ok(Self {
            entry_id: None,
            entry_date,
            reference: reference.to_string(),
            description: description.trim().to_string(),
            status,
            lines,
        })
    }

    #[must_use]
    pub fn totals(&self) -> JournalTotals {
        JournalTotals::of(&self.lines)
    }

    #[must_use]
    pub fn header(&self) -> JournalHeader {
        JournalHeader {
            entry_id: self.entry_id,
            entry_date: self.entry_date,
            reference: self.reference.clone(),
            status: self.status,
        }
    }
}

/// Header-only view of a journal entry, used for status bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalHeader {
    /// Assigned by the database; `None` until persisted.
    pub entry_id: Option<i64>,
    pub entry_date: Date,
    pub reference: String,
    pub status: JournalStatus,
}
