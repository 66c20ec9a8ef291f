// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::date;
use crate::{
    DomainError, JournalEntry, JournalLine, JournalStatus, JournalTotals, Money, is_balanced,
    validate_journal_draft,
};

fn line(account_id: i64, debit: i64, credit: i64) -> JournalLine {
    JournalLine::new(
        account_id,
        Money::from_minor(debit),
        Money::from_minor(credit),
    )
}

#[test]
fn test_matching_debit_and_credit_balance() {
    assert!(is_balanced(&[line(1, 10_000, 0), line(2, 0, 10_000)]));
}

#[test]
fn test_one_cent_difference_does_not_balance() {
    assert!(!is_balanced(&[line(1, 10_000, 0), line(2, 0, 9_999)]));
}

#[test]
fn test_empty_entry_does_not_balance() {
    let lines: Vec<JournalLine> = Vec::new();
    assert!(!is_balanced(&lines));
}

#[test]
fn test_zero_amount_entry_does_not_balance() {
    assert!(!is_balanced(&[line(1, 0, 0), line(2, 0, 0)]));
}

#[test]
fn test_many_lines_balance() {
    let lines: Vec<JournalLine> = vec![
        line(1, 12_345, 0),
        line(2, 655, 0),
        line(3, 0, 10_000),
        line(4, 0, 3_000),
    ];
    assert!(is_balanced(&lines));
    let totals: JournalTotals = JournalTotals::of(&lines);
    assert_eq!(totals.debit, Money::from_minor(13_000));
    assert_eq!(totals.difference(), Money::ZERO);
}

#[test]
fn test_draft_validation_rejects_empty() {
    assert_eq!(
        validate_journal_draft(&[]),
        Err(DomainError::EmptyJournalEntry)
    );
}

#[test]
fn test_draft_validation_rejects_both_sides() {
    let lines: Vec<JournalLine> = vec![line(1, 500, 500), line(2, 0, 0)];
    assert_eq!(
        validate_journal_draft(&lines),
        Err(DomainError::JournalLineBothSides { line: 1 })
    );
}

#[test]
fn test_draft_validation_rejects_empty_line() {
    let lines: Vec<JournalLine> = vec![line(1, 500, 0), line(2, 0, 500), line(3, 0, 0)];
    assert_eq!(
        validate_journal_draft(&lines),
        Err(DomainError::JournalLineEmpty { line: 3 })
    );
}

#[test]
fn test_draft_validation_rejects_negative_amount() {
    let lines: Vec<JournalLine> = vec![line(1, -500, 0), line(2, 0, -500)];
    assert!(matches!(
        validate_journal_draft(&lines),
        Err(DomainError::NegativeAmount { .. })
    ));
}

#[test]
fn test_draft_validation_rejects_unbalanced() {
    let lines: Vec<JournalLine> = vec![line(1, 500, 0), line(2, 0, 499)];
    assert_eq!(
        validate_journal_draft(&lines),
        Err(DomainError::UnbalancedJournalEntry {
            total_debit: Money::from_minor(500),
            total_credit: Money::from_minor(499),
        })
    );
}

#[test]
fn test_journal_entry_requires_reference() {
    let result = JournalEntry::new(
        date("2024-01-01"),
        "   ",
        "Opening",
        JournalStatus::Draft,
        vec![line(1, 500, 0), line(2, 0, 500)],
    );
    assert!(matches!(
        result,
        Err(DomainError::InvalidJournalReference(_))
    ));
}

#[test]
fn test_journal_entry_cannot_start_voided() {
    let result = JournalEntry::new(
        date("2024-01-01"),
        "JV-1",
        "Opening",
        JournalStatus::Voided,
        vec![line(1, 500, 0), line(2, 0, 500)],
    );
    assert!(matches!(
        result,
        Err(DomainError::InvalidStatusTransition { .. })
    ));
}

#[test]
fn test_journal_entry_accepts_balanced_draft() {
    let entry: JournalEntry = JournalEntry::new(
        date("2024-01-01"),
        " JV-1 ",
        "Opening balances",
        JournalStatus::Posted,
        vec![line(1, 500, 0), line(2, 0, 500)],
    )
    .unwrap();
    assert_eq!(entry.reference, "JV-1");
    assert_eq!(entry.totals().credit, Money::from_minor(500));
}
