// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{credit, date, debit};
use crate::{
    LedgerLine, LedgerRange, LedgerReport, Money, NormalSide, accumulate, balance_as_of,
};

fn sample_lines() -> Vec<LedgerLine> {
    vec![
        debit("2024-01-01", 100_000),
        credit("2024-01-05", 25_000),
        debit("2024-01-10", 5_050),
        credit("2024-01-15", 40_000),
        debit("2024-01-20", 1),
        credit("2024-02-01", 7_500),
    ]
}

#[test]
fn test_debit_normal_scenario() {
    let lines: Vec<LedgerLine> = vec![debit("2024-01-01", 100_000), credit("2024-01-15", 40_000)];
    let report: LedgerReport = accumulate(
        &lines,
        NormalSide::Debit,
        LedgerRange::new(Some(date("2024-01-10")), Some(date("2024-01-31"))),
    );

    assert_eq!(report.opening_balance, Money::from_minor(100_000));
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.lines[0].signed_amount, Money::from_minor(-40_000));
    assert_eq!(report.lines[0].balance, Money::from_minor(60_000));
    assert_eq!(report.closing_balance, Money::from_minor(60_000));
}

#[test]
fn test_credit_normal_single_line_on_start_date() {
    let lines: Vec<LedgerLine> = vec![credit("2024-03-01", 50_000)];
    let report: LedgerReport = accumulate(
        &lines,
        NormalSide::Credit,
        LedgerRange::new(Some(date("2024-03-01")), Some(date("2024-03-31"))),
    );

    assert_eq!(report.opening_balance, Money::ZERO);
    assert_eq!(report.lines.len(), 1);
    assert_eq!(report.closing_balance, Money::from_minor(50_000));
}

#[test]
fn test_opening_balance_is_signed_sum_before_start() {
    let lines: Vec<LedgerLine> = sample_lines();
    let start = date("2024-01-12");
    let report: LedgerReport = accumulate(
        &lines,
        NormalSide::Debit,
        LedgerRange::new(Some(start), None),
    );

    let manual: i64 = lines
        .iter()
        .filter(|line| line.date < start)
        .map(|line| line.debit.minor() - line.credit.minor())
        .sum();
    assert_eq!(report.opening_balance, Money::from_minor(manual));
}

#[test]
fn test_running_balance_is_prefix_sum() {
    let lines: Vec<LedgerLine> = sample_lines();
    let report: LedgerReport = accumulate(
        &lines,
        NormalSide::Credit,
        LedgerRange::new(Some(date("2024-01-05")), Some(date("2024-01-20"))),
    );

    let mut expected: Money = report.opening_balance;
    for running in &report.lines {
        expected += running.line.credit - running.line.debit;
        assert_eq!(running.balance, expected);
    }
    assert_eq!(report.lines.len(), 4);
    assert_eq!(report.closing_balance, expected);
}

#[test]
fn test_lines_after_end_are_ignored() {
    let report: LedgerReport = accumulate(
        &sample_lines(),
        NormalSide::Debit,
        LedgerRange::new(Some(date("2024-01-01")), Some(date("2024-01-10"))),
    );

    assert_eq!(report.lines.len(), 3);
    assert_eq!(report.closing_balance, Money::from_minor(80_050));
    assert_eq!(report.total_debit, Money::from_minor(105_050));
    assert_eq!(report.total_credit, Money::from_minor(25_000));
}

#[test]
fn test_empty_range_closes_at_opening() {
    let report: LedgerReport = accumulate(
        &sample_lines(),
        NormalSide::Debit,
        LedgerRange::new(Some(date("2024-01-21")), Some(date("2024-01-25"))),
    );

    assert!(report.lines.is_empty());
    assert_eq!(report.closing_balance, report.opening_balance);
}

#[test]
fn test_missing_start_means_zero_opening() {
    let report: LedgerReport = accumulate(
        &sample_lines(),
        NormalSide::Debit,
        LedgerRange::new(None, Some(date("2024-01-31"))),
    );

    assert_eq!(report.opening_balance, Money::ZERO);
    assert_eq!(report.lines.len(), 5);
}

#[test]
fn test_accumulation_is_idempotent() {
    let lines: Vec<LedgerLine> = sample_lines();
    let range: LedgerRange = LedgerRange::new(Some(date("2024-01-10")), Some(date("2024-01-31")));

    let first: LedgerReport = accumulate(&lines, NormalSide::Debit, range);
    let second: LedgerReport = accumulate(&lines, NormalSide::Debit, range);
    assert_eq!(first, second);
}

#[test]
fn test_same_date_lines_keep_input_order() {
    let lines: Vec<LedgerLine> = vec![
        debit("2024-05-01", 1_000),
        credit("2024-05-01", 300),
        debit("2024-05-01", 50),
    ];
    let report: LedgerReport = accumulate(&lines, NormalSide::Debit, LedgerRange::unbounded());

    let balances: Vec<i64> = report.lines.iter().map(|l| l.balance.minor()).collect();
    assert_eq!(balances, vec![1_000, 700, 750]);
}

#[test]
fn test_both_sided_line_is_netted() {
    let line: LedgerLine = LedgerLine::new(
        date("2024-06-01"),
        Money::from_minor(1_000),
        Money::from_minor(400),
    );
    let report: LedgerReport = accumulate(&[line], NormalSide::Debit, LedgerRange::unbounded());
    assert_eq!(report.closing_balance, Money::from_minor(600));
}

#[test]
fn test_balance_as_of_includes_cutoff_date() {
    let lines: Vec<LedgerLine> = sample_lines();
    assert_eq!(
        balance_as_of(&lines, NormalSide::Debit, Some(date("2024-01-10"))),
        Money::from_minor(80_050)
    );
    assert_eq!(
        balance_as_of(&lines, NormalSide::Debit, None),
        Money::from_minor(32_551)
    );
}
