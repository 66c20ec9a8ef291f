// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Property tests for ledger accumulation over arbitrary date-ordered lines.

use proptest::prelude::*;
use time::{Date, Duration, Month};

use crate::{LedgerLine, LedgerRange, LedgerReport, Money, NormalSide, accumulate};

fn day(offset: i64) -> Date {
    Date::from_calendar_date(2024, Month::January, 1).unwrap() + Duration::days(offset)
}

fn signed_minor(side: NormalSide, line: &LedgerLine) -> i64 {
    match side {
        NormalSide::Debit => line.debit.minor() - line.credit.minor(),
        NormalSide::Credit => line.credit.minor() - line.debit.minor(),
    }
}

fn arb_side() -> impl Strategy<Value = NormalSide> {
    prop_oneof![Just(NormalSide::Debit), Just(NormalSide::Credit)]
}

/// Lines over roughly four months, sorted by date. Some carry both sides.
fn arb_lines() -> impl Strategy<Value = Vec<LedgerLine>> {
    prop::collection::vec((0i64..120, 0i64..1_000_000, 0i64..1_000_000), 0..40).prop_map(
        |mut raw| {
            raw.sort_by_key(|(offset, _, _)| *offset);
            raw.into_iter()
                .map(|(offset, debit, credit)| {
                    LedgerLine::new(day(offset), Money::from_minor(debit), Money::from_minor(credit))
                })
                .collect()
        },
    )
}

/// A start date that may fall before, inside or after the generated lines,
/// with an optional end on or after it.
fn arb_range() -> impl Strategy<Value = LedgerRange> {
    (-5i64..130, prop::option::of(0i64..60)).prop_map(|(start, span)| {
        LedgerRange::new(Some(day(start)), span.map(|span| day(start + span)))
    })
}

proptest! {
    /// The opening balance is the signed sum of every line dated before start.
    #[test]
    fn prop_opening_balance_is_signed_sum_before_start(
        lines in arb_lines(),
        side in arb_side(),
        range in arb_range(),
    ) {
        let start: Date = range.start.unwrap();
        let expected: i64 = lines
            .iter()
            .filter(|line| line.date < start)
            .map(|line| signed_minor(side, line))
            .sum();

        let report: LedgerReport = accumulate(&lines, side, range);

        prop_assert_eq!(report.opening_balance, Money::from_minor(expected));
    }

    /// Each running balance equals the opening balance plus the signed prefix
    /// sum of the in-range lines up to and including it.
    #[test]
    fn prop_running_balance_is_opening_plus_prefix_sum(
        lines in arb_lines(),
        side in arb_side(),
        range in arb_range(),
    ) {
        let start: Date = range.start.unwrap();
        let in_range: Vec<&LedgerLine> = lines
            .iter()
            .filter(|line| line.date >= start && range.end.is_none_or(|end| line.date <= end))
            .collect();

        let report: LedgerReport = accumulate(&lines, side, range);

        prop_assert_eq!(report.lines.len(), in_range.len());
        let mut prefix: i64 = report.opening_balance.minor();
        for (running, line) in report.lines.iter().zip(in_range) {
            prefix += signed_minor(side, line);
            prop_assert_eq!(&running.line, line);
            prop_assert_eq!(running.signed_amount, Money::from_minor(signed_minor(side, line)));
            prop_assert_eq!(running.balance, Money::from_minor(prefix), "balance on {}", line.date);
        }
        prop_assert_eq!(report.closing_balance, Money::from_minor(prefix));
    }

    /// Accumulating the same input twice yields the same report.
    #[test]
    fn prop_accumulate_is_idempotent(
        lines in arb_lines(),
        side in arb_side(),
        range in arb_range(),
    ) {
        let first: LedgerReport = accumulate(&lines, side, range);
        let second: LedgerReport = accumulate(&lines, side, range);

        prop_assert_eq!(first, second);
    }
}
