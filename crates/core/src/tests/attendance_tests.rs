// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{
    apply_ok, create_test_actor, create_test_cause, create_test_state, employee,
};
use crate::{Command, CoreError, Effect, State, TransitionResult, apply};
use fieldops_domain::{DomainError, GeoPoint};
use time::macros::datetime;

fn site() -> GeoPoint {
    GeoPoint::new(21.4858, 39.1925).unwrap()
}

#[test]
fn test_check_in_then_out() {
    let checked_in: TransitionResult = apply_ok(
        &create_test_state(),
        Command::CheckIn {
            employee: employee("tech-1"),
            at: datetime!(2026-02-01 06:30 UTC),
            location: site(),
        },
    );
    assert_eq!(checked_in.new_state.attendance.len(), 1);

    let mut state: State = checked_in.new_state;
    state.attendance[0].attendance_id = Some(11);

    let checked_out: TransitionResult = apply_ok(
        &state,
        Command::CheckOut {
            employee: employee("tech-1"),
            at: datetime!(2026-02-01 14:45 UTC),
            location: site(),
        },
    );
    assert!(checked_out.new_state.attendance.is_empty());
    assert_eq!(checked_out.audit_event.entity.id, Some(11));
    let Effect::Attendance(record) = checked_out.effect else {
        panic!("expected an attendance effect");
    };
    assert_eq!(record.worked_minutes(), Some(495));
}

#[test]
fn test_double_check_in_rejected() {
    let command = Command::CheckIn {
        employee: employee("tech-1"),
        at: datetime!(2026-02-01 06:30 UTC),
        location: site(),
    };
    let state: State = apply_ok(&create_test_state(), command.clone()).new_state;

    let result = apply(&state, command, create_test_actor(), create_test_cause());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::AlreadyCheckedIn { .. }
        ))
    ));
}

#[test]
fn test_check_out_without_check_in_rejected() {
    let result = apply(
        &create_test_state(),
        Command::CheckOut {
            employee: employee("tech-1"),
            at: datetime!(2026-02-01 14:45 UTC),
            location: site(),
        },
        create_test_actor(),
        create_test_cause(),
    );
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotCheckedIn {
            employee: String::from("tech-1")
        }))
    );
}
