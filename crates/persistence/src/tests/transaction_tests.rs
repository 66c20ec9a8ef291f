// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{create_account, credit, date, debit, post_entry, tenant, transition};
use crate::{PersistTransitionResult, Persistence, PersistenceError};
use fieldops::{Command, Effect, TransitionResult};
use fieldops_domain::{AccountType, JournalStatus, Money, Project, ProjectStatus};

#[test]
fn test_failed_line_rolls_back_header_and_audit_event() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let cash: i64 = create_account(&mut persistence, "1100", AccountType::Asset);
    let capital: i64 = create_account(&mut persistence, "3000", AccountType::Equity);

    let mut result: TransitionResult = transition(
        &mut persistence,
        Command::RecordJournalEntry {
            entry_date: date("2024-01-01"),
            reference: String::from("JV-1"),
            description: String::new(),
            status: JournalStatus::Posted,
            lines: vec![debit(cash, 1_000), credit(capital, 1_000)],
        },
    );
    if let Effect::JournalEntry(entry) = &mut result.effect {
        entry.lines[1].account_id = 999;
    } else {
        panic!("expected a journal entry effect");
    }

    let outcome: Result<PersistTransitionResult, PersistenceError> =
        persistence.persist_transition(&result);
    assert!(outcome.is_err());

    assert!(persistence.list_journal_entries(&tenant()).unwrap().is_empty());
    assert_eq!(persistence.get_audit_timeline(&tenant()).unwrap().len(), 2);
}

#[test]
fn test_posted_entry_cannot_be_rewritten() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let cash: i64 = create_account(&mut persistence, "1100", AccountType::Asset);
    let capital: i64 = create_account(&mut persistence, "3000", AccountType::Equity);
    let entry_id: i64 = post_entry(
        &mut persistence,
        "2024-01-01",
        "JV-1",
        vec![debit(cash, 1_000), credit(capital, 1_000)],
    );

    let mut result: TransitionResult = transition(
        &mut persistence,
        Command::RecordJournalEntry {
            entry_date: date("2024-01-02"),
            reference: String::from("JV-2"),
            description: String::new(),
            status: JournalStatus::Posted,
            lines: vec![debit(cash, 500), credit(capital, 500)],
        },
    );
    if let Effect::JournalEntry(entry) = &mut result.effect {
        entry.entry_id = Some(entry_id);
    }

    let outcome: Result<PersistTransitionResult, PersistenceError> =
        persistence.persist_transition(&result);
    assert!(matches!(
        outcome,
        Err(PersistenceError::ImmutableRecord { id, .. }) if id == entry_id
    ));
    assert_eq!(persistence.list_journal_entries(&tenant()).unwrap().len(), 1);
}

#[test]
fn test_update_of_missing_row_reports_not_found() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let mut result: TransitionResult = transition(
        &mut persistence,
        Command::CreateProject {
            title: String::from("Ghost"),
            manager: super::employee("mgr-1"),
            location: String::from("Nowhere"),
            budget: Money::from_major(1),
            start_date: date("2026-01-01"),
            end_date: None,
        },
    );
    if let Effect::Project(project) = &mut result.effect {
        *project = Project {
            project_id: Some(77),
            status: ProjectStatus::Active,
            ..project.clone()
        };
    }

    let outcome: Result<PersistTransitionResult, PersistenceError> =
        persistence.persist_transition(&result);
    assert!(matches!(outcome, Err(PersistenceError::NotFound(_))));
    assert!(persistence.get_audit_timeline(&tenant()).unwrap().is_empty());
}
