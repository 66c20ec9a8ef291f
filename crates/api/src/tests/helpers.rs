// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use fieldops_audit::Cause;
use fieldops_domain::TenantId;
use fieldops_persistence::{Persistence, PersistenceError};

use crate::{
    AuthenticatedActor, ChangeStatusRequest, CreateAccountRequest, CreateProjectRequest,
    JournalLineInput, RecordJournalEntryRequest, RequestContext, Role, create_account,
    create_project, record_journal_entry,
};

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("admin-1"), Role::Admin)
}

pub fn create_test_accountant() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("acct-1"), Role::Accountant)
}

pub fn create_test_manager() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("mgr-1"), Role::Manager)
}

pub fn create_test_employee() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("tech-1"), Role::Employee)
}

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn tenant() -> TenantId {
    TenantId::new("acme").expect("valid tenant")
}

pub fn context(actor: AuthenticatedActor) -> RequestContext {
    RequestContext::new(tenant(), actor, create_test_cause())
}

pub fn setup_test_persistence() -> Result<Persistence, PersistenceError> {
    Persistence::new_in_memory()
}

pub fn status(status: &str, notes: Option<&str>) -> ChangeStatusRequest {
    ChangeStatusRequest {
        status: status.to_string(),
        notes: notes.map(str::to_string),
    }
}

/// Creates an account as the test accountant and returns its id.
pub fn add_account(
    persistence: &mut Persistence,
    code: &str,
    name_en: &str,
    account_type: &str,
    parent_id: Option<i64>,
) -> i64 {
    create_account(
        persistence,
        &context(create_test_accountant()),
        CreateAccountRequest {
            code: code.to_string(),
            name_en: name_en.to_string(),
            name_ar: None,
            account_type: account_type.to_string(),
            parent_id,
        },
    )
    .expect("account should be created")
    .entity_id
}

pub fn line(account_id: i64, debit: Option<&str>, credit: Option<&str>) -> JournalLineInput {
    JournalLineInput {
        account_id,
        debit: debit.map(str::to_string),
        credit: credit.map(str::to_string),
        memo: None,
    }
}

/// Records a posted two-line entry moving `amount` from `credit_account` to
/// `debit_account`.
pub fn post(
    persistence: &mut Persistence,
    entry_date: &str,
    reference: &str,
    debit_account: i64,
    credit_account: i64,
    amount: &str,
) -> i64 {
    record_journal_entry(
        persistence,
        &context(create_test_accountant()),
        RecordJournalEntryRequest {
            entry_date: entry_date.to_string(),
            reference: reference.to_string(),
            description: Some(format!("Entry {reference}")),
            status: Some(String::from("posted")),
            lines: vec![
                line(debit_account, Some(amount), None),
                line(credit_account, None, Some(amount)),
            ],
        },
    )
    .expect("entry should be recorded")
    .entity_id
}

/// Creates a planned project as the test manager and returns its id.
pub fn add_project(persistence: &mut Persistence, title: &str, budget: &str) -> i64 {
    create_project(
        persistence,
        &context(create_test_manager()),
        CreateProjectRequest {
            title: title.to_string(),
            manager: String::from("mgr-1"),
            location: String::from("Riyadh"),
            budget: budget.to_string(),
            start_date: String::from("2024-03-01"),
            end_date: Some(String::from("2024-12-31")),
        },
    )
    .expect("project should be created")
    .entity_id
}
