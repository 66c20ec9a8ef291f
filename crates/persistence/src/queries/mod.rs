// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `ledger`: Accounts, journal entries, posted ledger lines and balances
//! - `workflow`: Projects, task assignments and requests
//! - `workforce`: Payroll records and attendance
//! - `audit`: Audit events and timelines
//! - `state`: Tenant `State` reconstruction for the command core
//!
//! Every query is scoped by tenant.

pub mod audit;
pub mod ledger;
pub mod state;
pub mod workflow;
pub mod workforce;
