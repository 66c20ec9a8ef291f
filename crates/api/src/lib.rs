// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the `FieldOps` backend.
//!
//! Authorization, request translation and response shaping live here. The
//! HTTP server is a thin adapter over these functions.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, RequestContext, Role, authenticate_stub};
pub use csv_export::{CsvExportError, LEDGER_CSV_HEADERS, ledger_to_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    assign_technician, change_journal_status, change_payroll_status, change_project_status,
    check_in, check_out, create_account, create_payroll_record, create_project, export_ledger_csv,
    get_account_tree, get_audit_event, get_audit_timeline, get_entity_history, get_ledger,
    get_trial_balance, get_workload, list_assignments, list_attendance, list_journal_entries, list_payroll_records,
    list_projects, list_requests, record_journal_entry, reply_to_request, respond_to_assignment,
    review_request, submit_request,
};
pub use request_response::{
    AccountNodeInfo, AccountTreeResponse, AssignTechnicianRequest, AssignmentInfo, AttendanceInfo,
    AttendanceRequest, AuditEventInfo, ChangeStatusRequest, CreateAccountRequest,
    CreatePayrollRequest, CreateProjectRequest, DeductionsInput, EarningsInput, JournalEntryInfo,
    JournalLineInfo, JournalLineInput, LedgerLineInfo, LedgerQuery, LedgerResponse,
    ListAssignmentsResponse, ListAttendanceResponse, ListJournalEntriesResponse,
    ListPayrollResponse, ListProjectsResponse, ListRequestsResponse, PayrollInfo, ProjectInfo,
    RecordJournalEntryRequest, ReplyToRequestRequest, RequestInfo, SubmitRequestRequest,
    TrialBalanceResponse, TrialBalanceRowInfo, WorkloadInfo, WorkloadResponse, WriteResponse,
};
