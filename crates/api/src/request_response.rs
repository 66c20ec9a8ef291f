// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Amounts travel as decimal strings (`"1234.50"`), dates as `YYYY-MM-DD`
//! and timestamps as RFC 3339.

use serde::{Deserialize, Serialize};

// ============================================================================
// Requests
// ============================================================================

/// API request to add an account to the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateAccountRequest {
    pub code: String,
    pub name_en: String,
    #[serde(default)]
    pub name_ar: Option<String>,
    /// One of asset, liability, equity, revenue, expense.
    pub account_type: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
}

/// One line of a journal entry request. A missing side is zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineInput {
    pub account_id: i64,
    #[serde(default)]
    pub debit: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
    #[serde(default)]
    pub memo: Option<String>,
}

/// API request to record a journal entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordJournalEntryRequest {
    pub entry_date: String,
    pub reference: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Defaults to `draft`.
    #[serde(default)]
    pub status: Option<String>,
    pub lines: Vec<JournalLineInput>,
}

/// API request to move a record to another lifecycle status.
///
/// Shared by journal entries, projects, assignments, request reviews and
/// payroll records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// API request to open a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub manager: String,
    pub location: String,
    pub budget: String,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
}

/// API request to assign a technician to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignTechnicianRequest {
    pub project_id: i64,
    pub technician: String,
}

/// API request to submit a material, custody, expense, leave or manpower
/// request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequestRequest {
    pub request_type: String,
    /// Defaults to the acting employee.
    #[serde(default)]
    pub requester: Option<String>,
    #[serde(default)]
    pub project_id: Option<i64>,
    #[serde(default)]
    pub amount: Option<String>,
    pub description: String,
    pub submitted_on: String,
}

/// API request answering a clarification question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyToRequestRequest {
    pub reply: String,
}

/// Earnings components. Missing or malformed components are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsInput {
    #[serde(default)]
    pub basic: Option<String>,
    #[serde(default)]
    pub housing: Option<String>,
    #[serde(default)]
    pub transport: Option<String>,
    #[serde(default)]
    pub overtime: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
}

/// Deduction components. Missing or malformed components are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionsInput {
    #[serde(default)]
    pub social_insurance: Option<String>,
    #[serde(default)]
    pub tax: Option<String>,
    #[serde(default)]
    pub loans: Option<String>,
    #[serde(default)]
    pub absence: Option<String>,
    #[serde(default)]
    pub other: Option<String>,
}

/// API request to create a payroll record for one employee and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePayrollRequest {
    pub employee: String,
    pub period_start: String,
    pub period_end: String,
    #[serde(default)]
    pub earnings: EarningsInput,
    #[serde(default)]
    pub deductions: DeductionsInput,
}

/// API request to check in or out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRequest {
    /// Defaults to the acting employee.
    #[serde(default)]
    pub employee: Option<String>,
    /// RFC 3339 timestamp; defaults to the time the request is handled.
    #[serde(default)]
    pub at: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Query for the general ledger of one account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerQuery {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

/// API response for every state-changing operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// The id of the record that was written.
    pub entity_id: i64,
    /// The id of the audit event recorded with it.
    pub event_id: i64,
    pub message: String,
}

/// A node in the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountNodeInfo {
    pub account_id: Option<i64>,
    pub code: String,
    /// The name in the requested locale.
    pub name: String,
    pub account_type: String,
    pub normal_side: String,
    pub balance: String,
    pub rolled_up_balance: String,
    pub children: Vec<Self>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountTreeResponse {
    pub locale: String,
    pub as_of: Option<String>,
    pub accounts: Vec<AccountNodeInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLineInfo {
    pub line_id: Option<i64>,
    pub account_id: i64,
    pub debit: String,
    pub credit: String,
    pub memo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntryInfo {
    pub entry_id: Option<i64>,
    pub entry_date: String,
    pub reference: String,
    pub description: String,
    pub status: String,
    pub total_debit: String,
    pub total_credit: String,
    pub balanced: bool,
    pub lines: Vec<JournalLineInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListJournalEntriesResponse {
    pub entries: Vec<JournalEntryInfo>,
}

/// One ledger row with the running balance after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerLineInfo {
    pub date: String,
    pub entry_id: Option<i64>,
    pub reference: String,
    pub description: String,
    pub debit: String,
    pub credit: String,
    /// The line's effect on the balance, signed by the account's normal side.
    pub signed_amount: String,
    pub balance: String,
}

/// General ledger of one account over a date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerResponse {
    pub account_id: i64,
    pub code: String,
    pub name: String,
    pub normal_side: String,
    pub from: Option<String>,
    pub to: Option<String>,
    pub opening_balance: String,
    pub closing_balance: String,
    pub total_debit: String,
    pub total_credit: String,
    pub lines: Vec<LedgerLineInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceRowInfo {
    pub account_id: Option<i64>,
    pub code: String,
    pub name: String,
    pub debit: String,
    pub credit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialBalanceResponse {
    pub as_of: Option<String>,
    pub rows: Vec<TrialBalanceRowInfo>,
    pub total_debit: String,
    pub total_credit: String,
    pub balanced: bool,
}

/// A project with its budget position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub project_id: Option<i64>,
    pub title: String,
    pub manager: String,
    pub location: String,
    pub status: String,
    pub start_date: String,
    pub end_date: Option<String>,
    pub budget: String,
    pub committed: String,
    pub variance: String,
    /// Utilization as a percentage with two decimals, e.g. `"60.00"`.
    pub utilization_percent: String,
    pub over_budget: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListProjectsResponse {
    pub projects: Vec<ProjectInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInfo {
    pub assignment_id: Option<i64>,
    pub project_id: i64,
    pub technician: String,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAssignmentsResponse {
    pub assignments: Vec<AssignmentInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadInfo {
    pub technician: String,
    pub open: usize,
    pub completed: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkloadResponse {
    pub technicians: Vec<WorkloadInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestInfo {
    pub request_id: Option<i64>,
    pub request_type: String,
    pub requester: String,
    pub project_id: Option<i64>,
    pub amount: Option<String>,
    pub description: String,
    pub status: String,
    pub review_notes: Option<String>,
    pub reply: Option<String>,
    pub reviewed_by: Option<String>,
    pub submitted_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRequestsResponse {
    pub requests: Vec<RequestInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollInfo {
    pub payroll_id: Option<i64>,
    pub employee: String,
    pub period_start: String,
    pub period_end: String,
    pub gross: String,
    pub total_deductions: String,
    pub net_pay: String,
    pub status: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListPayrollResponse {
    pub records: Vec<PayrollInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceInfo {
    pub attendance_id: Option<i64>,
    pub employee: String,
    pub check_in_at: String,
    pub check_in_latitude: f64,
    pub check_in_longitude: f64,
    pub check_out_at: Option<String>,
    pub worked_minutes: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListAttendanceResponse {
    pub records: Vec<AttendanceInfo>,
}

/// Serializable representation of an audit event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEventInfo {
    pub event_id: Option<i64>,
    pub tenant: String,
    pub entity_kind: String,
    pub entity_id: Option<i64>,
    pub actor_id: String,
    pub actor_type: String,
    pub cause_id: String,
    pub cause_description: String,
    pub action_name: String,
    pub action_details: Option<String>,
    pub before_snapshot: String,
    pub after_snapshot: String,
    pub created_at: Option<String>,
}
