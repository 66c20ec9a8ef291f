// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Compact `key=value` renderings of records for the audit trail.

use fieldops_audit::StateSnapshot;
use fieldops_domain::{
    Account, AttendanceRecord, JournalEntry, JournalHeader, PayrollRecord, Project, Request,
    StatusLifecycle, TaskAssignment,
};

fn id_text(id: Option<i64>) -> String {
    id.map_or_else(|| String::from("new"), |id| id.to_string())
}

pub fn account(account: &Account) -> StateSnapshot {
    StateSnapshot::new(format!(
        "code={},type={},parent={}",
        account.code,
        account.account_type,
        account
            .parent_id
            .map_or_else(|| String::from("none"), |id| id.to_string())
    ))
}

pub fn journal_entry(entry: &JournalEntry) -> StateSnapshot {
    let totals = entry.totals();
    StateSnapshot::new(format!(
        "reference={},date={},status={},lines={},debit={},credit={}",
        entry.reference,
        entry.entry_date,
        entry.status,
        entry.lines.len(),
        totals.debit,
        totals.credit
    ))
}

pub fn journal_header(header: &JournalHeader) -> StateSnapshot {
    StateSnapshot::new(format!(
        "reference={},status={}",
        header.reference,
        header.status.as_str()
    ))
}

pub fn project(project: &Project) -> StateSnapshot {
    StateSnapshot::new(format!(
        "id={},title={},status={},budget={}",
        id_text(project.project_id),
        project.title,
        project.status,
        project.budget
    ))
}

pub fn assignment(assignment: &TaskAssignment) -> StateSnapshot {
    StateSnapshot::new(format!(
        "id={},project={},technician={},status={}",
        id_text(assignment.assignment_id),
        assignment.project_id,
        assignment.technician,
        assignment.status
    ))
}

pub fn request(request: &Request) -> StateSnapshot {
    StateSnapshot::new(format!(
        "id={},type={},requester={},status={},amount={}",
        id_text(request.request_id),
        request.request_type,
        request.requester,
        request.status,
        request
            .amount
            .map_or_else(|| String::from("none"), |a| a.to_string())
    ))
}

pub fn payroll(record: &PayrollRecord) -> StateSnapshot {
    StateSnapshot::new(format!(
        "id={},employee={},period={}..{},status={},net={}",
        id_text(record.payroll_id),
        record.employee,
        record.period_start,
        record.period_end,
        record.status,
        record.net_pay()
    ))
}

pub fn attendance(record: &AttendanceRecord) -> StateSnapshot {
    StateSnapshot::new(format!(
        "id={},employee={},check_in={},check_out={}",
        id_text(record.attendance_id),
        record.employee,
        record.check_in_at,
        record
            .check_out_at
            .map_or_else(|| String::from("open"), |at| at.to_string())
    ))
}
