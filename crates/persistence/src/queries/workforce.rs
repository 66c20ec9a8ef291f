// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll and attendance queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops_domain::{AttendanceRecord, EmployeeId, PayrollRecord, TenantId};

use crate::data_models::{AttendanceRow, PayrollRow};
use crate::diesel_schema::{attendance_records, payroll_records};
use crate::error::PersistenceError;

/// Lists payroll records, most recent pay cycle first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_payroll_records(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<PayrollRecord>, PersistenceError> {
    payroll_records::table
        .filter(payroll_records::tenant.eq(tenant.value()))
        .order((
            payroll_records::period_start.desc(),
            payroll_records::employee.asc(),
        ))
        .select(PayrollRow::as_select())
        .load::<PayrollRow>(conn)?
        .into_iter()
        .map(PayrollRecord::try_from)
        .collect()
}

/// Lists attendance records that have no check-out yet.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_open_attendance(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
) -> Result<Vec<AttendanceRecord>, PersistenceError> {
    attendance_records::table
        .filter(attendance_records::tenant.eq(tenant.value()))
        .filter(attendance_records::check_out_at.is_null())
        .order(attendance_records::attendance_id.asc())
        .select(AttendanceRow::as_select())
        .load::<AttendanceRow>(conn)?
        .into_iter()
        .map(AttendanceRecord::try_from)
        .collect()
}

/// Lists an employee's attendance history, newest check-in first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be converted.
pub fn list_attendance_for_employee(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    employee: &EmployeeId,
) -> Result<Vec<AttendanceRecord>, PersistenceError> {
    attendance_records::table
        .filter(attendance_records::tenant.eq(tenant.value()))
        .filter(attendance_records::employee.eq(employee.value()))
        .order(attendance_records::attendance_id.desc())
        .select(AttendanceRow::as_select())
        .load::<AttendanceRow>(conn)?
        .into_iter()
        .map(AttendanceRecord::try_from)
        .collect()
}
