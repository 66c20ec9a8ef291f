// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll and attendance mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use fieldops_domain::{AttendanceRecord, PayrollRecord, StatusLifecycle, TenantId};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::data_models::{format_date, format_timestamp};
use crate::diesel_schema::{attendance_records, payroll_records};
use crate::error::PersistenceError;
use crate::mutations::ensure_updated;

/// Inserts a payroll record or updates its status and notes.
///
/// Earnings and deductions are fixed at creation.
///
/// # Errors
///
/// Returns an error if the statement fails or an update matches no row.
pub fn save_payroll_record(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    record: &PayrollRecord,
) -> Result<i64, PersistenceError> {
    if let Some(payroll_id) = record.payroll_id {
        let affected: usize = diesel::update(
            payroll_records::table
                .filter(payroll_records::payroll_id.eq(payroll_id))
                .filter(payroll_records::tenant.eq(tenant.value())),
        )
        .set((
            payroll_records::status.eq(record.status.as_str()),
            payroll_records::notes.eq(record.notes.as_deref()),
        ))
        .execute(conn)?;
        ensure_updated(affected, "payroll record", payroll_id)?;
        debug!(payroll_id, status = %record.status, "Updated payroll record");
        return Ok(payroll_id);
    }

    let earnings = &record.earnings;
    let deductions = &record.deductions;
    diesel::insert_into(payroll_records::table)
        .values((
            (
                payroll_records::tenant.eq(tenant.value()),
                payroll_records::employee.eq(record.employee.value()),
                payroll_records::period_start.eq(format_date(record.period_start)),
                payroll_records::period_end.eq(format_date(record.period_end)),
                payroll_records::status.eq(record.status.as_str()),
                payroll_records::notes.eq(record.notes.as_deref()),
            ),
            (
                payroll_records::basic.eq(earnings.basic.minor()),
                payroll_records::housing.eq(earnings.housing.minor()),
                payroll_records::transport.eq(earnings.transport.minor()),
                payroll_records::overtime.eq(earnings.overtime.minor()),
                payroll_records::other_earnings.eq(earnings.other.minor()),
            ),
            (
                payroll_records::social_insurance.eq(deductions.social_insurance.minor()),
                payroll_records::tax.eq(deductions.tax.minor()),
                payroll_records::loans.eq(deductions.loans.minor()),
                payroll_records::absence.eq(deductions.absence.minor()),
                payroll_records::other_deductions.eq(deductions.other.minor()),
            ),
        ))
        .execute(conn)?;
    let payroll_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        payroll_id,
        employee = %record.employee,
        net_pay = %record.net_pay(),
        "Inserted payroll record"
    );
    Ok(payroll_id)
}

/// Inserts a check-in, or records the check-out of an existing record.
///
/// # Errors
///
/// Returns an error if the statement fails or an update matches no row.
pub fn save_attendance(
    conn: &mut SqliteConnection,
    tenant: &TenantId,
    record: &AttendanceRecord,
) -> Result<i64, PersistenceError> {
    let check_out_at: Option<String> = record.check_out_at.map(format_timestamp).transpose()?;

    if let Some(attendance_id) = record.attendance_id {
        let affected: usize = diesel::update(
            attendance_records::table
                .filter(attendance_records::attendance_id.eq(attendance_id))
                .filter(attendance_records::tenant.eq(tenant.value())),
        )
        .set((
            attendance_records::check_out_at.eq(check_out_at),
            attendance_records::check_out_latitude
                .eq(record.check_out_location.map(|p| p.latitude_micro())),
            attendance_records::check_out_longitude
                .eq(record.check_out_location.map(|p| p.longitude_micro())),
        ))
        .execute(conn)?;
        ensure_updated(affected, "attendance record", attendance_id)?;
        debug!(attendance_id, employee = %record.employee, "Recorded check-out");
        return Ok(attendance_id);
    }

    diesel::insert_into(attendance_records::table)
        .values((
            attendance_records::tenant.eq(tenant.value()),
            attendance_records::employee.eq(record.employee.value()),
            attendance_records::check_in_at.eq(format_timestamp(record.check_in_at)?),
            attendance_records::check_in_latitude.eq(record.check_in_location.latitude_micro()),
            attendance_records::check_in_longitude.eq(record.check_in_location.longitude_micro()),
        ))
        .execute(conn)?;
    let attendance_id: i64 = conn.get_last_insert_rowid()?;
    debug!(attendance_id, employee = %record.employee, "Recorded check-in");
    Ok(attendance_id)
}
