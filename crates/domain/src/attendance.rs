// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Geo-tagged attendance (check-in / check-out).

use crate::error::DomainError;
use crate::types::EmployeeId;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

const MICRODEGREES_PER_DEGREE: f64 = 1_000_000.0;

/// A WGS84 coordinate stored in micro-degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GeoPoint {
    latitude_micro: i32,
    longitude_micro: i32,
}

impl GeoPoint {
    /// Creates a point from decimal degrees.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if either value is not
    /// finite or lies outside `[-90, 90]` / `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, DomainError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(DomainError::InvalidCoordinates(format!(
                "longitude {longitude} is outside [-180, 180]"
            )));
        }

        let to_micro = |degrees: f64| (degrees * MICRODEGREES_PER_DEGREE).round().to_i32();
        match (to_micro(latitude), to_micro(longitude)) {
            (Some(latitude_micro), Some(longitude_micro)) => Ok(Self {
                latitude_micro,
                longitude_micro,
            }),
            _ => Err(DomainError::InvalidCoordinates(format!(
                "({latitude}, {longitude}) cannot be represented"
            ))),
        }
    }

    /// Rebuilds a point from stored micro-degrees.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCoordinates` if the values are out of range.
    pub fn from_micro(latitude_micro: i32, longitude_micro: i32) -> Result<Self, DomainError> {
        Self::new(
            f64::from(latitude_micro) / MICRODEGREES_PER_DEGREE,
            f64::from(longitude_micro) / MICRODEGREES_PER_DEGREE,
        )
    }

    #[must_use]
    pub fn latitude(&self) -> f64 {
        f64::from(self.latitude_micro) / MICRODEGREES_PER_DEGREE
    }

    #[must_use]
    pub fn longitude(&self) -> f64 {
        f64::from(self.longitude_micro) / MICRODEGREES_PER_DEGREE
    }

    #[must_use]
    pub const fn latitude_micro(&self) -> i32 {
        self.latitude_micro
    }

    #[must_use]
    pub const fn longitude_micro(&self) -> i32 {
        self.longitude_micro
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Assigned by the database; `None` until persisted.
    pub attendance_id: Option<i64>,
    pub employee: EmployeeId,
    pub check_in_at: OffsetDateTime,
    pub check_in_location: GeoPoint,
    pub check_out_at: Option<OffsetDateTime>,
    pub check_out_location: Option<GeoPoint>,
}

impl AttendanceRecord {
    /// Opens an attendance record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyCheckedIn` if the employee has an open
    /// record in `existing`.
    pub fn check_in(
        existing: &[Self],
        employee: EmployeeId,
        at: OffsetDateTime,
        location: GeoPoint,
    ) -> Result<Self, DomainError> {
        if existing
            .iter()
            .any(|record| record.employee == employee && record.is_open())
        {
            return Err(DomainError::AlreadyCheckedIn {
                employee: employee.value().to_string(),
            });
        }

        Ok(Self {
            attendance_id: None,
            employee,
            check_in_at: at,
            check_in_location: location,
            check_out_at: None,
            check_out_location: None,
        })
    }

    /// Closes this record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record is already closed or `at` precedes the
    /// check-in time.
    pub fn check_out(&self, at: OffsetDateTime, location: GeoPoint) -> Result<Self, DomainError> {
        if !self.is_open() {
            return Err(DomainError::NotCheckedIn {
                employee: self.employee.value().to_string(),
            });
        }
        if at < self.check_in_at {
            return Err(DomainError::CheckOutBeforeCheckIn);
        }

        Ok(Self {
            check_out_at: Some(at),
            check_out_location: Some(location),
            ..self.clone()
        })
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.check_out_at.is_none()
    }

    /// Whole minutes between check-in and check-out; `None` while open.
    #[must_use]
    pub fn worked_minutes(&self) -> Option<i64> {
        self.check_out_at
            .map(|out| (out - self.check_in_at).whole_minutes())
    }
}

/// Finds the employee's open attendance record.
#[must_use]
pub fn open_record<'a>(
    records: &'a [AttendanceRecord],
    employee: &EmployeeId,
) -> Option<&'a AttendanceRecord> {
    records
        .iter()
        .find(|record| &record.employee == employee && record.is_open())
}
