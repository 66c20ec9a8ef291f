// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payroll records for a pay cycle.
//!
//! Gross pay, total deductions and net pay are always derived from the
//! component breakdown and never stored independently.

use crate::error::DomainError;
use crate::money::Money;
use crate::status::{StatusLifecycle, status_text};
use crate::types::EmployeeId;
use crate::validation::{normalize_notes, validate_date_range};
use serde::{Deserialize, Serialize};
use time::Date;

/// Earnings components of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Earnings {
    pub basic: Money,
    pub housing: Money,
    pub transport: Money,
    pub overtime: Money,
    pub other: Money,
}

impl Earnings {
    #[must_use]
    pub fn total(&self) -> Money {
        self.basic + self.housing + self.transport + self.overtime + self.other
    }

    fn components(&self) -> [(&'static str, Money); 5] {
        [
            ("basic", self.basic),
            ("housing", self.housing),
            ("transport", self.transport),
            ("overtime", self.overtime),
            ("other_earnings", self.other),
        ]
    }
}

/// Deduction components of a payroll record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Deductions {
    pub social_insurance: Money,
    pub tax: Money,
    pub loans: Money,
    pub absence: Money,
    pub other: Money,
}

impl Deductions {
    #[must_use]
    pub fn total(&self) -> Money {
        self.social_insurance + self.tax + self.loans + self.absence + self.other
    }

    fn components(&self) -> [(&'static str, Money); 5] {
        [
            ("social_insurance", self.social_insurance),
            ("tax", self.tax),
            ("loans", self.loans),
            ("absence", self.absence),
            ("other_deductions", self.other),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PayrollStatus {
    Draft,
    UnderReview,
    Approved,
    Paid,
    Failed,
}

impl StatusLifecycle for PayrollStatus {
    const ENTITY: &'static str = "payroll record";
    const ALL: &'static [Self] = &[
        Self::Draft,
        Self::UnderReview,
        Self::Approved,
        Self::Paid,
        Self::Failed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Paid => "paid",
            Self::Failed => "failed",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Draft => &[Self::UnderReview],
            Self::UnderReview => &[Self::Approved, Self::Draft],
            Self::Approved => &[Self::Paid, Self::Failed],
            Self::Failed => &[Self::Draft],
            Self::Paid => &[],
        }
    }
}

status_text!(PayrollStatus);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// Assigned by the database; `None` until persisted.
    pub payroll_id: Option<i64>,
    pub employee: EmployeeId,
    pub period_start: Date,
    pub period_end: Date,
    pub earnings: Earnings,
    pub deductions: Deductions,
    pub status: PayrollStatus,
    /// Reason recorded with the most recent failure or return to draft.
    pub notes: Option<String>,
}

impl PayrollRecord {
    /// Creates a draft payroll record.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The pay cycle ends before it starts
    /// - Any component is negative
    /// - Deductions exceed gross earnings
    pub fn new(
        employee: EmployeeId,
        period_start: Date,
        period_end: Date,
        earnings: Earnings,
        deductions: Deductions,
    ) -> Result<Self, DomainError> {
        validate_date_range(period_start, period_end)?;

        if let Some((field, _)) = earnings
            .components()
            .into_iter()
            .chain(deductions.components())
            .find(|(_, amount)| amount.is_negative())
        {
            return Err(DomainError::NegativeAmount {
                field: field.to_string(),
            });
        }

        let gross: Money = earnings.total();
        let total_deductions: Money = deductions.total();
        if total_deductions > gross {
            return Err(DomainError::NegativeNetPay {
                gross,
                deductions: total_deductions,
            });
        }

        Ok(Self {
            payroll_id: None,
            employee,
            period_start,
            period_end,
            earnings,
            deductions,
            status: PayrollStatus::Draft,
            notes: None,
        })
    }

    #[must_use]
    pub fn gross(&self) -> Money {
        self.earnings.total()
    }

    #[must_use]
    pub fn total_deductions(&self) -> Money {
        self.deductions.total()
    }

    #[must_use]
    pub fn net_pay(&self) -> Money {
        self.gross() - self.total_deductions()
    }

    /// Returns a copy of the record in the new status.
    ///
    /// A failed payment must carry a reason.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle forbids the transition or a failure
    /// has no reason.
    pub fn transition(
        &self,
        status: PayrollStatus,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        self.status.validate_transition(status)?;

        let notes: Option<String> = normalize_notes(notes);
        if status == PayrollStatus::Failed && notes.is_none() {
            return Err(DomainError::NotesRequired {
                entity: PayrollStatus::ENTITY,
                status: status.as_str().to_string(),
            });
        }

        Ok(Self {
            status,
            notes: notes.or_else(|| self.notes.clone()),
            ..self.clone()
        })
    }
}
