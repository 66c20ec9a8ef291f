// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Projects and budget tracking.

use crate::error::DomainError;
use crate::money::Money;
use crate::request::{Request, RequestStatus};
use crate::status::{StatusLifecycle, status_text};
use crate::types::EmployeeId;
use crate::validation::validate_date_range;
use serde::{Deserialize, Serialize};
use time::Date;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planned,
    Active,
    OnHold,
    Completed,
    Cancelled,
}

impl ProjectStatus {
    /// Returns true if technicians may be assigned and requests raised.
    #[must_use]
    pub const fn accepts_work(&self) -> bool {
        matches!(self, Self::Planned | Self::Active | Self::OnHold)
    }
}

impl StatusLifecycle for ProjectStatus {
    const ENTITY: &'static str = "project";
    const ALL: &'static [Self] = &[
        Self::Planned,
        Self::Active,
        Self::OnHold,
        Self::Completed,
        Self::Cancelled,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Planned => "planned",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Planned => &[Self::Active, Self::Cancelled],
            Self::Active => &[Self::OnHold, Self::Completed, Self::Cancelled],
            Self::OnHold => &[Self::Active, Self::Cancelled],
            Self::Completed | Self::Cancelled => &[],
        }
    }
}

status_text!(ProjectStatus);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Assigned by the database; `None` until persisted.
    pub project_id: Option<i64>,
    pub title: String,
    pub manager: EmployeeId,
    pub location: String,
    pub budget: Money,
    pub status: ProjectStatus,
    pub start_date: Date,
    pub end_date: Option<Date>,
}

impl Project {
    /// Creates a planned project.
    ///
    /// # Errors
    ///
    /// Returns an error if the title is blank, the budget is negative, or the
    /// end date precedes the start date.
    pub fn new(
        title: &str,
        manager: EmployeeId,
        location: &str,
        budget: Money,
        start_date: Date,
        end_date: Option<Date>,
    ) -> Result<Self, DomainError> {
        let title: &str = title.trim();
        if title.is_empty() {
            return Err(DomainError::InvalidProjectTitle(String::from(
                "Title cannot be empty",
            )));
        }
        if budget.is_negative() {
            return Err(DomainError::NegativeAmount {
                field: String::from("budget"),
            });
        }
        if let Some(end) = end_date {
            validate_date_range(start_date, end)?;
        }

        Ok(Self {
            project_id: None,
            title: title.to_string(),
            manager,
            location: location.trim().to_string(),
            budget,
            status: ProjectStatus::Planned,
            start_date,
            end_date,
        })
    }

    /// Returns a copy of the project in the new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle forbids the transition.
    pub fn transition(&self, status: ProjectStatus) -> Result<Self, DomainError> {
        self.status.validate_transition(status)?;
        Ok(Self {
            status,
            ..self.clone()
        })
    }

    /// Fails unless the project still accepts assignments and requests.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ProjectClosed` for completed or cancelled projects.
    pub fn ensure_accepts_work(&self) -> Result<(), DomainError> {
        if self.status.accepts_work() {
            return Ok(());
        }
        Err(DomainError::ProjectClosed {
            project_id: self.project_id.unwrap_or_default(),
            status: self.status.as_str().to_string(),
        })
    }
}

/// Budget position of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub budget: Money,
    /// Sum of approved request amounts charged to the project.
    pub committed: Money,
    /// `budget - committed`; negative when over budget.
    pub variance: Money,
    /// `committed / budget` in basis points (10000 = 100%). Zero for a zero budget.
    pub utilization_bp: i64,
    pub over_budget: bool,
}

/// Summarizes a project's budget against approved requests.
#[must_use]
pub fn summarize_budget(project: &Project, requests: &[Request]) -> BudgetSummary {
    let committed: Money = requests
        .iter()
        .filter(|r| r.project_id.is_some() && r.project_id == project.project_id)
        .filter(|r| r.status == RequestStatus::Approved)
        .filter_map(|r| r.amount)
        .sum();

    let utilization_bp: i64 = if project.budget.is_positive() {
        let ratio: i128 =
            i128::from(committed.minor()) * 10_000 / i128::from(project.budget.minor());
        i64::try_from(ratio).unwrap_or(i64::MAX)
    } else {
        0
    };

    BudgetSummary {
        budget: project.budget,
        committed,
        variance: project.budget - committed,
        utilization_bp,
        over_budget: committed > project.budget,
    }
}
