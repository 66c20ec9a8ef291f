// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Technician task assignments and workload.

use crate::error::DomainError;
use crate::status::{StatusLifecycle, status_text};
use crate::types::EmployeeId;
use crate::validation::normalize_notes;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAssignmentStatus {
    Pending,
    Accepted,
    Rejected,
    Clarification,
    Completed,
}

impl TaskAssignmentStatus {
    /// Open assignments count towards a technician's workload.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Pending | Self::Accepted | Self::Clarification)
    }
}

impl StatusLifecycle for TaskAssignmentStatus {
    const ENTITY: &'static str = "task assignment";
    const ALL: &'static [Self] = &[
        Self::Pending,
        Self::Accepted,
        Self::Rejected,
        Self::Clarification,
        Self::Completed,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Clarification => "clarification",
            Self::Completed => "completed",
        }
    }

    fn successors(&self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Accepted, Self::Rejected, Self::Clarification],
            Self::Clarification => &[Self::Pending, Self::Accepted, Self::Rejected],
            Self::Accepted => &[Self::Completed],
            Self::Rejected | Self::Completed => &[],
        }
    }
}

status_text!(TaskAssignmentStatus);

/// Links a technician to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignment {
    /// Assigned by the database; `None` until persisted.
    pub assignment_id: Option<i64>,
    pub project_id: i64,
    pub technician: EmployeeId,
    pub status: TaskAssignmentStatus,
    pub notes: Option<String>,
}

impl TaskAssignment {
    #[must_use]
    pub const fn new(project_id: i64, technician: EmployeeId) -> Self {
        Self {
            assignment_id: None,
            project_id,
            technician,
            status: TaskAssignmentStatus::Pending,
            notes: None,
        }
    }

    /// Records the technician's (or manager's) response.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not permitted or a clarification
    /// is requested without notes.
    pub fn respond(
        &self,
        status: TaskAssignmentStatus,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        self.status.validate_transition(status)?;

        let notes: Option<String> = normalize_notes(notes);
        if status == TaskAssignmentStatus::Clarification && notes.is_none() {
            return Err(DomainError::NotesRequired {
                entity: TaskAssignmentStatus::ENTITY,
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

/// Assignment counts for one technician.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicianWorkload {
    pub technician: EmployeeId,
    pub open: usize,
    pub completed: usize,
}

/// Counts open and completed assignments per technician.
///
/// Ordered by open count (descending), then technician id.
#[must_use]
pub fn compute_workload(assignments: &[TaskAssignment]) -> Vec<TechnicianWorkload> {
    let mut by_technician: BTreeMap<&EmployeeId, (usize, usize)> = BTreeMap::new();
    for assignment in assignments {
        let counts = by_technician.entry(&assignment.technician).or_default();
        if assignment.status.is_open() {
            counts.0 += 1;
        } else if assignment.status == TaskAssignmentStatus::Completed {
            counts.1 += 1;
        }
    }

    let mut workload: Vec<TechnicianWorkload> = by_technician
        .into_iter()
        .map(|(technician, (open, completed))| TechnicianWorkload {
            technician: technician.clone(),
            open,
            completed,
        })
        .collect();
    // Stable sort keeps the BTreeMap's technician order for ties.
    workload.sort_by(|a, b| b.open.cmp(&a.open));
    workload
}
