// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication and authorization types and services.

use fieldops_audit::{Actor, Cause};
use fieldops_domain::{EmployeeId, TenantId};
use std::str::FromStr;

use crate::error::AuthError;

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full authority over every operation in the tenant.
    Admin,
    /// Finance staff: chart of accounts, journal entries and payroll.
    Accountant,
    /// Project managers: projects, assignments and request review.
    Manager,
    /// Field staff and technicians.
    ///
    /// Employees may:
    /// - submit requests and answer clarification questions on their own requests
    /// - respond to their own task assignments
    /// - check in and out of attendance for themselves
    Employee,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Accountant => "accountant",
            Self::Manager => "manager",
            Self::Employee => "employee",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AuthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "accountant" => Ok(Self::Accountant),
            "manager" => Ok(Self::Manager),
            "employee" => Ok(Self::Employee),
            _ => Err(AuthError::AuthenticationFailed {
                reason: format!(
                    "Invalid role: '{s}'. Must be one of admin, accountant, manager, employee"
                ),
            }),
        }
    }
}

/// An authenticated actor with an associated role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor. For employees this is also
    /// their employee id.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }

    /// Whether this actor is the given employee.
    #[must_use]
    pub fn is_employee(&self, employee: &EmployeeId) -> bool {
        self.id == employee.value()
    }
}

/// Who is acting, on which tenant, and why.
///
/// Every state-changing API function takes one of these instead of reading
/// ambient session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub tenant: TenantId,
    pub actor: AuthenticatedActor,
    pub cause: Cause,
}

impl RequestContext {
    #[must_use]
    pub const fn new(tenant: TenantId, actor: AuthenticatedActor, cause: Cause) -> Self {
        Self {
            tenant,
            actor,
            cause,
        }
    }
}

/// Stub authentication.
///
/// Real credential checks are out of scope; identity arrives with the
/// request and is only checked for presence.
///
/// # Errors
///
/// Returns an error if the actor id is empty.
pub fn authenticate_stub(actor_id: String, role: Role) -> Result<AuthenticatedActor, AuthError> {
    if actor_id.trim().is_empty() {
        return Err(AuthError::AuthenticationFailed {
            reason: String::from("Actor ID cannot be empty"),
        });
    }
    Ok(AuthenticatedActor::new(actor_id, role))
}

fn require(actor: &AuthenticatedActor, action: &str, allowed: &[Role]) -> Result<(), AuthError> {
    if allowed.contains(&actor.role) {
        return Ok(());
    }
    Err(AuthError::Unauthorized {
        action: action.to_string(),
        required_role: allowed
            .iter()
            .map(Role::as_str)
            .collect::<Vec<&str>>()
            .join(" or "),
    })
}

/// Authorization service for enforcing role-based access control.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Only Admin and Accountant actors may maintain the chart of accounts.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has another role.
    pub fn authorize_create_account(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require(actor, "create_account", &[Role::Admin, Role::Accountant])
    }

    /// Only Admin and Accountant actors may record or change journal entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has another role.
    pub fn authorize_journal(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require(actor, "journal_entry", &[Role::Admin, Role::Accountant])
    }

    /// Only Admin and Manager actors may create or transition projects.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has another role.
    pub fn authorize_manage_project(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require(actor, "manage_project", &[Role::Admin, Role::Manager])
    }

    /// Only Admin and Manager actors may assign technicians.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has another role.
    pub fn authorize_assign_technician(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require(actor, "assign_technician", &[Role::Admin, Role::Manager])
    }

    /// Technicians respond to their own assignments; managers and admins may
    /// respond on anyone's behalf.
    ///
    /// # Errors
    ///
    /// Returns an error if an employee responds to someone else's assignment.
    pub fn authorize_respond_to_assignment(
        actor: &AuthenticatedActor,
        technician: &EmployeeId,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Employee && !actor.is_employee(technician) {
            return Err(AuthError::Unauthorized {
                action: String::from("respond_to_assignment"),
                required_role: String::from("assigned technician, manager or admin"),
            });
        }
        Ok(())
    }

    /// Employees submit requests for themselves; other roles may submit on
    /// behalf of any employee.
    ///
    /// # Errors
    ///
    /// Returns an error if an employee submits for someone else.
    pub fn authorize_submit_request(
        actor: &AuthenticatedActor,
        requester: &EmployeeId,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Employee && !actor.is_employee(requester) {
            return Err(AuthError::Unauthorized {
                action: String::from("submit_request"),
                required_role: String::from("requester, manager, accountant or admin"),
            });
        }
        Ok(())
    }

    /// Only Admin and Manager actors may review requests.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has another role.
    pub fn authorize_review_request(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require(actor, "review_request", &[Role::Admin, Role::Manager])
    }

    /// Only the original requester may answer a clarification question.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor did not submit the request.
    pub fn authorize_reply_to_request(
        actor: &AuthenticatedActor,
        requester: &EmployeeId,
    ) -> Result<(), AuthError> {
        if actor.is_employee(requester) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("reply_to_request"),
            required_role: String::from("original requester"),
        })
    }

    /// Only Admin and Accountant actors may manage payroll.
    ///
    /// # Errors
    ///
    /// Returns an error if the actor has another role.
    pub fn authorize_payroll(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        require(actor, "payroll", &[Role::Admin, Role::Accountant])
    }

    /// Employees record attendance for themselves; admins may record it for
    /// anyone.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-admin records attendance for someone else.
    pub fn authorize_attendance(
        actor: &AuthenticatedActor,
        employee: &EmployeeId,
    ) -> Result<(), AuthError> {
        if actor.role == Role::Admin || actor.is_employee(employee) {
            return Ok(());
        }
        Err(AuthError::Unauthorized {
            action: String::from("attendance"),
            required_role: String::from("the employee themselves or admin"),
        })
    }
}
