//! Employees and the roles that govern planning rules.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::types::{EmployeeId, EmployeeName, TypeConstraintError};

/// Role of the signed-in user as far as planning is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Field sales advisor planning their own weeks.
    Advisor,
    /// Supervisor allowed to plan any week for any advisor.
    Administrator,
}

impl Role {
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Advisor => write!(f, "advisor"),
            Role::Administrator => write!(f, "administrator"),
        }
    }
}

impl FromStr for Role {
    type Err = TypeConstraintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "advisor" | "asesor" => Ok(Role::Advisor),
            "admin" | "administrator" | "administrador" => Ok(Role::Administrator),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "unknown role {other}"
            ))),
        }
    }
}

/// Identity returned by the session collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: EmployeeId,
    pub role: Role,
}

impl CurrentUser {
    #[must_use]
    pub fn new(id: EmployeeId, role: Role) -> Self {
        Self { id, role }
    }

    /// Whether this user may plan or inspect weeks of `employee_id`.
    pub fn can_act_for(&self, employee_id: EmployeeId) -> bool {
        self.role.is_admin() || self.id == employee_id
    }
}

/// Employee record from the external directory.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: EmployeeName,
    pub role: Role,
    /// Job title shown next to the name in pickers.
    #[serde(default)]
    pub position: Option<String>,
}
