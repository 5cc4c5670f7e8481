//! Employee domain model.
//!
//! # Responsibility
//! - Define the employee record and its role enumeration.
//! - Provide the canonical text mapping for roles used by storage and wire.
//!
//! # Invariants
//! - `employee_id` is positive and supplied by the caller.
//! - `reports_to == None` marks a hierarchy root.
//! - An employee never reports to itself.

use crate::model::validation::{ensure_positive_id, ModelValidationError};

/// Identifier of one employee row.
pub type EmployeeId = i64;

/// Organizational role of an employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Manager,
    Boss,
    /// Default role for newly constructed employees.
    #[default]
    Specialist,
    Technician,
}

impl Role {
    /// All roles, in declaration order.
    pub const ALL: [Role; 4] = [Role::Manager, Role::Boss, Role::Specialist, Role::Technician];

    /// Canonical text form used by the `employees.role` column and JSON.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Manager => "Manager",
            Role::Boss => "Boss",
            Role::Specialist => "Specialist",
            Role::Technician => "Technician",
        }
    }

    /// Parses canonical role text.
    ///
    /// Returns `None` for unknown values. Callers must surface that as a
    /// data-integrity error; substituting a default role is not allowed.
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            "Manager" => Some(Role::Manager),
            "Boss" => Some(Role::Boss),
            "Specialist" => Some(Role::Specialist),
            "Technician" => Some(Role::Technician),
            _ => None,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| ModelValidationError::UnknownRole(s.to_string()))
    }
}

/// Canonical employee record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    /// Primary key, also the join key for reviews and `reports_to`.
    pub employee_id: EmployeeId,
    /// Organization-external code. Not unique.
    pub personnel_code: i64,
    pub name: String,
    /// Free-form hire date text as supplied by the caller.
    pub hire_date: String,
    pub role: Role,
    /// Soft-delete flag. `false` after deactivation.
    pub is_active: bool,
    /// Direct manager id. `None` means the employee is a hierarchy root.
    pub reports_to: Option<EmployeeId>,
}

impl Employee {
    /// Creates an active `Specialist` with no manager.
    pub fn new(employee_id: EmployeeId, name: impl Into<String>) -> Self {
        Self {
            employee_id,
            personnel_code: 0,
            name: name.into(),
            hire_date: String::new(),
            role: Role::default(),
            is_active: true,
            reports_to: None,
        }
    }

    /// Builder-style role setter.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Builder-style manager setter.
    pub fn reporting_to(mut self, manager_id: EmployeeId) -> Self {
        self.reports_to = Some(manager_id);
        self
    }

    /// Builder-style hire date setter.
    pub fn with_hire_date(mut self, hire_date: impl Into<String>) -> Self {
        self.hire_date = hire_date.into();
        self
    }

    /// Builder-style personnel code setter.
    pub fn with_personnel_code(mut self, personnel_code: i64) -> Self {
        self.personnel_code = personnel_code;
        self
    }

    /// Returns whether this employee is a hierarchy root.
    pub fn is_root(&self) -> bool {
        self.reports_to.is_none()
    }

    /// Checks invariants required before persistence or publishing.
    ///
    /// # Errors
    /// - `NonPositiveId` when `employee_id` or `reports_to` is not positive.
    /// - `EmptyField("name")` when the name is blank.
    /// - `SelfReport` when `reports_to == employee_id`.
    pub fn validate(&self) -> Result<(), ModelValidationError> {
        ensure_positive_id("employee_id", self.employee_id)?;
        if self.name.trim().is_empty() {
            return Err(ModelValidationError::EmptyField("name"));
        }
        if let Some(manager_id) = self.reports_to {
            ensure_positive_id("reports_to", manager_id)?;
            if manager_id == self.employee_id {
                return Err(ModelValidationError::SelfReport(self.employee_id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Employee, Role};
    use crate::model::validation::ModelValidationError;

    #[test]
    fn role_text_mapping_is_invertible() {
        for role in Role::ALL {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
    }

    #[test]
    fn unknown_role_text_is_not_defaulted() {
        assert_eq!(Role::parse("specialist"), None);
        assert_eq!(Role::parse(""), None);
        let err = "Janitor".parse::<Role>().unwrap_err();
        assert_eq!(err, ModelValidationError::UnknownRole("Janitor".to_string()));
    }

    #[test]
    fn new_employee_uses_defaults() {
        let employee = Employee::new(7, "Dana");
        assert_eq!(employee.role, Role::Specialist);
        assert!(employee.is_active);
        assert!(employee.is_root());
    }

    #[test]
    fn validate_rejects_bad_ids_and_self_report() {
        assert!(matches!(
            Employee::new(0, "Zero").validate(),
            Err(ModelValidationError::NonPositiveId { field: "employee_id", value: 0 })
        ));
        assert!(matches!(
            Employee::new(3, "Loop").reporting_to(3).validate(),
            Err(ModelValidationError::SelfReport(3))
        ));
        assert!(matches!(
            Employee::new(3, "Neg").reporting_to(-1).validate(),
            Err(ModelValidationError::NonPositiveId { field: "reports_to", .. })
        ));
        assert!(matches!(
            Employee::new(3, "   ").validate(),
            Err(ModelValidationError::EmptyField("name"))
        ));
    }
}
