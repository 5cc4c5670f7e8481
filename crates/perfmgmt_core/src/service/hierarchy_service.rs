//! Employee hierarchy walks.
//!
//! # Responsibility
//! - Resolve an employee's manager and full management chain.
//! - Collect the transitive set of reports below one employee.
//!
//! # Invariants
//! - Every walk is bounded by `MAX_HIERARCHY_DEPTH` and tracks visited ids,
//!   so cyclic or dangling persisted data yields an error instead of looping.

use crate::model::employee::{Employee, EmployeeId};
use crate::repo::employee_repo::{EmployeeRepository, MAX_HIERARCHY_DEPTH};
use crate::repo::error::{Entity, RepoError};
use log::warn;
use std::collections::{HashSet, VecDeque};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type HierarchyResult<T> = Result<T, HierarchyError>;

/// Errors from hierarchy walks.
#[derive(Debug)]
pub enum HierarchyError {
    Repo(RepoError),
    /// The walk revisited an employee already on the path.
    CycleDetected(EmployeeId),
    /// The walk exceeded `MAX_HIERARCHY_DEPTH` levels.
    DepthExceeded(u32),
    /// `reports_to` names an employee that is not stored.
    DanglingManager {
        employee_id: EmployeeId,
        manager_id: EmployeeId,
    },
}

impl Display for HierarchyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::CycleDetected(id) => write!(f, "reporting cycle detected at employee {id}"),
            Self::DepthExceeded(limit) => {
                write!(f, "reporting hierarchy deeper than {limit} levels")
            }
            Self::DanglingManager {
                employee_id,
                manager_id,
            } => write!(
                f,
                "employee {employee_id} reports to missing employee {manager_id}"
            ),
        }
    }
}

impl Error for HierarchyError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::CycleDetected(_) | Self::DepthExceeded(_) | Self::DanglingManager { .. } => None,
        }
    }
}

impl From<RepoError> for HierarchyError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Read-side service over the `reports_to` forest.
pub struct HierarchyService<R: EmployeeRepository> {
    repo: R,
}

impl<R: EmployeeRepository> HierarchyService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the direct manager of `employee_id`, or `None` for a root.
    ///
    /// Fails with `RepoError::NotFound` when the employee itself is missing.
    pub fn manager_of(&self, employee_id: EmployeeId) -> HierarchyResult<Option<Employee>> {
        let employee = self.require(employee_id)?;
        match employee.reports_to {
            Some(manager_id) => Ok(Some(self.load_manager(employee_id, manager_id)?)),
            None => Ok(None),
        }
    }

    /// Returns managers from the direct manager up to the hierarchy root.
    pub fn management_chain(&self, employee_id: EmployeeId) -> HierarchyResult<Vec<Employee>> {
        let mut current = self.require(employee_id)?;
        let mut visited = HashSet::from([employee_id]);
        let mut chain = Vec::new();

        while let Some(manager_id) = current.reports_to {
            if !visited.insert(manager_id) {
                warn!(
                    "event=hierarchy_walk module=service status=error error_code=cycle employee_id={employee_id} at={manager_id}"
                );
                return Err(HierarchyError::CycleDetected(manager_id));
            }
            if chain.len() as u32 >= MAX_HIERARCHY_DEPTH {
                return Err(HierarchyError::DepthExceeded(MAX_HIERARCHY_DEPTH));
            }
            let manager = self.load_manager(current.employee_id, manager_id)?;
            chain.push(manager.clone());
            current = manager;
        }

        Ok(chain)
    }

    /// Returns the hierarchy root above `employee_id` (itself when it is a root).
    pub fn root_of(&self, employee_id: EmployeeId) -> HierarchyResult<Employee> {
        match self.management_chain(employee_id)?.pop() {
            Some(root) => Ok(root),
            None => Ok(self.require(employee_id)?),
        }
    }

    /// Returns every employee below `manager_id`, breadth-first.
    pub fn all_reports(&self, manager_id: EmployeeId) -> HierarchyResult<Vec<Employee>> {
        let mut visited = HashSet::from([manager_id]);
        let mut queue = VecDeque::from([(manager_id, 0_u32)]);
        let mut reports = Vec::new();

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= MAX_HIERARCHY_DEPTH {
                return Err(HierarchyError::DepthExceeded(MAX_HIERARCHY_DEPTH));
            }
            for report in self.repo.get_employees_reporting_to_head(current)? {
                if !visited.insert(report.employee_id) {
                    return Err(HierarchyError::CycleDetected(report.employee_id));
                }
                queue.push_back((report.employee_id, depth + 1));
                reports.push(report);
            }
        }

        Ok(reports)
    }

    fn require(&self, employee_id: EmployeeId) -> HierarchyResult<Employee> {
        self.repo.get_employee(employee_id)?.ok_or_else(|| {
            HierarchyError::Repo(RepoError::NotFound {
                entity: Entity::Employee,
                id: employee_id,
            })
        })
    }

    fn load_manager(
        &self,
        employee_id: EmployeeId,
        manager_id: EmployeeId,
    ) -> HierarchyResult<Employee> {
        self.repo
            .get_employee(manager_id)?
            .ok_or(HierarchyError::DanglingManager {
                employee_id,
                manager_id,
            })
    }
}
