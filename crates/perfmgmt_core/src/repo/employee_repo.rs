//! Employee repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/read/update/deactivate APIs over `employees`.
//! - Keep the `reports_to` hierarchy referentially sound on every write.
//!
//! # Invariants
//! - `reports_to = None` is written as SQL NULL, never as a sentinel id.
//! - `update_employee` rejects manager changes that would close a cycle.
//! - Listing order is insertion order (`insert_seq ASC`).
//! - Read paths reject unknown role text instead of defaulting it.

use crate::db::ensure_connection_ready;
use crate::model::employee::{Employee, EmployeeId, Role};
use crate::model::validation::ensure_positive_id;
use crate::repo::error::{has_extended_code, Entity, RepoError, RepoResult};
use log::debug;
use rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY;
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

/// Upper bound for read-side hierarchy walks.
pub const MAX_HIERARCHY_DEPTH: u32 = 256;

const EMPLOYEE_SELECT_SQL: &str = "SELECT
    employee_id,
    name,
    role,
    reports_to,
    hire_date,
    personnel_code,
    is_active
FROM employees";

const EMPLOYEE_COLUMNS: &[&str] = &[
    "employee_id",
    "name",
    "role",
    "reports_to",
    "hire_date",
    "personnel_code",
    "is_active",
    "insert_seq",
];

/// Repository interface for employee persistence.
pub trait EmployeeRepository {
    /// Inserts one employee with its caller-supplied id.
    fn add_employee(&self, employee: &Employee) -> RepoResult<EmployeeId>;
    /// Loads one employee, active or not.
    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>>;
    /// Lists every employee, active and inactive, in insertion order.
    fn get_all_employees(&self) -> RepoResult<Vec<Employee>>;
    /// Lists direct reports of one manager (one hierarchy level).
    fn get_employees_reporting_to_head(&self, manager_id: EmployeeId)
        -> RepoResult<Vec<Employee>>;
    /// Overwrites all mutable columns of an existing employee.
    fn update_employee(&self, employee: &Employee) -> RepoResult<()>;
    /// Marks one employee inactive. Idempotent.
    fn deactivate_employee(&self, id: EmployeeId) -> RepoResult<()>;
}

/// SQLite-backed employee repository.
pub struct SqliteEmployeeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEmployeeRepository<'conn> {
    /// Creates repository from a migrated connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "employees", EMPLOYEE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl EmployeeRepository for SqliteEmployeeRepository<'_> {
    fn add_employee(&self, employee: &Employee) -> RepoResult<EmployeeId> {
        employee.validate()?;
        if let Some(manager_id) = employee.reports_to {
            ensure_reference_exists(self.conn, "reports_to", manager_id)?;
        }

        let inserted = self.conn.execute(
            "INSERT INTO employees (
                employee_id,
                name,
                role,
                reports_to,
                hire_date,
                personnel_code,
                is_active,
                insert_seq
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7,
                (SELECT COALESCE(MAX(insert_seq), 0) + 1 FROM employees)
            );",
            params![
                employee.employee_id,
                employee.name.as_str(),
                employee.role.as_str(),
                employee.reports_to,
                employee.hire_date.as_str(),
                employee.personnel_code,
                bool_to_int(employee.is_active),
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(err) if has_extended_code(&err, SQLITE_CONSTRAINT_PRIMARYKEY) => {
                return Err(RepoError::DuplicateEmployee(employee.employee_id));
            }
            Err(err) => return Err(err.into()),
        }

        debug!(
            "event=employee_add module=repo status=ok employee_id={}",
            employee.employee_id
        );
        Ok(employee.employee_id)
    }

    fn get_employee(&self, id: EmployeeId) -> RepoResult<Option<Employee>> {
        ensure_positive_id("employee_id", id)?;

        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} WHERE employee_id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_employee_row(row)?));
        }

        Ok(None)
    }

    fn get_all_employees(&self) -> RepoResult<Vec<Employee>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EMPLOYEE_SELECT_SQL} ORDER BY insert_seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut employees = Vec::new();
        while let Some(row) = rows.next()? {
            employees.push(parse_employee_row(row)?);
        }
        Ok(employees)
    }

    fn get_employees_reporting_to_head(
        &self,
        manager_id: EmployeeId,
    ) -> RepoResult<Vec<Employee>> {
        ensure_positive_id("manager_id", manager_id)?;
        if !employee_exists(self.conn, manager_id)? {
            return Err(RepoError::NotFound {
                entity: Entity::Employee,
                id: manager_id,
            });
        }

        let mut stmt = self.conn.prepare(&format!(
            "{EMPLOYEE_SELECT_SQL}
             WHERE reports_to = ?1
             ORDER BY insert_seq ASC;"
        ))?;
        let mut rows = stmt.query([manager_id])?;
        let mut reports = Vec::new();
        while let Some(row) = rows.next()? {
            reports.push(parse_employee_row(row)?);
        }
        Ok(reports)
    }

    fn update_employee(&self, employee: &Employee) -> RepoResult<()> {
        employee.validate()?;

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        if !employee_exists(&tx, employee.employee_id)? {
            return Err(RepoError::NotFound {
                entity: Entity::Employee,
                id: employee.employee_id,
            });
        }
        if let Some(manager_id) = employee.reports_to {
            ensure_reference_exists(&tx, "reports_to", manager_id)?;
            if manager_chain_contains(&tx, manager_id, employee.employee_id)? {
                return Err(RepoError::HierarchyCycle {
                    employee_id: employee.employee_id,
                    manager_id,
                });
            }
        }

        tx.execute(
            "UPDATE employees
             SET
                name = ?2,
                role = ?3,
                reports_to = ?4,
                hire_date = ?5,
                personnel_code = ?6,
                is_active = ?7
             WHERE employee_id = ?1;",
            params![
                employee.employee_id,
                employee.name.as_str(),
                employee.role.as_str(),
                employee.reports_to,
                employee.hire_date.as_str(),
                employee.personnel_code,
                bool_to_int(employee.is_active),
            ],
        )?;
        tx.commit()?;

        debug!(
            "event=employee_update module=repo status=ok employee_id={}",
            employee.employee_id
        );
        Ok(())
    }

    fn deactivate_employee(&self, id: EmployeeId) -> RepoResult<()> {
        ensure_positive_id("employee_id", id)?;

        // SQLite counts matched rows, so an already inactive row still reports 1.
        let changed = self.conn.execute(
            "UPDATE employees SET is_active = 0 WHERE employee_id = ?1;",
            [id],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: Entity::Employee,
                id,
            });
        }

        debug!("event=employee_deactivate module=repo status=ok employee_id={id}");
        Ok(())
    }
}

/// Returns whether an employee row with `id` exists, regardless of activity.
pub(crate) fn employee_exists(conn: &Connection, id: EmployeeId) -> RepoResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM employees WHERE employee_id = ?1;",
            [id],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Fails with `MissingReference` when `id` does not name an existing employee.
pub(crate) fn ensure_reference_exists(
    conn: &Connection,
    field: &'static str,
    id: EmployeeId,
) -> RepoResult<()> {
    if employee_exists(conn, id)? {
        Ok(())
    } else {
        Err(RepoError::MissingReference { field, id })
    }
}

/// Walks `reports_to` upward from `start` and reports whether `target`
/// appears on the chain. `UNION` drops already visited ids, so the walk
/// covers chains of any length and still ends on cycles already stored.
fn manager_chain_contains(
    conn: &Connection,
    start: EmployeeId,
    target: EmployeeId,
) -> RepoResult<bool> {
    let found: i64 = conn.query_row(
        "WITH RECURSIVE chain(id) AS (
            SELECT ?1
            UNION
            SELECT e.reports_to
            FROM employees e
            JOIN chain ON e.employee_id = chain.id
            WHERE e.reports_to IS NOT NULL
        )
        SELECT EXISTS(SELECT 1 FROM chain WHERE id = ?2);",
        params![start, target],
        |row| row.get(0),
    )?;
    Ok(found == 1)
}

fn parse_employee_row(row: &Row<'_>) -> RepoResult<Employee> {
    let role_text: String = row.get("role")?;
    let role = Role::parse(&role_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid role `{role_text}` in employees.role"))
    })?;

    let is_active = int_to_bool(row.get("is_active")?, "employees.is_active")?;

    Ok(Employee {
        employee_id: row.get("employee_id")?,
        personnel_code: row.get("personnel_code")?,
        name: row.get("name")?,
        hire_date: row.get("hire_date")?,
        role,
        is_active,
        reports_to: row.get("reports_to")?,
    })
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}

fn int_to_bool(value: i64, column: &str) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean value `{other}` in {column}"
        ))),
    }
}
