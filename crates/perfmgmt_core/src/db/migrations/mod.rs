//! Schema migrations for the employee/review store.
//!
//! # Responsibility
//! - Register the store schema as numbered SQL steps.
//! - Bring a connection from its recorded version up to `latest_version()`
//!   inside one transaction.
//! - Confirm that each step left behind the tables it is meant to create.
//!
//! # Invariants
//! - Step versions start at 1 and increase by exactly one.
//! - `PRAGMA user_version` equals the last step applied.
//! - A database stamped with a newer version than this build knows is never
//!   touched.

use crate::db::{table_exists, DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, Transaction};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    name: &'static str,
    sql: &'static str,
    /// Tables that must exist once this step has run.
    creates: &'static [&'static str],
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        name: "init",
        sql: include_str!("0001_init.sql"),
        creates: &["employees", "performance_reviews"],
    },
    SchemaStep {
        version: 2,
        name: "reports_to_index",
        sql: include_str!("0002_reports_to_index.sql"),
        creates: &[],
    },
];

/// Returns the schema version this build migrates to.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Upgrades `conn` to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer build.
/// - `MissingRequiredTable` when a step did not create a table it declares.
/// - `Sqlite` for any statement failure; the whole upgrade is rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        error!(
            "event=db_migrate module=db status=error error_code=schema_too_new db_version={from_version} latest_supported={latest}"
        );
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in pending {
        run_step(&tx, step)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest}"
    );
    Ok(())
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    Ok(version)
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    let started_at = Instant::now();
    tx.execute_batch(step.sql)?;
    for &table in step.creates {
        if !table_exists(tx, table)? {
            return Err(DbError::MissingRequiredTable(table));
        }
    }
    tx.pragma_update(None, "user_version", step.version)?;

    info!(
        "event=db_migrate_step module=db status=ok version={} name={} duration_ms={}",
        step.version,
        step.name,
        started_at.elapsed().as_millis()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{apply_migrations, current_user_version, latest_version, SCHEMA_STEPS};
    use rusqlite::Connection;

    #[test]
    fn steps_are_numbered_consecutively_from_one() {
        for (index, step) in SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "step {}", step.name);
        }
        assert_eq!(latest_version(), SCHEMA_STEPS.len() as u32);
    }

    #[test]
    fn upgrade_resumes_from_recorded_version() {
        let mut conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA_STEPS[0].sql).unwrap();
        conn.pragma_update(None, "user_version", 1).unwrap();

        apply_migrations(&mut conn).unwrap();

        assert_eq!(current_user_version(&conn).unwrap(), latest_version());
        let has_index: i64 = conn
            .query_row(
                "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'index' AND name = 'idx_employees_reports_to');",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(has_index, 1);
    }
}
