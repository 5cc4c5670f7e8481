//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts for employees and reviews.
//! - Isolate SQLite query details from callers.
//!
//! # Invariants
//! - Write paths run model validation before any SQL mutation.
//! - Single-row reads return `Ok(None)` for a missing row; mutations and
//!   relationship anchors return `RepoError::NotFound`.
//! - Storage failures are never masked as empty or default values.

pub mod employee_repo;
pub mod error;
pub mod review_repo;
