//! Domain model for employees and performance reviews.
//!
//! # Responsibility
//! - Define canonical value types shared by the local store and remote client.
//! - Own validation rules that every persistence path must apply.
//!
//! # Invariants
//! - Employees are identified by a caller-supplied positive `EmployeeId`.
//! - Reviews are identified by a store-assigned positive `ReviewId`.
//! - Deactivation is a soft-delete flag, never a row removal.

pub mod employee;
pub mod review;
pub mod validation;
