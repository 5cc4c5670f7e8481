//! Use-case services built on repository contracts.
//!
//! # Responsibility
//! - Compose repository calls into read-side use-cases.
//! - Stay storage-agnostic by depending only on repository traits.

pub mod hierarchy_service;
