//! Remote HTTP/JSON mirror of the employee and review operations.
//!
//! # Responsibility
//! - Map domain values to and from the JSON wire format (`codec`).
//! - Issue bounded, blocking HTTP requests against one fixed server (`client`).
//!
//! # Invariants
//! - Nothing here touches the local store; synchronization is caller-driven.
//! - Public client operations collapse failures to absent results and log
//!   method, path and status for diagnosis.

pub mod client;
pub mod codec;
pub mod error;
