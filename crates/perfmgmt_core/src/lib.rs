//! Persistence and synchronization core for employees and performance reviews.
//!
//! The local store (`db`, `repo`, `store`) owns the canonical SQLite
//! representation. The remote client (`remote`) mirrors the same operations
//! against an HTTP/JSON server. The two paths never call each other.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, RemoteConfig, StoreConfig};
pub use logging::{default_log_level, init_logging, logging_status, LoggingConfig, LoggingError};
pub use model::employee::{Employee, EmployeeId, Role};
pub use model::review::{PerformanceReview, Ratings, ReviewId, MAX_RATING, MIN_RATING};
pub use model::validation::ModelValidationError;
pub use remote::client::RemoteClient;
pub use remote::error::{CodecError, RemoteError, RemoteResult};
pub use repo::employee_repo::{EmployeeRepository, SqliteEmployeeRepository, MAX_HIERARCHY_DEPTH};
pub use repo::error::{Entity, RepoError, RepoResult};
pub use repo::review_repo::{ReviewRepository, SqliteReviewRepository};
pub use service::hierarchy_service::{HierarchyError, HierarchyResult, HierarchyService};
pub use store::LocalStore;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
