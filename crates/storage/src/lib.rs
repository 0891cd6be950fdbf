//! Storage layer for coachdb
//!
//! SQLite database of conferences, schools, per-season coach rows and
//! salaries, behind an r2d2 connection pool. Synchronous methods live on
//! [`Storage`]; the async [`traits`] wrap them for the service layer.

pub mod error;
mod migrations;
mod sqlite_async;
mod storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use error::StorageError;
pub use migrations::SCHEMA_VERSION;
pub use storage::Storage;
pub use traits::{
    CatalogStore, IngestStore, MaintenanceStore, SalarySourceStore, SnapshotStore,
    StaffUpdateStore,
};
