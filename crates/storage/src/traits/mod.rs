//! Storage trait abstraction
//!
//! Async domain traits the service layer is written against. `Storage`
//! implements all of them in `sqlite_async`; tests may substitute fakes.

pub mod catalog;
pub mod ingest;
pub mod maintenance;
pub mod staff;

pub use catalog::{CatalogStore, SnapshotStore};
pub use ingest::IngestStore;
pub use maintenance::{MaintenanceStore, SalarySourceStore};
pub use staff::StaffUpdateStore;
