//! Service layer for coachdb
//!
//! Centralizes business logic between the HTTP/CLI front ends and storage.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod catalog_service;
mod change_service;
mod error;
mod ingest_service;
mod maintenance_service;
mod staff_update_service;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use coachdb_storage::Storage;

pub use catalog_service::CatalogService;
pub use change_service::ChangeService;
pub use error::ServiceError;
pub use ingest_service::IngestService;
pub use maintenance_service::MaintenanceService;
pub use staff_update_service::StaffUpdateService;

/// Every service, wired to one storage handle.
#[derive(Clone)]
pub struct Services {
    pub catalog: Arc<CatalogService>,
    pub changes: Arc<ChangeService>,
    pub staff_updates: Arc<StaffUpdateService>,
    pub ingest: Arc<IngestService>,
    pub maintenance: Arc<MaintenanceService>,
}

impl Services {
    #[must_use]
    pub fn new(storage: Storage) -> Self {
        let storage = Arc::new(storage);
        Self {
            catalog: Arc::new(CatalogService::new(storage.clone())),
            changes: Arc::new(ChangeService::new(storage.clone())),
            staff_updates: Arc::new(StaffUpdateService::new(storage.clone())),
            ingest: Arc::new(IngestService::new(storage.clone())),
            maintenance: Arc::new(MaintenanceService::new(storage.clone(), storage)),
        }
    }
}
