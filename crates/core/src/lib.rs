//! Core types and pure logic for coachdb
//!
//! This crate contains the domain types shared across all other crates,
//! the season-over-season change detector and the normalization helpers
//! used when merging scraped records into the canonical schema.

mod career;
mod changes;
mod coach;
mod constants;
mod env_config;
mod error;
mod ingest;
mod maintenance;
pub mod normalize;
mod query;
mod salary_stats;
mod staff_update;

pub use career::*;
pub use changes::*;
pub use coach::*;
pub use constants::*;
pub use env_config::*;
pub use error::*;
pub use ingest::*;
pub use maintenance::*;
pub use query::*;
pub use salary_stats::*;
pub use staff_update::*;
