//! Typed async client for the coachdb REST API.

mod client;
mod error;

pub use client::{CoachDbClient, DEFAULT_TIMEOUT};
pub use error::ClientError;
