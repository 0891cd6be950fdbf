#![allow(clippy::shadow_reuse, reason = "Shadowing for Arc clones is idiomatic")]
#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod changes;
pub mod coaches;
pub mod meta;
pub mod schools;
pub mod webhooks;
pub mod yr;
