//! Testing infrastructure for roomflow integration tests.
//!
//! - `TestWorld`: isolated data directory plus CLI execution
//! - `backend`: stub HTTP backend with canned responses and request capture
//! - `fixtures`: backend payloads in their wire shape

pub mod backend;
pub mod fixtures;
pub mod world;

pub use backend::{RecordedRequest, StubBackend};
pub use world::{CliResult, TestWorld};
