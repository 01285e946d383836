//! Shared test utilities for dashdeck integration harnesses.
//!
//! Import everything you need via `mod common; use common::*;` at the top of
//! each harness file. Generator harnesses rely on `tokio::time::pause()`
//! (`start_paused = true`) so nothing here sleeps in real time.

pub mod assertions;
pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
