//! Disposable infrastructure for integration tests.
//!
//! Requires a running Docker daemon.

pub mod error;
pub mod redis;

pub use error::{Result, TestInfraError};
