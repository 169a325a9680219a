//! Logging initialization shared by the binaries and the tests of the
//! workspace.
pub mod config;
pub mod tracing;

pub use config::Config;
