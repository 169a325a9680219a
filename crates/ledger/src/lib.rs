//! Read-only access to the Axion token, staking, auction and distribution
//! contracts across their legacy and current deployments.

pub mod domain;
pub mod error;
pub mod infra;
pub mod query;
mod run;
pub mod source;

pub use {error::Error, run::start};
