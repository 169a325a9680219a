pub mod cli;
pub mod config;
pub mod onchain;
pub mod pair;

pub use {config::Config, onchain::Onchain};
