//! Arbitrary precision arithmetic for amounts read from contracts.

pub mod conversions;
pub mod u256_ext;
pub mod units;

pub use units::{InvalidAmount, Scale};
