//! Foundation utilities
//!
//! Math types and collection aliases shared across the crate.

pub mod collections;
pub mod math;
