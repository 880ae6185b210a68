//! Verification utilities for flow computations

pub mod correctness;

pub use self::correctness::*;
