//! rank-forest-util - Test and workload helpers for rank-forest
//!
//! Provides a seeded random source and generators for positional-list
//! workloads, so randomized checks can be replayed from a seed.

pub mod fuzzer;

pub use fuzzer::{Fuzzer, ListOp};
