//! Deterministic randomness for tests and benchmarks of the `kernel` crate.

pub mod source;
