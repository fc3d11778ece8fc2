//! Rule sets built on the engine.
//!
//! - `basic.rs`: small demonstration programs (repeat, double, increment).
//! - `release.rs`: release-string bump heuristics.
//! - `spec.rs`: RPM spec-file patterns, handlers glue and programs.

#[path = "rules/basic.rs"]
pub mod basic;
#[path = "rules/release.rs"]
pub mod release;
#[path = "rules/spec.rs"]
pub mod spec;

#[cfg(test)]
#[path = "rules/tests.rs"]
mod tests;
