//! Reusable scenario builders and a randomized stress harness.
//!
//! Shared by the crate's unit tests, the criterion benches, and the
//! `simulator` binary.

pub mod scenario;
