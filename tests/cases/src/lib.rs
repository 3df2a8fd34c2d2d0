//! # Tab coordination test cases
//!
//! This subproject provides integration tests for the hub and the name-based discovery.

#[macro_use]
extern crate log;
mod steps;

pub use self::cases::smoke;
