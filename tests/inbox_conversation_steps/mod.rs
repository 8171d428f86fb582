//! Step definitions for inbox conversation scenarios.

pub mod given;
