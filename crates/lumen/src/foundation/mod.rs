//! Foundation module - shared utilities used throughout the crate
//!
//! - Logging setup

pub mod logging;
