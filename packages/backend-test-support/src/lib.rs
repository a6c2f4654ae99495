//! Backend test support utilities
//!
//! Shared helpers for the crowd-chess backend tests: unified logging
//! initialization, Problem Details assertions and unique visitor identities.

pub mod logging;
pub mod problem_details;
pub mod unique_helpers;
