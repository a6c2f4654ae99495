//! Logging helpers shared by services and middleware.

pub mod pii;
