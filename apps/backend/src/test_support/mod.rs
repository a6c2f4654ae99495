//! Helpers shared by unit and integration tests.

pub mod app_builder;
pub mod stub_opponent;

pub use app_builder::create_test_app;
pub use stub_opponent::StubOpponent;
