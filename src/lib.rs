//! End-to-end harness for a payments processing API
//!
//! Serial suites pass identifiers between steps through a file-backed
//! [`SharedState`](modules::state::SharedState); connector-specific expectations
//! come from the [`FixtureResolver`](modules::fixtures::FixtureResolver).

pub mod config;
pub mod core;
pub mod modules;

// Re-export commonly used types
pub use modules::client;
pub use modules::fixtures;
pub use modules::flows;
pub use modules::redirection;
pub use modules::state;
