pub mod error;
pub mod telemetry;

pub use error::{E2eError, Result};
pub use telemetry::init_tracing;
