pub mod accounts;
pub mod harness;
pub mod mandates;
pub mod models;
pub mod payments;
pub mod refunds;
pub mod suite;

pub use harness::Harness;
pub use models::{AuthenticationType, CaptureMethod, StepOutcome, StepRecord};
pub use suite::SerialSuite;
