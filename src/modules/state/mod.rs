pub mod keys;
pub mod shared_state;
pub mod step;

pub use shared_state::{Bootstrap, SharedState};
pub use step::run_step;
