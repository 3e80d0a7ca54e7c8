pub mod browser;
pub mod challenge;
pub mod handler;

pub use browser::{redirect_status, url_matches, BrowserDriver};
pub use challenge::{challenge_steps, ChallengeStep};
pub use handler::RedirectionHandler;
