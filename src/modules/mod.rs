pub mod client;
pub mod fixtures;
pub mod flows;
pub mod redirection;
pub mod state;
