pub mod expectations;
pub mod merge;
pub mod models;
pub mod request_bodies;
pub mod resolver;

pub use expectations::{assert_response, check_response, should_continue_next_step};
pub use merge::{build_request_body, overrides};
pub use models::{category, ConnectorFixtureTable, ExpectedResponse, ScenarioEntry, ScenarioFixture};
pub use resolver::{parse_table, resolve_scenario, FixtureResolver};
