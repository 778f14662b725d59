pub mod policy;
pub mod providers;
pub mod reports;
pub mod scenarios;
pub mod simulation;
pub mod tester;

pub use providers::ProviderSource;
pub use scenarios::{expand_scenarios, get_scenario, list_scenarios};
pub use tester::{LogicTester, ScenarioResult};
