pub mod game_tester;
pub mod policy;
pub mod reports;
pub mod seeds;
pub mod tester;

pub use game_tester::{DEFAULT_VOYAGE_TURNS, GameTester, SimulationPlan, SimulationSummary};
pub use policy::VoyageStrategy;
pub use seeds::resolve_seed_inputs;
pub use tester::*;
