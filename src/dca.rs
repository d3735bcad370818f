pub mod fee;
pub mod holding;
pub mod input;
pub mod solver;

pub use fee::FeeType;
pub use holding::Holding;
pub use input::parse_input;
pub use solver::{solve, CalculationResult, SolveError};
