// Cascade simulation over a built spread model.

pub mod cascade;
pub mod params;
pub mod random;

pub use cascade::Simulator;
pub use params::{SimulationMode, SimulationParameters};
pub use random::RandomSource;
