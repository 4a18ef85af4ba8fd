pub mod integrator;
pub mod event;
pub mod runner;
pub mod pipeline;

pub use runner::{simulate, simulate_with, Profiles, Sample, SimulationRun};
pub use integrator::advance;
pub use event::StopReason;
pub use pipeline::{reconstruct, BankSource, Reconstruction};
