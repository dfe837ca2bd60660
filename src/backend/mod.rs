mod attribution;
mod engine;
mod impact;
mod sampler;
mod state;

pub use engine::EnergyEngine;
pub use impact::impact_scores;
pub use sampler::{ProcSampler, ProcessDataSource};
