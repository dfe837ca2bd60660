mod process_metrics;
mod running_app;
mod significant_app;

pub use process_metrics::ProcessMetrics;
pub use running_app::RunningApp;
pub use significant_app::SignificantEnergyApp;

/// OS process identifier.
pub type Pid = i32;
