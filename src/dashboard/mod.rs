mod simulation;
mod stats;
mod types;

pub use simulation::{draw_increment, draw_result, estimate_remaining};
pub use stats::DashboardStats;
pub use types::{seed_jobs, JobId, JobResult, JobStatus, ProcessingJob};
