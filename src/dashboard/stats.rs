use super::types::{JobStatus, ProcessingJob};
use crate::utils::time::format_seconds;
use std::time::Duration;

const HISTORICAL_SCANS: u64 = 1_247;
const BASELINE_AVG: &str = "28s";
const BASELINE_SUCCESS_RATE: f32 = 98.7;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total_scanned: u64,
    pub active_jobs: usize,
    pub avg_processing: String,
    pub success_rate: f32,
}

impl DashboardStats {
    /// `seeded_completed` is the number of jobs that were already complete
    /// when the dashboard was seeded; they are part of the historical total.
    pub fn compute(jobs: &[ProcessingJob], seeded_completed: usize) -> Self {
        let completed = jobs
            .iter()
            .filter(|job| job.status == JobStatus::Completed)
            .count();
        let failed = jobs
            .iter()
            .filter(|job| job.status == JobStatus::Failed)
            .count();

        let timings: Vec<Duration> = jobs.iter().filter_map(|job| job.processing_time()).collect();
        let avg_processing = if timings.is_empty() {
            BASELINE_AVG.to_string()
        } else {
            format_seconds(timings.iter().sum::<Duration>() / timings.len() as u32)
        };

        let finished = completed + failed;
        let success_rate = if finished > seeded_completed {
            completed as f32 / finished as f32 * 100.0
        } else {
            BASELINE_SUCCESS_RATE
        };

        Self {
            total_scanned: HISTORICAL_SCANS + completed.saturating_sub(seeded_completed) as u64,
            active_jobs: jobs
                .iter()
                .filter(|job| job.status == JobStatus::Processing)
                .count(),
            avg_processing,
            success_rate,
        }
    }

    pub fn formatted_total(&self) -> String {
        let digits = self.total_scanned.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }
}
