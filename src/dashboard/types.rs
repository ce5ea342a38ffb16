use chrono::{DateTime, Duration as ChronoDuration, Local};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub u32);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    /// Kept for completeness of the lifecycle; nothing produces it yet.
    Failed,
}

impl JobStatus {
    pub fn label(&self) -> &'static str {
        match self {
            JobStatus::Queued => "Queued",
            JobStatus::Processing => "Processing",
            JobStatus::Completed => "Completed",
            JobStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobResult {
    pub tumor_detected: bool,
    /// Percentage.
    pub confidence: f32,
    /// Cubic centimetres.
    pub volume: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessingJob {
    pub id: JobId,
    pub filename: String,
    pub status: JobStatus,
    pub progress: f32,
    pub started_at: DateTime<Local>,
    pub estimated_seconds: Option<u32>,
    pub result: Option<JobResult>,
    pub finished_at: Option<DateTime<Local>>,
}

impl ProcessingJob {
    pub fn queued(id: JobId, filename: impl Into<String>, started_at: DateTime<Local>) -> Self {
        Self {
            id,
            filename: filename.into(),
            status: JobStatus::Queued,
            progress: 0.0,
            started_at,
            estimated_seconds: None,
            result: None,
            finished_at: None,
        }
    }

    pub fn processing(
        id: JobId,
        filename: impl Into<String>,
        progress: f32,
        started_at: DateTime<Local>,
    ) -> Self {
        Self {
            status: JobStatus::Processing,
            progress: progress.clamp(0.0, 100.0),
            ..Self::queued(id, filename, started_at)
        }
    }

    /// Only processing jobs below the cap are advanced by the ticker.
    pub fn is_advancing(&self) -> bool {
        self.status == JobStatus::Processing && self.progress < 100.0
    }

    /// Adds `increment` to the progress, capped at 100. On reaching the cap
    /// the job completes and `result` is stored. Returns true on completion.
    pub fn advance(
        &mut self,
        increment: f32,
        now: DateTime<Local>,
        result: impl FnOnce() -> JobResult,
    ) -> bool {
        if !self.is_advancing() {
            return false;
        }
        self.progress = (self.progress + increment.max(0.0)).min(100.0);
        if self.progress < 100.0 {
            return false;
        }

        self.status = JobStatus::Completed;
        self.estimated_seconds = None;
        self.finished_at = Some(now);
        if self.result.is_none() {
            self.result = Some(result());
        }
        true
    }

    pub fn processing_time(&self) -> Option<std::time::Duration> {
        let finished = self.finished_at?;
        (finished - self.started_at).to_std().ok()
    }
}

/// The three demo jobs the dashboard opens with.
pub fn seed_jobs(now: DateTime<Local>) -> Vec<ProcessingJob> {
    let mut active = ProcessingJob::processing(
        JobId(1),
        "brain_scan_001.dcm",
        67.0,
        now - ChronoDuration::seconds(45),
    );
    active.estimated_seconds = Some(25);

    let finished = ProcessingJob {
        id: JobId(2),
        filename: "mri_sequence_t1.nii".to_string(),
        status: JobStatus::Completed,
        progress: 100.0,
        started_at: now - ChronoDuration::seconds(180),
        estimated_seconds: None,
        result: Some(JobResult {
            tumor_detected: true,
            confidence: 94.7,
            volume: 12.3,
        }),
        finished_at: None,
    };

    let waiting = ProcessingJob::queued(JobId(3), "brain_scan_002.dcm", now);

    vec![active, finished, waiting]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_result() -> JobResult {
        JobResult {
            tumor_detected: false,
            confidence: 90.0,
            volume: 1.0,
        }
    }

    #[test]
    fn seed_matches_demo_dataset() {
        let now = Local::now();
        let jobs = seed_jobs(now);
        let statuses: Vec<_> = jobs.iter().map(|j| j.status).collect();
        assert_eq!(
            statuses,
            vec![JobStatus::Processing, JobStatus::Completed, JobStatus::Queued]
        );
        assert_eq!(jobs[0].progress, 67.0);
        assert_eq!(jobs[0].estimated_seconds, Some(25));
        assert_eq!(jobs[0].started_at, now - ChronoDuration::seconds(45));
        assert_eq!(jobs[1].result.map(|r| r.confidence), Some(94.7));
        assert!(jobs[2].result.is_none());
    }

    #[test]
    fn advance_completes_once_with_result() {
        let now = Local::now();
        let mut job = ProcessingJob::processing(JobId(9), "x.dcm", 98.0, now);
        assert!(job.advance(4.0, now, fixed_result));
        assert_eq!(job.progress, 100.0);
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.result, Some(fixed_result()));
        assert_eq!(job.finished_at, Some(now));

        let mut calls = 0;
        assert!(!job.advance(4.0, now, || {
            calls += 1;
            fixed_result()
        }));
        assert_eq!(calls, 0);
    }

    #[test]
    fn queued_jobs_do_not_advance() {
        let now = Local::now();
        let mut job = ProcessingJob::queued(JobId(3), "q.dcm", now);
        assert!(!job.advance(50.0, now, fixed_result));
        assert_eq!(job.progress, 0.0);
        assert_eq!(job.status, JobStatus::Queued);
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let json = serde_json::to_value(fixed_result()).unwrap();
        assert_eq!(json["tumorDetected"], serde_json::Value::Bool(false));
        assert!(json.get("confidence").is_some());
    }
}
