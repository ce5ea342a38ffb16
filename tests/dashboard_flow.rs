use chrono::Local;
use neuroscan::config::{AppConfig, DashboardConfig};
use neuroscan::dashboard::{JobId, JobStatus, ProcessingJob};
use neuroscan::store::{Action, Store};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn store_with(jobs: Vec<ProcessingJob>, seed: u64) -> Store<StdRng> {
    let config = AppConfig {
        dashboard: DashboardConfig {
            seed_demo_jobs: false,
            ..DashboardConfig::default()
        },
        ..AppConfig::default()
    };
    Store::with_rng(config, StdRng::seed_from_u64(seed)).with_jobs(jobs)
}

#[test]
fn demo_jobs_are_seeded_by_default() {
    let store = Store::with_rng(AppConfig::default(), StdRng::seed_from_u64(0));
    let names: Vec<_> = store.jobs().iter().map(|job| job.filename.as_str()).collect();
    assert_eq!(
        names,
        vec!["brain_scan_001.dcm", "mri_sequence_t1.nii", "brain_scan_002.dcm"]
    );
    assert_eq!(store.stats().active_jobs, 1);
}

#[test]
fn processing_job_near_the_end_completes_with_result() {
    let now = Local::now();
    let mut store = store_with(
        vec![ProcessingJob::processing(JobId(1), "scan.dcm", 95.0, now)],
        11,
    );

    let mut last = 95.0;
    for _ in 0..10_000 {
        store.dispatch(Action::DashboardTick);
        let job = store.job(JobId(1)).unwrap();
        assert!(job.progress >= last);
        last = job.progress;
        if job.status == JobStatus::Completed {
            break;
        }
        assert!(job.result.is_none());
    }

    let job = store.job(JobId(1)).unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.progress, 100.0);
    assert_eq!(job.estimated_seconds, None);
    assert!(job.finished_at.is_some());
    let result = job.result.expect("completed job carries a result");
    assert!((85.0..100.0).contains(&result.confidence));
    assert!((0.0..20.0).contains(&result.volume));

    // The result is written once; later ticks keep it.
    store.dispatch(Action::DashboardTick);
    assert_eq!(store.job(JobId(1)).unwrap().result, Some(result));
}

#[test]
fn queued_and_completed_jobs_are_left_alone() {
    let now = Local::now();
    let seeded = neuroscan::dashboard::seed_jobs(now);
    let mut store = store_with(seeded.clone(), 5);

    for _ in 0..50 {
        store.dispatch(Action::DashboardTick);
    }

    assert_eq!(store.job(JobId(2)), Some(&seeded[1]));
    assert_eq!(store.job(JobId(3)), Some(&seeded[2]));
}

#[test]
fn estimate_is_refreshed_while_processing() {
    let now = Local::now();
    let mut job = ProcessingJob::processing(JobId(1), "scan.dcm", 10.0, now);
    job.estimated_seconds = Some(999);
    let mut store = store_with(vec![job], 8);

    store.dispatch(Action::DashboardTick);
    let job = store.job(JobId(1)).unwrap();
    assert_eq!(job.status, JobStatus::Processing);
    let estimate = job.estimated_seconds.unwrap();
    assert!(estimate > 0 && estimate <= 72, "estimate was {}", estimate);
}

#[test]
fn failed_jobs_are_terminal() {
    let now = Local::now();
    let mut job = ProcessingJob::processing(JobId(7), "bad.dcm", 40.0, now);
    job.status = JobStatus::Failed;
    let mut store = store_with(vec![job.clone()], 2);

    store.dispatch(Action::DashboardTick);
    assert_eq!(store.job(JobId(7)), Some(&job));
    assert!(JobStatus::Failed.is_terminal());
}
