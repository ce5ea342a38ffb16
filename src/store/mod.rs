//! Single owner of application state. Every mutation is an [`Action`]
//! passed to [`Store::dispatch`], which returns the timer [`Effect`]s the
//! scheduler has to carry out.
mod action;
mod notification;

pub use action::{Action, Effect};
pub use notification::{Notification, NotificationKind};

use crate::config::AppConfig;
use crate::dashboard::{self, DashboardStats, JobId, JobStatus, ProcessingJob};
use crate::upload::{self, FileDescriptor, UploadId, UploadRecord, UploadStatus};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{debug, info, warn};

#[derive(Debug)]
pub struct Store<R: Rng = StdRng> {
    config: AppConfig,
    uploads: Vec<UploadRecord>,
    jobs: Vec<ProcessingJob>,
    seeded_completed: usize,
    notifications: Vec<Notification>,
    next_notification_id: u64,
    rng: R,
}

impl Store<StdRng> {
    pub fn new(config: AppConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> Store<R> {
    pub fn with_rng(config: AppConfig, rng: R) -> Self {
        let jobs = if config.dashboard.seed_demo_jobs {
            dashboard::seed_jobs(Local::now())
        } else {
            Vec::new()
        };
        Self {
            config,
            uploads: Vec::new(),
            jobs: Vec::new(),
            seeded_completed: 0,
            notifications: Vec::new(),
            next_notification_id: 1,
            rng,
        }
        .with_jobs(jobs)
    }

    /// Replaces the job list. Jobs already completed here count as history.
    pub fn with_jobs(mut self, jobs: Vec<ProcessingJob>) -> Self {
        self.seeded_completed = jobs
            .iter()
            .filter(|job| job.status == JobStatus::Completed)
            .count();
        self.jobs = jobs;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn uploads(&self) -> &[UploadRecord] {
        &self.uploads
    }

    pub fn upload(&self, id: UploadId) -> Option<&UploadRecord> {
        self.uploads.iter().find(|record| record.id == id)
    }

    /// Records still counting up.
    pub fn active_uploads(&self) -> impl Iterator<Item = &UploadRecord> {
        self.uploads
            .iter()
            .filter(|record| record.status == UploadStatus::Uploading)
    }

    pub fn jobs(&self) -> &[ProcessingJob] {
        &self.jobs
    }

    pub fn job(&self, id: JobId) -> Option<&ProcessingJob> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn stats(&self) -> DashboardStats {
        DashboardStats::compute(&self.jobs, self.seeded_completed)
    }

    pub fn dispatch(&mut self, action: Action) -> Vec<Effect> {
        match action {
            Action::FilesSubmitted(files) => self.submit_files(files),
            Action::FileRemoved(id) => self.remove_file(id),
            Action::UploadTick(id) => self.tick_upload(id),
            Action::UploadTimedOut(id) => {
                if let Some(record) = self.upload_mut(id) {
                    record.force_complete();
                    debug!(upload = %id, "upload deadline reached");
                }
                Vec::new()
            }
            Action::DashboardTick => {
                self.tick_dashboard();
                Vec::new()
            }
            Action::ExpireNotifications(now) => {
                let ttl = self.config.ui.notification_ttl();
                self.notifications.retain(|note| !note.is_expired(now, ttl));
                Vec::new()
            }
            Action::NotificationDismissed(id) => {
                self.notifications.retain(|note| note.id != id);
                Vec::new()
            }
            Action::Warn(message) => {
                self.notify(NotificationKind::Warning, message);
                Vec::new()
            }
        }
    }

    fn submit_files(&mut self, files: Vec<FileDescriptor>) -> Vec<Effect> {
        if files.is_empty() {
            return Vec::new();
        }

        let mut effects = Vec::with_capacity(files.len());
        let mut rejected = 0;
        for file in files {
            let record = match upload::validate(&file, &self.config.upload) {
                Ok(()) => {
                    let record = UploadRecord::uploading(file);
                    info!(
                        upload = %record.id,
                        name = %record.name,
                        size = record.size,
                        "upload started"
                    );
                    effects.push(Effect::StartUploadTimer(record.id));
                    record
                }
                Err(rejection) => {
                    warn!(name = %file.name, "upload rejected: {}", rejection);
                    rejected += 1;
                    UploadRecord::rejected(file, rejection.to_string())
                }
            };
            self.uploads.push(record);
        }

        let (kind, message) = notification::batch_summary(effects.len(), rejected);
        self.notify(kind, message);
        effects
    }

    fn remove_file(&mut self, id: UploadId) -> Vec<Effect> {
        let before = self.uploads.len();
        self.uploads.retain(|record| record.id != id);
        if self.uploads.len() == before {
            return Vec::new();
        }
        info!(upload = %id, "upload removed");
        vec![Effect::CancelUploadTimer(id)]
    }

    fn tick_upload(&mut self, id: UploadId) -> Vec<Effect> {
        let increment = self.rng.gen::<f32>() * self.config.upload.max_increment;
        let Some(record) = self.upload_mut(id) else {
            return Vec::new();
        };
        if record.advance(increment) {
            info!(upload = %id, "upload completed");
            return vec![Effect::CancelUploadTimer(id)];
        }
        debug!(upload = %id, progress = record.progress, "upload tick");
        Vec::new()
    }

    fn tick_dashboard(&mut self) {
        let now = Local::now();
        let config = &self.config.dashboard;
        let rng = &mut self.rng;

        for job in self.jobs.iter_mut().filter(|job| job.is_advancing()) {
            let increment = dashboard::draw_increment(rng, config);
            if job.advance(increment, now, || dashboard::draw_result(rng, config)) {
                info!(
                    job = %job.id,
                    file = %job.filename,
                    result = ?job.result,
                    "analysis completed"
                );
            } else {
                job.estimated_seconds = Some(dashboard::estimate_remaining(job.progress, config));
                debug!(job = %job.id, progress = job.progress, "analysis tick");
            }
        }
    }

    fn upload_mut(&mut self, id: UploadId) -> Option<&mut UploadRecord> {
        self.uploads.iter_mut().find(|record| record.id == id)
    }

    fn notify(&mut self, kind: NotificationKind, message: String) {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.push(Notification {
            id,
            kind,
            message,
            created: Instant::now(),
        });
    }
}
