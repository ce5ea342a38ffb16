//! Timer tasks for the simulators. Tasks never touch state: they post
//! [`Action`]s to the UI thread, which dispatches them into the store.
use crate::config::AppConfig;
use crate::store::{Action, Effect};
use crate::upload::UploadId;
use derivative::Derivative;
use std::collections::HashMap;
use std::sync::mpsc::Sender;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

/// Wakes the UI after an action was posted.
pub trait RepaintSignal: Send + Sync {
    fn request_repaint(&self);
}

impl RepaintSignal for egui::Context {
    fn request_repaint(&self) {
        egui::Context::request_repaint(self);
    }
}

/// For headless use and tests.
pub struct NoRepaint;

impl RepaintSignal for NoRepaint {
    fn request_repaint(&self) {}
}

#[derive(Clone, Derivative)]
#[derivative(Debug)]
struct Poster {
    sender: Sender<Action>,
    #[derivative(Debug = "ignore")]
    repaint: Arc<dyn RepaintSignal>,
}

impl Poster {
    /// False once the UI side has gone away.
    fn post(&self, action: Action) -> bool {
        if self.sender.send(action).is_err() {
            return false;
        }
        self.repaint.request_repaint();
        true
    }
}

#[derive(Debug)]
pub struct TaskScheduler {
    runtime: Handle,
    poster: Poster,
    config: AppConfig,
    uploads: HashMap<UploadId, JoinHandle<()>>,
    dashboard: Option<JoinHandle<()>>,
}

impl TaskScheduler {
    pub fn new(
        runtime: Handle,
        sender: Sender<Action>,
        repaint: Arc<dyn RepaintSignal>,
        config: AppConfig,
    ) -> Self {
        Self {
            runtime,
            poster: Poster { sender, repaint },
            config,
            uploads: HashMap::new(),
            dashboard: None,
        }
    }

    /// Spawns the shared dashboard ticker. Calling it twice is a no-op.
    pub fn start_dashboard(&mut self) {
        if self.dashboard.is_some() {
            return;
        }
        let period = self.config.dashboard.tick_interval();
        let poster = self.poster.clone();
        info!(period_ms = period.as_millis() as u64, "starting dashboard ticker");

        self.dashboard = Some(self.runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                if !poster.post(Action::DashboardTick) {
                    break;
                }
            }
        }));
    }

    pub fn apply(&mut self, effects: Vec<Effect>) {
        self.prune_finished();
        for effect in effects {
            match effect {
                Effect::StartUploadTimer(id) => self.start_upload(id),
                Effect::CancelUploadTimer(id) => self.cancel_upload(id),
            }
        }
    }

    pub fn active_upload_timers(&self) -> usize {
        self.uploads
            .values()
            .filter(|handle| !handle.is_finished())
            .count()
    }

    fn start_upload(&mut self, id: UploadId) {
        let period = self.config.upload.tick_interval();
        let deadline = Instant::now() + self.config.upload.completion_timeout();
        let poster = self.poster.clone();

        let handle = self.runtime.spawn(async move {
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    biased;
                    _ = time::sleep_until(deadline) => {
                        poster.post(Action::UploadTimedOut(id));
                        break;
                    }
                    _ = ticker.tick() => {
                        if !poster.post(Action::UploadTick(id)) {
                            break;
                        }
                    }
                }
            }
        });

        if let Some(previous) = self.uploads.insert(id, handle) {
            previous.abort();
        }
        debug!(upload = %id, "upload timer started");
    }

    fn cancel_upload(&mut self, id: UploadId) {
        if let Some(handle) = self.uploads.remove(&id) {
            handle.abort();
            debug!(upload = %id, "upload timer cancelled");
        }
    }

    fn prune_finished(&mut self) {
        self.uploads.retain(|_, handle| !handle.is_finished());
    }
}

impl Drop for TaskScheduler {
    fn drop(&mut self) {
        for (_, handle) in self.uploads.drain() {
            handle.abort();
        }
        if let Some(handle) = self.dashboard.take() {
            handle.abort();
        }
    }
}
