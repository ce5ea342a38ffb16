mod state;
mod ui;

pub use state::{Section, UiState};

use crate::config::AppConfig;
use crate::scheduler::TaskScheduler;
use crate::store::{Action, Store};
use crate::upload::{self, FileDescriptor};
use crate::utils::color::Palette;
use eframe::{egui, App};
use std::path::{Path, PathBuf};
use std::sync::mpsc as std_mpsc;
use std::sync::Arc;
use std::time::Instant;
use tokio::runtime::Handle;
use tracing::{info, warn};

pub struct NeuroScanApp {
    store: Store,
    scheduler: TaskScheduler,
    actions: std_mpsc::Receiver<Action>,
    ui: UiState,
    palette: Palette,
}

impl NeuroScanApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: AppConfig, runtime: Handle) -> Self {
        info!("Initializing NeuroScan");
        let (sender, actions) = std_mpsc::channel();
        let mut scheduler =
            TaskScheduler::new(runtime, sender, Arc::new(cc.egui_ctx.clone()), config.clone());
        scheduler.start_dashboard();

        Self {
            store: Store::new(config),
            scheduler,
            actions,
            ui: UiState::default(),
            palette: Palette::clinical(),
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        let effects = self.store.dispatch(action);
        self.scheduler.apply(effects);
    }

    /// Builds descriptors for picked or dropped paths; unreadable paths
    /// become a warning instead of a record.
    pub fn submit_paths(&mut self, paths: Vec<PathBuf>) {
        let mut files = Vec::with_capacity(paths.len());
        for path in paths {
            match FileDescriptor::from_path(&path) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("{}", e);
                    self.dispatch(Action::Warn(e.to_string()));
                }
            }
        }
        self.dispatch(Action::FilesSubmitted(files));
    }

    pub fn submit_folder(&mut self, folder: &Path) {
        info!("Collecting files from {}", folder.display());
        let paths = upload::collect_folder(folder, &self.store.config().upload);
        if paths.is_empty() {
            self.dispatch(Action::Warn(format!(
                "No supported images found in {}",
                folder.display()
            )));
            return;
        }
        self.submit_paths(paths);
    }

    fn drain_actions(&mut self) {
        while let Ok(action) = self.actions.try_recv() {
            self.dispatch(action);
        }
    }

    fn handle_drops(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });
        self.ui.drag_active = hovering;
        if dropped.is_empty() {
            return;
        }

        let mut files = Vec::with_capacity(dropped.len());
        for file in &dropped {
            match FileDescriptor::from_dropped(file) {
                Ok(file) => files.push(file),
                Err(e) => {
                    warn!("{}", e);
                    self.dispatch(Action::Warn(e.to_string()));
                }
            }
        }
        self.dispatch(Action::FilesSubmitted(files));
    }

    fn expire_notifications(&mut self, ctx: &egui::Context) {
        self.dispatch(Action::ExpireNotifications(Instant::now()));
        if !self.store.notifications().is_empty() {
            ctx.request_repaint_after(std::time::Duration::from_millis(250));
        }
    }
}

impl App for NeuroScanApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_actions();
        self.handle_drops(ctx);
        self.expire_notifications(ctx);
        self.render(ctx);
    }
}
