use super::state::Section;
use super::NeuroScanApp;
use crate::dashboard::{JobStatus, ProcessingJob};
use crate::store::{Action, NotificationKind};
use crate::upload::{UploadRecord, UploadStatus};
use crate::utils::color::Palette;
use crate::utils::file_size::format_size;
use crate::utils::time::format_clock;
use eframe::egui::{self, Align, Align2, Color32, RichText, Stroke};
use rfd::FileDialog;
use std::path::PathBuf;
use tracing::warn;

/// What the user asked for during one frame; applied after rendering so the
/// store is never borrowed while it is being drawn.
#[derive(Default)]
struct Intents {
    actions: Vec<Action>,
    picked_files: Option<Vec<PathBuf>>,
    picked_folder: Option<PathBuf>,
}

impl NeuroScanApp {
    pub fn render(&mut self, ctx: &egui::Context) {
        let mut intents = Intents::default();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            self.render_header(ui);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    ui.add_space(20.0);
                    self.render_hero(ui);
                    ui.add_space(30.0);
                    self.render_upload(ui, &mut intents);
                    ui.add_space(30.0);
                    self.render_dashboard(ui);
                    ui.add_space(20.0);
                });
        });

        self.render_results_window(ctx);
        self.render_notifications(ctx, &mut intents);
        self.apply_intents(intents);
    }

    fn apply_intents(&mut self, intents: Intents) {
        for action in intents.actions {
            self.dispatch(action);
        }
        if let Some(paths) = intents.picked_files {
            self.submit_paths(paths);
        }
        if let Some(folder) = intents.picked_folder {
            self.submit_folder(&folder);
        }
    }

    fn render_header(&self, ui: &mut egui::Ui) {
        ui.add_space(6.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("🧠").size(26.0));
            ui.vertical(|ui| {
                ui.label(
                    RichText::new("NeuroScan")
                        .size(20.0)
                        .strong()
                        .color(self.palette.primary),
                );
                ui.label(
                    RichText::new("Brain Tumor Segmentation")
                        .small()
                        .color(self.palette.muted),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                ui.label("👤 Dr. Sarah Chen");
                ui.add_space(8.0);
                let unread = self.store.notifications().len();
                let bell = if unread > 0 {
                    RichText::new(format!("🔔 {}", unread)).color(self.palette.accent)
                } else {
                    RichText::new("🔔")
                };
                ui.label(bell);
            });
        });
        ui.add_space(6.0);
    }

    fn render_hero(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new("⚡ AI-Powered Medical Imaging")
                    .strong()
                    .color(palette.primary),
            );
            ui.add_space(10.0);
            ui.label(
                RichText::new("Advanced Brain Tumor\nSegmentation Platform")
                    .size(34.0)
                    .strong()
                    .color(palette.primary),
            );
            ui.add_space(10.0);
            ui.label(
                RichText::new(
                    "Harness the power of YOLO-Seg AI models for precise, real-time brain tumor \
                     detection and analysis.\nProfessional-grade medical imaging for healthcare \
                     professionals.",
                )
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
            );
            ui.add_space(16.0);

            ui.horizontal(|ui| {
                let buttons_width = 2.0 * 180.0 + ui.spacing().item_spacing.x;
                ui.add_space(((ui.available_width() - buttons_width) / 2.0).max(0.0));
                let upload = egui::Button::new(RichText::new("📤 Upload MRI Scan").strong())
                    .fill(palette.primary)
                    .min_size(egui::vec2(180.0, 36.0));
                if ui.add(upload).clicked() {
                    self.ui.scroll_to = Some(Section::Upload);
                }
                let demo = egui::Button::new("🧠 View Demo Analysis")
                    .min_size(egui::vec2(180.0, 36.0));
                if ui.add(demo).clicked() {
                    self.ui.scroll_to = Some(Section::Dashboard);
                }
            });
        });

        ui.add_space(20.0);
        ui.columns(3, |cols| {
            feature_card(
                &mut cols[0],
                &palette,
                "⚡ Real-time Processing",
                "Advanced AI models process MRI scans in under 30 seconds with clinical-grade accuracy.",
            );
            feature_card(
                &mut cols[1],
                &palette,
                "🧠 Precise Segmentation",
                "YOLO-Seg technology provides pixel-perfect tumor boundary detection and classification.",
            );
            feature_card(
                &mut cols[2],
                &palette,
                "🛡 HIPAA Compliant",
                "Enterprise-grade security with end-to-end encryption and compliance standards.",
            );
        });
    }

    fn render_upload(&mut self, ui: &mut egui::Ui, intents: &mut Intents) {
        let palette = self.palette;
        let title = ui.label(
            RichText::new("📤 Upload MRI Scans")
                .size(22.0)
                .strong()
                .color(palette.primary),
        );
        if self.ui.take_scroll(Section::Upload) {
            title.scroll_to_me(Some(Align::TOP));
        }
        ui.label(
            RichText::new(
                "Upload DICOM, NIfTI, PNG, or JPEG files for brain tumor segmentation analysis.",
            )
            .color(palette.muted),
        );
        ui.add_space(10.0);

        let (stroke, fill) = if self.ui.drag_active {
            (
                Stroke::new(2.0, palette.primary),
                palette.primary.gamma_multiply(0.08),
            )
        } else {
            (
                Stroke::new(1.5, ui.visuals().widgets.noninteractive.bg_stroke.color),
                Color32::TRANSPARENT,
            )
        };

        egui::Frame::none()
            .stroke(stroke)
            .fill(fill)
            .rounding(8.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").size(32.0).color(palette.primary));
                    let heading = if self.ui.drag_active {
                        "Drop files here"
                    } else {
                        "Upload Medical Images"
                    };
                    ui.label(RichText::new(heading).size(17.0).strong());
                    ui.label(
                        RichText::new("Drag and drop your MRI scans here, or click to browse")
                            .color(palette.muted),
                    );
                    ui.add_space(8.0);

                    ui.horizontal(|ui| {
                        let width = 2.0 * 150.0 + ui.spacing().item_spacing.x;
                        ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));
                        let choose = egui::Button::new(RichText::new("Choose Files").strong())
                            .fill(palette.primary)
                            .min_size(egui::vec2(150.0, 32.0));
                        if ui.add(choose).clicked() {
                            let extensions: Vec<&str> = self
                                .store
                                .config()
                                .upload
                                .accepted_extensions
                                .iter()
                                .map(String::as_str)
                                .collect();
                            intents.picked_files = FileDialog::new()
                                .add_filter("Medical images", &extensions)
                                .pick_files();
                        }
                        let folder = egui::Button::new("📁 Choose Folder")
                            .min_size(egui::vec2(150.0, 32.0));
                        if ui.add(folder).clicked() {
                            intents.picked_folder = FileDialog::new().pick_folder();
                        }
                    });

                    ui.add_space(8.0);
                    ui.label(
                        RichText::new(format!(
                            "Supported formats: DICOM (.dcm), NIfTI (.nii), PNG, JPEG • Max size: {} per file",
                            format_size(self.store.config().upload.max_file_bytes)
                        ))
                        .small()
                        .color(palette.muted),
                    );
                });
            });

        if self.store.uploads().is_empty() {
            return;
        }

        ui.add_space(14.0);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Uploaded Files").strong());
            let active = self.store.active_uploads().count();
            if active > 0 {
                ui.label(RichText::new(format!("({} uploading)", active)).color(palette.muted));
            }
        });
        ui.add_space(4.0);
        for record in self.store.uploads() {
            if let Some(action) = upload_row(ui, &palette, record) {
                intents.actions.push(action);
            }
            ui.add_space(4.0);
        }
    }

    fn render_dashboard(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette;
        let title = ui.label(
            RichText::new("Processing Dashboard")
                .size(24.0)
                .strong()
                .color(palette.primary),
        );
        if self.ui.take_scroll(Section::Dashboard) {
            title.scroll_to_me(Some(Align::TOP));
        }
        ui.label(
            RichText::new("Monitor real-time analysis of your MRI scans").color(palette.muted),
        );
        ui.add_space(12.0);

        let stats = self.store.stats();
        ui.columns(4, |cols| {
            stat_card(
                &mut cols[0],
                &palette,
                "Total Scanned",
                &stats.formatted_total(),
                palette.primary,
            );
            stat_card(
                &mut cols[1],
                &palette,
                "Active Jobs",
                &stats.active_jobs.to_string(),
                palette.primary,
            );
            stat_card(
                &mut cols[2],
                &palette,
                "Avg Processing",
                &stats.avg_processing,
                palette.primary,
            );
            stat_card(
                &mut cols[3],
                &palette,
                "Success Rate",
                &format!("{:.1}%", stats.success_rate),
                palette.success,
            );
        });

        ui.add_space(16.0);
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new("📈 Processing Queue").size(17.0).strong());
            ui.add_space(8.0);
            for job in self.store.jobs() {
                if job_row(ui, &palette, job) {
                    self.ui.results_for = Some(job.id);
                }
                ui.add_space(6.0);
            }
        });
    }

    fn render_results_window(&mut self, ctx: &egui::Context) {
        let Some(job_id) = self.ui.results_for else {
            return;
        };
        let Some(job) = self.store.job(job_id) else {
            self.ui.results_for = None;
            return;
        };
        let Some(result) = job.result else {
            self.ui.results_for = None;
            return;
        };

        let palette = self.palette;
        let mut open = true;
        egui::Window::new(format!("Results: {}", job.filename))
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                egui::Grid::new("results_grid")
                    .num_columns(2)
                    .spacing([24.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("Finding");
                        if result.tumor_detected {
                            ui.colored_label(palette.warning, "Tumor Detected");
                        } else {
                            ui.colored_label(palette.success, "No Tumor Detected");
                        }
                        ui.end_row();

                        ui.label("Confidence");
                        ui.label(format!("{:.1}%", result.confidence));
                        ui.end_row();

                        ui.label("Volume");
                        ui.label(format!("{:.1} cm³", result.volume));
                        ui.end_row();

                        ui.label("Started");
                        ui.label(format_clock(&job.started_at));
                        ui.end_row();
                    });

                ui.add_space(8.0);
                if ui.button("📋 Copy JSON").clicked() {
                    match serde_json::to_string_pretty(&result) {
                        Ok(text) => ui.output_mut(|o| o.copied_text = text),
                        Err(e) => warn!("Failed to serialize results for job {}: {}", job_id, e),
                    }
                }
            });

        if !open {
            self.ui.results_for = None;
        }
    }

    fn render_notifications(&self, ctx: &egui::Context, intents: &mut Intents) {
        if self.store.notifications().is_empty() {
            return;
        }
        let palette = self.palette;
        egui::Area::new("notifications")
            .anchor(Align2::RIGHT_BOTTOM, [-16.0, -16.0])
            .show(ctx, |ui| {
                for note in self.store.notifications() {
                    let color = match note.kind {
                        NotificationKind::Success => palette.success,
                        NotificationKind::Warning => palette.warning,
                    };
                    egui::Frame::popup(ui.style())
                        .stroke(Stroke::new(1.0, color))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.colored_label(color, note.message.as_str());
                                if ui.small_button("✖").clicked() {
                                    intents.actions.push(Action::NotificationDismissed(note.id));
                                }
                            });
                        });
                    ui.add_space(4.0);
                }
            });
    }
}

fn feature_card(ui: &mut egui::Ui, palette: &Palette, title: &str, body: &str) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).strong().color(palette.primary));
        ui.add_space(4.0);
        ui.label(RichText::new(body).color(palette.muted));
    });
}

fn stat_card(ui: &mut egui::Ui, palette: &Palette, label: &str, value: &str, color: Color32) {
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(label).small().color(palette.muted));
        ui.label(RichText::new(value).size(22.0).strong().color(color));
    });
}

/// Returns the remove action when the row's button was clicked.
fn upload_row(ui: &mut egui::Ui, palette: &Palette, record: &UploadRecord) -> Option<Action> {
    let mut action = None;
    egui::Frame::none()
        .fill(ui.visuals().faint_bg_color)
        .rounding(6.0)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(RichText::new("🗋").color(palette.primary));
                ui.vertical(|ui| {
                    ui.horizontal(|ui| {
                        ui.label(RichText::new(&record.name).strong());
                        ui.label(
                            RichText::new(format_size(record.size))
                                .small()
                                .color(palette.muted),
                        );
                    });
                    match &record.status {
                        UploadStatus::Uploading => {
                            ui.add(
                                egui::ProgressBar::new(record.progress / 100.0)
                                    .desired_width(ui.available_width() - 60.0)
                                    .show_percentage(),
                            );
                        }
                        UploadStatus::Completed => {
                            ui.colored_label(palette.success, "✅ Uploaded");
                        }
                        UploadStatus::Error(reason) => {
                            ui.colored_label(palette.danger, format!("❌ {}", reason));
                        }
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if ui.small_button("✖").on_hover_text("Remove").clicked() {
                        action = Some(Action::FileRemoved(record.id));
                    }
                });
            });
        });
    action
}

/// Returns true when "View Results" was clicked.
fn job_row(ui: &mut egui::Ui, palette: &Palette, job: &ProcessingJob) -> bool {
    let mut view_results = false;
    let (icon, color) = match job.status {
        JobStatus::Queued => ("🕑", palette.muted),
        JobStatus::Processing => ("⟳", palette.primary),
        JobStatus::Completed => ("✅", palette.success),
        JobStatus::Failed => ("⚠", palette.danger),
    };

    egui::Frame::none()
        .stroke(Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
        .rounding(6.0)
        .inner_margin(10.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(icon).color(color));
                ui.vertical(|ui| {
                    ui.label(RichText::new(&job.filename).strong());
                    let mut started = format!("Started at {}", format_clock(&job.started_at));
                    if let (JobStatus::Processing, Some(secs)) =
                        (job.status, job.estimated_seconds)
                    {
                        started.push_str(&format!(" • Est. {}s remaining", secs));
                    }
                    ui.label(RichText::new(started).small().color(palette.muted));
                });
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if job.status == JobStatus::Completed
                        && ui.button("👁 View Results").clicked()
                    {
                        view_results = true;
                    }
                    ui.label(
                        RichText::new(format!(" {} ", job.status.label()))
                            .color(Color32::WHITE)
                            .background_color(color),
                    );
                });
            });

            if job.status == JobStatus::Processing {
                ui.add(egui::ProgressBar::new(job.progress / 100.0).show_percentage());
            }

            if let Some(result) = job.result {
                ui.add_space(4.0);
                ui.horizontal(|ui| {
                    if result.tumor_detected {
                        ui.colored_label(palette.warning, "● Tumor Detected");
                    } else {
                        ui.colored_label(palette.success, "● No Tumor Detected");
                    }
                    ui.add_space(12.0);
                    ui.label(RichText::new("Confidence:").color(palette.muted));
                    ui.label(RichText::new(format!("{:.1}%", result.confidence)).strong());
                    if result.tumor_detected {
                        ui.add_space(12.0);
                        ui.label(RichText::new("Volume:").color(palette.muted));
                        ui.label(RichText::new(format!("{:.1} cm³", result.volume)).strong());
                    }
                });
            }
        });
    view_results
}
