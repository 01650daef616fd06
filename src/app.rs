//! Main application UI and state management.
//! Renders the schedule list, collects topics and scores, and forwards every
//! action to the scheduling engine. No scheduling decisions are made here.

use chrono::{DateTime, Local, Utc};
use eframe::egui;
use log::warn;

use crate::calendar::google_calendar_link;
use crate::engine::SchedulingEngine;
use crate::error::ScheduleError;
use crate::export::json::{export_json_to_path, import_json};
use crate::models::ReviewRecord;
use crate::store::SqliteStore;

/// Score entry dialog state for the review being completed.
struct CompletionDialog {
    id: i64,
    topic: String,
    correct_input: String,
    total_input: String,
    error: Option<String>,
}

/// Main application state
pub struct RecallApp {
    engine: SchedulingEngine<SqliteStore>,
    // Display cache only; the engine re-fetches by id before mutating
    reviews: Vec<ReviewRecord>,

    topic_input: String,
    completion: Option<CompletionDialog>,

    show_status_dialog: bool,
    status_message: String,
    calendar_link: Option<String>,

    show_confirmation_dialog: bool,
    allowed_to_close: bool,
}

/// Formats a due date in the user's timezone for the list view.
fn format_due_date(date: DateTime<Utc>) -> String {
    let local: DateTime<Local> = date.into();
    local.format("%Y-%m-%d %H:%M").to_string()
}

impl eframe::App for RecallApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_main_screen(ctx);
        self.render_completion_dialog(ctx);
        self.render_status_dialog(ctx);

        // Handle window close requests with confirmation dialog
        if ctx.input(|i| i.viewport().close_requested()) {
            if self.allowed_to_close {
                // Allow close
            } else {
                ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
                self.show_confirmation_dialog = true;
            }
        }

        if self.show_confirmation_dialog {
            egui::Window::new("Do you want to quit?")
                .collapsible(false)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        if ui.button("No").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = false;
                        }

                        if ui.button("Yes").clicked() {
                            self.show_confirmation_dialog = false;
                            self.allowed_to_close = true;
                            ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                        }
                    });
                });
        }
    }
}

impl RecallApp {
    /// Creates the application around an engine with an open store.
    pub fn new(engine: SchedulingEngine<SqliteStore>) -> Self {
        let mut app = Self {
            engine,
            reviews: Vec::new(),
            topic_input: String::new(),
            completion: None,
            show_status_dialog: false,
            status_message: String::new(),
            calendar_link: None,
            show_confirmation_dialog: false,
            allowed_to_close: false,
        };
        app.refresh_reviews();
        app
    }

    /// Reloads the display cache from the store.
    fn refresh_reviews(&mut self) {
        match self.engine.reviews() {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => {
                warn!("failed to load reviews: {e}");
                self.show_status(format!("Could not load reviews: {e}"), None);
            }
        }
    }

    fn show_status(&mut self, message: String, calendar_link: Option<String>) {
        self.status_message = message;
        self.calendar_link = calendar_link;
        self.show_status_dialog = true;
    }

    fn render_main_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Med Recall");
            ui.label("Record what you studied and let the schedule adapt to your recall.");
            ui.separator();

            ui.horizontal(|ui| {
                ui.label("Topic:");
                ui.text_edit_singleline(&mut self.topic_input);
            });

            // First review delay presets, in hours
            let mut action_schedule: Option<i64> = None;
            ui.horizontal(|ui| {
                ui.label("First review:");
                if ui.button("In 1 hour").clicked() {
                    action_schedule = Some(1);
                }
                if ui.button("Tomorrow").clicked() {
                    action_schedule = Some(24);
                }
                if ui.button("In 2 days").clicked() {
                    action_schedule = Some(48);
                }
            });
            if let Some(hours) = action_schedule {
                self.handle_schedule(hours);
            }

            ui.separator();

            ui.horizontal(|ui| {
                if ui.button("Export Backup").clicked() {
                    self.handle_export();
                }
                if ui.button("Import Backup").clicked() {
                    self.handle_import();
                }
            });

            ui.separator();

            ui.heading(format!("Scheduled Reviews ({})", self.reviews.len()));

            if self.reviews.is_empty() {
                ui.label("No pending reviews.");
                return;
            }

            // We store actions to execute after UI rendering to avoid borrowing conflicts
            let mut action_complete: Option<(i64, String)> = None;
            let mut action_delete: Option<i64> = None;
            let now = self.engine.now();

            egui::ScrollArea::vertical()
                .id_source("reviews_list")
                .show(ui, |ui| {
                    for review in &self.reviews {
                        let overdue = review.is_overdue(now);
                        ui.group(|ui| {
                            ui.horizontal(|ui| {
                                ui.vertical(|ui| {
                                    ui.label(egui::RichText::new(&review.topic).strong());
                                    let line = format!(
                                        "{} • Cycle {}",
                                        format_due_date(review.due_date),
                                        review.cycle
                                    );
                                    if overdue {
                                        ui.label(
                                            egui::RichText::new(format!("{line} • overdue"))
                                                .color(egui::Color32::RED),
                                        );
                                    } else {
                                        ui.label(line);
                                    }
                                });

                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        if ui.button("Delete").clicked() {
                                            action_delete = Some(review.id);
                                        }
                                        if ui.button("Done").clicked() {
                                            action_complete =
                                                Some((review.id, review.topic.clone()));
                                        }
                                    },
                                );
                            });
                        });
                    }
                });

            // Execute deferred actions
            if let Some((id, topic)) = action_complete {
                self.completion = Some(CompletionDialog {
                    id,
                    topic,
                    correct_input: String::new(),
                    total_input: "40".to_string(),
                    error: None,
                });
            }
            if let Some(id) = action_delete {
                self.handle_delete(id);
            }
        });
    }

    /// Score entry for the review being completed.
    fn render_completion_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = &mut self.completion else {
            return;
        };

        let mut submitted = false;
        let mut cancelled = false;

        egui::Window::new("Complete Review")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!("How did '{}' go?", dialog.topic));
                ui.add_space(5.0);

                ui.horizontal(|ui| {
                    ui.label("Correct answers:");
                    ui.text_edit_singleline(&mut dialog.correct_input);
                });
                ui.horizontal(|ui| {
                    ui.label("Total questions:");
                    ui.text_edit_singleline(&mut dialog.total_input);
                });

                if let Some(error) = &dialog.error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                ui.add_space(5.0);
                ui.horizontal(|ui| {
                    if ui.button("Save").clicked() {
                        submitted = true;
                    }
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                });
            });

        if cancelled {
            self.completion = None;
            return;
        }
        if submitted {
            self.handle_complete();
        }
    }

    fn render_status_dialog(&mut self, ctx: &egui::Context) {
        if !self.show_status_dialog {
            return;
        }

        egui::Window::new("Med Recall")
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(&self.status_message);
                if let Some(link) = &self.calendar_link {
                    ui.add_space(5.0);
                    ui.hyperlink_to("Add to Google Calendar", link);
                }
                ui.add_space(10.0);
                if ui.button("OK").clicked() {
                    self.show_status_dialog = false;
                    self.calendar_link = None;
                }
            });
    }

    fn handle_schedule(&mut self, delay_hours: i64) {
        match self.engine.schedule_initial(&self.topic_input, delay_hours) {
            Ok(record) => {
                let link = google_calendar_link(&record.topic, record.due_date, record.cycle);
                self.show_status(
                    format!(
                        "'{}' scheduled for {}.",
                        record.topic,
                        format_due_date(record.due_date)
                    ),
                    Some(link),
                );
                self.topic_input.clear();
                self.refresh_reviews();
            }
            Err(ScheduleError::EmptyTopic) => {
                self.show_status("Please enter the topic you studied.".to_string(), None);
            }
            Err(e) => {
                warn!("scheduling failed: {e}");
                self.show_status(format!("Scheduling failed: {e}"), None);
            }
        }
    }

    fn handle_complete(&mut self) {
        let Some(dialog) = &mut self.completion else {
            return;
        };

        let parsed = (
            dialog.correct_input.trim().parse::<u32>(),
            dialog.total_input.trim().parse::<u32>(),
        );
        let (correct, total) = match parsed {
            (Ok(correct), Ok(total)) => (correct, total),
            _ => {
                dialog.error = Some("Enter whole numbers for both fields.".to_string());
                return;
            }
        };

        let id = dialog.id;
        match self.engine.complete_review(id, correct, total) {
            Ok(successor) => {
                let link = google_calendar_link(
                    &successor.topic,
                    successor.due_date,
                    successor.cycle,
                );
                self.completion = None;
                self.show_status(
                    format!(
                        "Next review of '{}' in {} days (cycle {}).",
                        successor.topic, successor.last_interval, successor.cycle
                    ),
                    Some(link),
                );
                self.refresh_reviews();
            }
            Err(ScheduleError::InvalidScore(message)) => {
                // Keep the dialog open so the score isn't lost
                if let Some(dialog) = &mut self.completion {
                    dialog.error = Some(message);
                }
            }
            Err(e @ ScheduleError::BrokenLineage { .. }) => {
                warn!("completion of review {id} failed mid-transition: {e}");
                self.completion = None;
                self.show_status(
                    format!("The review was removed but its successor failed to save. {e}"),
                    None,
                );
                self.refresh_reviews();
            }
            Err(e) => {
                warn!("completion of review {id} failed: {e}");
                self.completion = None;
                self.show_status(format!("Could not complete the review: {e}"), None);
                self.refresh_reviews();
            }
        }
    }

    fn handle_delete(&mut self, id: i64) {
        if let Err(e) = self.engine.delete_review(id) {
            warn!("delete of review {id} failed: {e}");
            self.show_status(format!("Could not delete the review: {e}"), None);
        }
        self.refresh_reviews();
    }

    /// Handles backup export to a JSON file.
    fn handle_export(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_file_name("med_recall_backup.json")
            .add_filter("JSON files", &["json"])
            .save_file()
        {
            match export_json_to_path(&self.reviews, path.to_string_lossy().as_ref()) {
                Ok(_) => {
                    self.show_status(
                        format!("Exported {} review(s).", self.reviews.len()),
                        None,
                    );
                }
                Err(e) => {
                    self.show_status(format!("Export failed: {e}"), None);
                }
            }
        }
    }

    /// Handles backup import from a JSON file. Records whose id is already
    /// present are skipped rather than duplicated.
    fn handle_import(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON files", &["json"])
            .pick_file()
        else {
            return;
        };

        match import_json(path.to_string_lossy().as_ref()) {
            Ok(records) => {
                let mut imported = 0usize;
                let mut skipped = 0usize;

                for record in records {
                    match self.engine.contains(record.id) {
                        Ok(true) => skipped += 1,
                        Ok(false) => match self.engine.restore(record) {
                            Ok(_) => imported += 1,
                            Err(e) => {
                                warn!("skipping unusable backup record: {e}");
                                skipped += 1;
                            }
                        },
                        Err(e) => {
                            self.show_status(format!("Import failed: {e}"), None);
                            self.refresh_reviews();
                            return;
                        }
                    }
                }

                self.show_status(
                    format!("Imported {imported} review(s), skipped {skipped}."),
                    None,
                );
                self.refresh_reviews();
            }
            Err(e) => {
                self.show_status(
                    format!(
                        "Import failed: {e}\n\nExpected a JSON array of records like:\n[{{\"id\": 1, \"topic\": \"...\", \"date\": \"...\", \"cycle\": 1, \"lastInterval\": 0}}]"
                    ),
                    None,
                );
            }
        }
    }
}
