use std::time::Duration;

use client_core::{
    render_card,
    view::{END_OF_RECORDS_NOTICE, SEARCH_HINT},
    DashboardController,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::controller::reducer::apply_ui_event;
use crate::ui::card::show_user_card;

const CONTENT_MAX_WIDTH: f32 = 896.0;

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    controller: DashboardController,
    search_draft: String,
    status: String,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        controller: DashboardController,
    ) -> Self {
        let search_draft = controller.state().search_query.clone();
        Self {
            cmd_tx,
            ui_rx,
            controller,
            search_draft,
            status: "Starting backend worker...".to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.controller, event, &mut self.status);
        }
    }

    fn request_load(&mut self) {
        let Some(request) = self.controller.begin_load() else {
            return;
        };
        if let Err(err) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::FetchBatch(request))
        {
            self.controller.abort_load(err.message());
            self.status = err.message().to_string();
        }
    }

    fn show_error_banner(ui: &mut egui::Ui, message: &str) {
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
            });
    }

    fn show_dashboard(&mut self, ui: &mut egui::Ui) {
        ui.heading("User Dashboard");
        ui.add_space(12.0);

        let search = ui.add(
            egui::TextEdit::singleline(&mut self.search_draft)
                .hint_text(SEARCH_HINT)
                .desired_width(f32::INFINITY),
        );
        if search.changed() {
            self.controller.set_search_query(self.search_draft.clone());
        }
        ui.add_space(16.0);

        let mut load_clicked = false;
        let view = self.controller.view();

        if let Some(message) = view.error_banner {
            Self::show_error_banner(ui, message);
            ui.add_space(12.0);
        }

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for record in &view.records {
                    show_user_card(ui, &render_card(record));
                    ui.add_space(8.0);
                }

                if let Some(label) = view.load_control.label() {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        load_clicked = ui
                            .add_enabled_ui(view.load_control.is_clickable(), |ui| {
                                ui.horizontal(|ui| {
                                    if view.load_control.shows_spinner() {
                                        ui.add(egui::Spinner::new());
                                    }
                                    ui.button(label).clicked()
                                })
                                .inner
                            })
                            .inner;
                    });
                }

                if view.show_end_notice {
                    ui.add_space(16.0);
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(END_OF_RECORDS_NOTICE).weak());
                    });
                }
            });

        ui.separator();
        ui.label(
            egui::RichText::new(format!(
                "Showing {} of {} loaded · {}",
                view.matched(),
                view.loaded,
                self.status
            ))
            .small()
            .weak(),
        );

        if load_clicked {
            self.request_load();
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        if self.controller.needs_initial_load() {
            self.request_load();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            let width = ui.available_width().min(CONTENT_MAX_WIDTH);
            ui.vertical_centered(|ui| {
                ui.set_max_width(width);
                ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                    self.show_dashboard(ui);
                });
            });
        });

        if self.controller.state().loading {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use client_core::{DashboardSettings, LoadPhase, MockRecordSource};
    use std::sync::Arc;
    use crossbeam_channel::bounded;

    fn app(capacity: usize) -> (DashboardApp, Receiver<BackendCommand>) {
        let (cmd_tx, cmd_rx) = bounded(capacity);
        let (_ui_tx, ui_rx) = bounded(1);
        let controller = DashboardController::mount(
            &DashboardSettings::default(),
            Arc::new(MockRecordSource::generate(100, Some(1))),
        );
        (DashboardApp::new(cmd_tx, ui_rx, controller), cmd_rx)
    }

    #[test]
    fn request_load_queues_one_fetch_while_loading() {
        let (mut app, cmd_rx) = app(4);
        app.request_load();
        app.request_load();
        assert_eq!(cmd_rx.len(), 1);
        assert_eq!(app.controller.phase(), LoadPhase::Loading);
    }

    #[test]
    fn failed_dispatch_leaves_controller_retryable() {
        let (mut app, cmd_rx) = app(1);
        drop(cmd_rx);
        app.request_load();
        assert_eq!(app.controller.phase(), LoadPhase::Error);
        assert!(app.status.contains("disconnected"));
        assert!(app.controller.begin_load().is_some());
    }
}
