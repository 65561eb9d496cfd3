use std::time::Duration;

use client_core::{ActivityRow, DisplayModel, DisplayRow, RecommendationRow};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{QueryMode, SAMPLE_USER_IDS};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::console::ConsoleController;
use crate::controller::events::UiEvent;
use crate::ui::theme;

#[derive(Debug, Clone, Default)]
pub struct StartupConfig {
    pub api_url: String,
    pub user_id: Option<String>,
}

pub struct AgentConsoleApp {
    controller: ConsoleController,
    ui_rx: Receiver<UiEvent>,
    api_url: String,
}

impl AgentConsoleApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        startup: StartupConfig,
    ) -> Self {
        Self {
            controller: ConsoleController::new(cmd_tx, startup.user_id),
            ui_rx,
            api_url: startup.api_url,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply(event);
        }
    }

    fn show_header(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("console_header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("🧠").size(24.0));
                ui.vertical(|ui| {
                    ui.heading("AI Recommendation Agent");
                    ui.weak("Intelligent insights from your activity patterns");
                });
            });
            ui.add_space(6.0);
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("console_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.controller.status());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.small(&self.api_url);
                });
            });
        });
    }

    fn show_query_card(&mut self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::symmetric(14, 12))
            .show(ui, |ui| {
                ui.label(egui::RichText::new("User ID").strong());

                let mut user_id_buf = self.controller.session().user_id().to_string();
                let mut submit = false;
                ui.horizontal(|ui| {
                    let button_width = 190.0;
                    let input = ui.add(
                        egui::TextEdit::singleline(&mut user_id_buf)
                            .id_salt("user_id_input")
                            .hint_text("e.g., sales_rep_001, customer_success_001")
                            .desired_width(ui.available_width() - button_width),
                    );
                    if input.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }

                    let session = self.controller.session();
                    let label = if session.is_loading_for(session.mode()) {
                        "Loading...".to_string()
                    } else {
                        match session.mode() {
                            QueryMode::Recommendations => "📈 Get Recommendations".to_string(),
                            QueryMode::Activities => "📋 View Activities".to_string(),
                        }
                    };
                    let button = egui::Button::new(egui::RichText::new(label).strong())
                        .min_size(egui::vec2(button_width - 8.0, 0.0));
                    if ui.add(button).clicked() {
                        submit = true;
                    }
                    if session.is_loading() {
                        ui.spinner();
                    }
                });
                self.controller.edit_user_id(user_id_buf);

                ui.add_space(6.0);
                ui.horizontal_wrapped(|ui| {
                    ui.small("💡 Try these sample users:");
                    for sample in SAMPLE_USER_IDS {
                        if ui.small_button(sample).clicked() {
                            self.controller.edit_user_id(sample.to_string());
                        }
                    }
                });

                if submit {
                    self.controller.submit();
                }
            });
    }

    fn show_mode_tabs(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            for mode in QueryMode::ALL {
                let selected = self.controller.session().mode() == mode;
                let tab = egui::Button::new(egui::RichText::new(mode.label()).strong())
                    .selected(selected)
                    .min_size(egui::vec2(140.0, 30.0));
                if ui.add(tab).clicked() {
                    self.controller.select_mode(mode);
                }
            }
        });
    }

    fn show_error_banner(&self, ui: &mut egui::Ui) {
        let Some(message) = self
            .controller
            .backend_failure()
            .or_else(|| self.controller.session().error())
        else {
            return;
        };

        egui::Frame::NONE
            .fill(theme::ERROR_FILL)
            .stroke(egui::Stroke::new(1.0, theme::ERROR_STROKE))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(egui::RichText::new("⚠").color(theme::ERROR_TEXT));
                    ui.label(egui::RichText::new(message).color(theme::ERROR_TEXT));
                });
            });
    }

    fn show_results(&self, ui: &mut egui::Ui) {
        let session = self.controller.session();
        if let Some(model) = session.active_display() {
            show_display_model(ui, &model);
        } else if session.is_loading_for(session.mode()) {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.weak("Waiting for the agent service...");
            });
        } else if session.is_idle() {
            show_idle_state(ui);
        }
    }
}

fn show_display_model(ui: &mut egui::Ui, model: &DisplayModel) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::symmetric(16, 14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.heading(&model.title);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.weak(&model.summary);
                });
            });
            ui.separator();

            if let Some(empty) = &model.empty_state {
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    ui.label(egui::RichText::new(&empty.title).strong());
                    ui.weak(&empty.hint);
                    ui.add_space(12.0);
                });
            }

            for row in &model.rows {
                match row {
                    DisplayRow::Recommendation(row) => show_recommendation_row(ui, row),
                    DisplayRow::Activity(row) => show_activity_row(ui, row),
                }
                ui.add_space(6.0);
            }

            if let Some(footer) = &model.footer {
                ui.separator();
                ui.small(format!("🕑 {footer}"));
            }
        });
}

fn show_recommendation_row(ui: &mut egui::Ui, row: &RecommendationRow) {
    egui::Frame::NONE
        .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!(" {} ", row.ordinal))
                        .strong()
                        .color(theme::ACCENT),
                );
                ui.label(egui::RichText::new(&row.action).strong());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let colors = theme::severity_colors(row.severity);
                    egui::Frame::NONE
                        .fill(colors.fill)
                        .stroke(egui::Stroke::new(1.0, colors.stroke))
                        .corner_radius(10.0)
                        .inner_margin(egui::Margin::symmetric(8, 2))
                        .show(ui, |ui| {
                            ui.label(
                                egui::RichText::new(&row.priority_label)
                                    .small()
                                    .color(colors.text),
                            );
                        });
                });
            });
            if !row.reason.is_empty() {
                ui.horizontal_wrapped(|ui| {
                    ui.add_space(28.0);
                    ui.weak(&row.reason);
                });
            }
        });
}

fn show_activity_row(ui: &mut egui::Ui, row: &ActivityRow) {
    ui.push_id(&row.key, |ui| {
        egui::Frame::NONE
            .stroke(ui.visuals().widgets.noninteractive.bg_stroke)
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(12, 8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(egui::RichText::new("●").color(theme::ACTIVITY_DOT));
                    ui.label(egui::RichText::new(&row.action).strong());
                    ui.small(&row.timestamp);
                });
                if let Some(context) = &row.context {
                    ui.horizontal_wrapped(|ui| {
                        ui.add_space(18.0);
                        ui.weak(context);
                    });
                }
            });
    });
}

fn show_idle_state(ui: &mut egui::Ui) {
    egui::Frame::group(ui.style())
        .inner_margin(egui::Margin::same(36))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("🧠").size(40.0).weak());
                ui.label(egui::RichText::new("Ready to analyze").strong().size(18.0));
                ui.weak("Enter a user ID above and click the button to get started");
            });
        });
}

impl eframe::App for AgentConsoleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        self.show_header(ctx);
        self.show_status_bar(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.style_mut().spacing.item_spacing = egui::vec2(10.0, 10.0);
                    self.show_query_card(ui);
                    self.show_mode_tabs(ui);
                    self.show_error_banner(ui);
                    self.show_results(ui);
                });
        });

        if self.controller.session().is_loading() {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
