//! GUI implementation with egui/eframe
//!
//! This module provides the desktop user interface for PastPort using the
//! eframe framework.

mod app;
pub mod components;
mod state;
mod theme;

pub use app::PastportApp;
pub use state::{AppState, RecordingState};
pub use theme::Theme;

use crate::api::AudioUpload;
use crate::config::AppConfig;
use crate::screen::Screen;
use components::{InputBar, MessageList, PersonaGallery, ProfilePanel, WelcomeScreen};
use egui::{CentralPanel, RichText, SidePanel, TopBottomPanel};
use tracing::{info, warn};

type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Run the PastPort application
pub fn run(config: AppConfig) -> eframe::Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([720.0, 480.0])
            .with_drag_and_drop(true)
            .with_title("PastPort AI"),
        ..Default::default()
    };

    eframe::run_native(
        "PastPort",
        options,
        Box::new(
            move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, DynError> {
                Ok(Box::new(PastportApp::new(cc, config)?))
            },
        ),
    )
}

/// Draw whichever screen is active
pub fn show_screen(ctx: &egui::Context, state: &mut AppState, theme: &Theme) {
    match state.screen() {
        Screen::Welcome => {
            CentralPanel::default()
                .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing_lg))
                .show(ctx, |ui| WelcomeScreen::new(state, theme).show(ui));
        }
        Screen::Selection => {
            CentralPanel::default()
                .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing_lg))
                .show(ctx, |ui| PersonaGallery::new(state, theme).show(ui));
        }
        Screen::Chat => show_chat(ctx, state, theme),
    }
}

fn show_chat(ctx: &egui::Context, state: &mut AppState, theme: &Theme) {
    TopBottomPanel::top("chat_header")
        .frame(egui::Frame::none().fill(theme.bg_secondary).inner_margin(12.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let back = ui.add(
                    egui::Button::new("← Back to Selection").stroke(theme.secondary_button_stroke()),
                );
                back.widget_info(|| {
                    egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Back to Selection")
                });
                if back.clicked() {
                    state.go_back();
                }

                if let Some(persona) = state.nav.selected_persona() {
                    ui.add_space(theme.spacing);
                    ui.label(
                        RichText::new(persona.name)
                            .size(20.0)
                            .strong()
                            .color(theme.text_primary),
                    );
                }
            });

            let mut dismiss = false;
            if let Some(error) = &state.last_error {
                ui.add_space(theme.spacing_sm);
                ui.horizontal(|ui| {
                    ui.label(RichText::new(format!("⚠ {}", error)).color(theme.error));
                    dismiss = ui.small_button("✕").on_hover_text("Dismiss").clicked();
                });
            }
            if dismiss {
                state.last_error = None;
            }
        });

    // Back may have left the chat
    if state.screen() != Screen::Chat {
        return;
    }

    SidePanel::left("profile_panel")
        .resizable(false)
        .exact_width(260.0)
        .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
        .show(ctx, |ui| {
            ProfilePanel::new(state, theme).show(ui);
        });

    TopBottomPanel::bottom("input_area")
        .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
        .show(ctx, |ui| {
            InputBar::new(state, theme).show(ui);
        });

    CentralPanel::default()
        .frame(egui::Frame::none().fill(theme.bg_primary).inner_margin(theme.spacing))
        .show(ctx, |ui| {
            if let Some(session) = state.session() {
                MessageList::new(session, theme).show(ui);
            }
        });

    if ctx.input(|i| !i.raw.hovered_files.is_empty()) {
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("file_drop_overlay"),
        ));
        let screen = ctx.screen_rect();
        painter.rect_filled(screen, 0.0, egui::Color32::from_black_alpha(120));
        painter.text(
            screen.center(),
            egui::Align2::CENTER_CENTER,
            "Drop an audio file to ask by voice",
            egui::FontId::proportional(22.0),
            egui::Color32::WHITE,
        );
    }
}

/// Upload an audio file dropped onto the chat window
pub fn handle_dropped_files(ctx: &egui::Context, state: &mut AppState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    if state.screen() != Screen::Chat {
        return;
    }

    // One upload at a time; extra files are ignored
    let Some(file) = dropped.into_iter().next() else {
        return;
    };

    let upload = match (&file.bytes, &file.path) {
        (Some(bytes), _) => AudioUpload::from_named_bytes(&file.name, bytes.to_vec()),
        (None, Some(path)) => AudioUpload::from_path(path),
        (None, None) => return,
    };

    match upload {
        Ok(upload) => {
            info!("Audio file dropped: {}", upload.file_name);
            state.upload_audio(upload);
        }
        Err(e) => {
            warn!("Rejected dropped file: {}", e);
            state.report_error(&e);
        }
    }
}
