//! Audio player component
//!
//! Play/pause and progress for the latest reply audio.

use crate::audio::{PlaybackState, ReplayState};
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

pub const WAITING_TEXT: &str = "Waiting for response...";
pub const UNAVAILABLE_TEXT: &str = "Audio unavailable";

/// Audio player component
pub struct AudioPlayer<'a> {
    replay: &'a mut ReplayState,
    theme: &'a Theme,
}

impl<'a> AudioPlayer<'a> {
    pub fn new(replay: &'a mut ReplayState, theme: &'a Theme) -> Self {
        Self { replay, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        match self.replay.state() {
            PlaybackState::Idle => {
                ui.label(RichText::new(WAITING_TEXT).size(12.0).color(self.theme.text_muted));
                return;
            }
            PlaybackState::Unavailable => {
                ui.label(RichText::new(UNAVAILABLE_TEXT).size(12.0).color(self.theme.text_muted));
                return;
            }
            _ => {}
        }

        let is_ready = self.replay.is_ready();
        let is_playing = self.replay.is_playing();

        ui.horizontal(|ui| {
            let icon = if is_playing { "⏸" } else { "▶" };
            let button = egui::Button::new(RichText::new(icon).size(16.0).color(self.theme.primary))
                .fill(egui::Color32::WHITE)
                .rounding(egui::Rounding::same(18))
                .min_size(Vec2::splat(36.0));

            let response = ui.add_enabled(is_ready, button);
            let label = if is_playing { "Pause reply" } else { "Play reply" };
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, is_ready, label)
            });
            if response.clicked() {
                self.replay.toggle();
            }

            ui.vertical(|ui| {
                let width = ui.available_width().max(60.0);
                ui.add(
                    egui::ProgressBar::new(self.replay.progress())
                        .desired_width(width)
                        .desired_height(6.0)
                        .fill(self.theme.primary),
                );

                let caption = if self.replay.state() == PlaybackState::Loading {
                    "Loading...".to_string()
                } else {
                    self.replay.time_label()
                };
                ui.label(RichText::new(caption).size(11.0).color(self.theme.text_secondary));
            });
        });
    }
}
