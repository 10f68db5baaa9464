//! Input bar component
//!
//! Provides the record button, the question box and the send control.

use crate::ui::state::{AppState, RecordingState};
use crate::ui::theme::Theme;
use egui::{self, Key, Modifiers, RichText, Vec2};

pub const INPUT_ID: &str = "message_input";

pub const DISCLAIMER: &str = "AI responses are reconstructions based on historical records.";

/// Input bar component for text and voice input
pub struct InputBar<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> InputBar<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(egui::Color32::WHITE)
            .rounding(self.theme.card_rounding)
            .stroke(egui::Stroke::new(1.0, self.theme.bg_tertiary))
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    self.show_record_button(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_text_input(ui);
                    ui.add_space(self.theme.spacing_sm);
                    self.show_send_button(ui);
                });
            });

        ui.vertical_centered(|ui| {
            ui.label(RichText::new(DISCLAIMER).size(11.0).color(self.theme.text_muted));
        });
    }

    fn show_record_button(&mut self, ui: &mut egui::Ui) {
        let is_recording = self.state.recording_state == RecordingState::Recording;
        let is_processing = self.state.recording_state == RecordingState::Processing;
        let enabled = self.state.audio_input_available
            && !is_processing
            && (is_recording || !self.state.is_loading());

        let (icon, tooltip, color) = match self.state.recording_state {
            _ if !self.state.audio_input_available => {
                ("🎤", "No microphone available", self.theme.text_muted)
            }
            RecordingState::Idle => ("🎤", "Hold to record, right-click to cancel", self.theme.text_secondary),
            RecordingState::Recording => ("⏹", "Release to send", self.theme.recording),
            RecordingState::Processing => ("⏳", "Processing...", self.theme.warning),
        };

        let button = egui::Button::new(RichText::new(icon).size(20.0).color(color))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding);

        let button = if is_recording {
            button.fill(self.theme.recording.gamma_multiply(0.2))
        } else {
            button
        };

        let response = ui.add_enabled(enabled, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, enabled, "Record question")
        });

        let button_rect = response.rect;
        let is_pointer_down = response.is_pointer_button_down_on();
        let was_right_clicked = response.secondary_clicked();
        response.on_hover_text(tooltip);

        // Push-to-talk
        if is_pointer_down && !is_recording && enabled {
            self.state.start_recording();
        } else if !is_pointer_down && is_recording {
            self.state.stop_recording();
        }

        if was_right_clicked && is_recording {
            self.state.cancel_recording();
        }

        // Pulsing ring while the microphone is open
        if is_recording {
            let t = ui.ctx().input(|i| i.time);
            let pulse = ((t * 3.0).sin() * 0.5 + 0.5) as f32;

            let center = button_rect.center();
            let radius = button_rect.width() / 2.0 + 2.0 + pulse * 3.0;
            ui.painter().circle_stroke(
                center,
                radius,
                egui::Stroke::new(2.0 * pulse, self.theme.recording.gamma_multiply(1.0 - pulse * 0.5)),
            );

            ui.ctx().request_repaint();
        }
    }

    fn show_text_input(&mut self, ui: &mut egui::Ui) {
        let is_loading = self.state.is_loading();
        let is_recording = self.state.recording_state != RecordingState::Idle;
        let id = egui::Id::new(INPUT_ID);

        // Enter sends, Shift+Enter falls through to the text box as a newline
        let has_focus = ui.memory(|m| m.has_focus(id));
        let submit = has_focus
            && !ui.input(|i| i.modifiers.shift)
            && ui.input_mut(|i| i.consume_key(Modifiers::NONE, Key::Enter));

        let hint = if is_loading {
            "Processing request..."
        } else {
            "Ask your question..."
        };

        let available_width = ui.available_width() - 60.0; // Reserve space for send button

        let Some(session) = self.state.session_mut() else {
            return;
        };

        let text_edit = egui::TextEdit::multiline(&mut session.input_text)
            .id(id)
            .hint_text(hint)
            .desired_rows(1)
            .desired_width(available_width)
            .font(egui::TextStyle::Body)
            .margin(egui::Margin::symmetric(12, 8));

        let enabled = !is_loading && !is_recording;
        let response = ui.add_enabled(enabled, text_edit);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, enabled, "Message input")
        });

        if submit {
            self.state.send_message();
            ui.memory_mut(|m| m.request_focus(id));
        }
    }

    fn show_send_button(&mut self, ui: &mut egui::Ui) {
        let can_send = self.state.recording_state == RecordingState::Idle
            && self.state.session().is_some_and(|s| s.can_send());

        let button_color = if can_send {
            self.theme.primary
        } else {
            self.theme.text_muted
        };

        let button = egui::Button::new(RichText::new("➤").size(18.0).color(egui::Color32::WHITE))
            .min_size(Vec2::splat(44.0))
            .rounding(self.theme.button_rounding)
            .fill(button_color);

        let response = ui.add_enabled(can_send, button);
        response.widget_info(|| {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, can_send, "Send message")
        });

        if response.clicked() {
            self.state.send_message();
        }

        response.on_hover_text("Send message (Enter)");
    }
}
