//! Message list component
//!
//! Displays the conversation with one persona.

use crate::messages::{Message, Sender};
use crate::session::ChatSession;
use crate::ui::theme::Theme;
use egui::{self, Align, RichText};

/// Message list component
pub struct MessageList<'a> {
    session: &'a ChatSession,
    theme: &'a Theme,
}

impl<'a> MessageList<'a> {
    pub fn new(session: &'a ChatSession, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        egui::ScrollArea::vertical()
            .id_salt("message_list")
            .auto_shrink([false, false])
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add_space(self.theme.spacing);

                for message in self.session.messages() {
                    self.show_message(ui, message);
                    ui.add_space(self.theme.spacing_sm);
                }

                if self.session.is_loading() {
                    self.show_thinking(ui);
                }

                ui.add_space(self.theme.spacing);
            });
    }

    fn show_message(&self, ui: &mut egui::Ui, message: &Message) {
        let is_user = message.sender == Sender::User;
        let persona = self.session.persona();

        let (bubble_color, sender_name, accessible_prefix) = if is_user {
            (self.theme.user_bubble, "You", "User message")
        } else {
            (self.theme.persona_bubble, persona.name, "Persona message")
        };

        // Align messages based on sender
        let align = if is_user { Align::RIGHT } else { Align::LEFT };

        ui.with_layout(egui::Layout::top_down(align), |ui| {
            ui.label(
                RichText::new(sender_name)
                    .size(12.0)
                    .color(self.theme.text_muted),
            );

            let max_width = ui.available_width() * 0.7;

            egui::Frame::none()
                .fill(bubble_color)
                .rounding(self.theme.bubble_rounding)
                .stroke(egui::Stroke::new(1.0, self.theme.primary.gamma_multiply(0.15)))
                .inner_margin(egui::Margin::symmetric(16, 10))
                .show(ui, |ui| {
                    ui.set_max_width(max_width);
                    let response = ui.label(RichText::new(&message.text).color(self.theme.text_primary));
                    let label = format!("{}: {}", accessible_prefix, message.text);
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Label, true, &label)
                    });
                });

            let time_str = message
                .timestamp
                .with_timezone(&chrono::Local)
                .format("%H:%M")
                .to_string();
            ui.label(
                RichText::new(time_str)
                    .size(10.0)
                    .color(self.theme.text_muted),
            );
        });
    }

    fn show_thinking(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("⏳").color(self.theme.primary));
            ui.label(
                RichText::new(format!("{} is thinking...", self.session.persona().name))
                    .italics()
                    .color(self.theme.text_muted),
            );
        });
    }
}
