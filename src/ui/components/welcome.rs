//! Landing screen

use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

pub const TITLE: &str = "PastPort AI";
pub const TAGLINE: &str = "Talk to history, not just read it.";

const INTRO: &str = "Step into history and converse with iconic figures through AI-powered dialogue. \
    Experience the wisdom of the ages as you engage in conversations that transcend time itself.";

const DISCLAIMER: &str = "Educational experience powered by artificial intelligence • \
    Historical responses are interpretive reconstructions";

pub struct WelcomeScreen<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> WelcomeScreen<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space((ui.available_height() * 0.2).max(self.theme.spacing_lg));

            ui.label(
                RichText::new(TITLE)
                    .size(48.0)
                    .strong()
                    .color(self.theme.text_primary),
            );
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(TAGLINE)
                    .size(20.0)
                    .italics()
                    .color(self.theme.text_secondary),
            );

            ui.add_space(self.theme.spacing_lg);
            ui.scope(|ui| {
                ui.set_max_width(560.0);
                ui.label(RichText::new(INTRO).size(15.0).color(self.theme.text_primary));
            });
            ui.add_space(self.theme.spacing_lg * 1.5);

            let button = egui::Button::new(
                RichText::new("Get Started").size(20.0).color(egui::Color32::WHITE),
            )
            .fill(self.theme.primary)
            .rounding(egui::Rounding::same(28))
            .min_size(Vec2::new(220.0, 56.0));

            let response = ui.add(button);
            response.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Get Started")
            });
            if response.clicked() {
                self.state.get_started();
            }

            ui.add_space(self.theme.spacing_lg * 2.0);
            ui.label(RichText::new(DISCLAIMER).size(12.0).color(self.theme.text_muted));
        });
    }
}
