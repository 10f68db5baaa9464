//! Side panel with the persona's profile and the reply player

use super::audio_player::AudioPlayer;
use super::persona_gallery::portrait;
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::{self, RichText};

pub struct ProfilePanel<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> ProfilePanel<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let Some(persona) = self.state.nav.selected_persona() else {
            return;
        };

        ui.vertical_centered(|ui| {
            ui.add_space(self.theme.spacing);
            portrait(ui, persona, 112.0, self.theme);
            ui.add_space(self.theme.spacing_sm);
            ui.label(
                RichText::new(persona.name)
                    .size(18.0)
                    .strong()
                    .color(self.theme.text_secondary),
            );
            ui.label(RichText::new(persona.era).size(13.0).color(self.theme.text_muted));
        });

        ui.add_space(self.theme.spacing_sm);
        ui.label(RichText::new(persona.bio).size(13.0).color(self.theme.text_primary));
        ui.add_space(self.theme.spacing);

        egui::Frame::none()
            .fill(self.theme.bg_secondary)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(RichText::new("Voice Playback").size(12.0).color(self.theme.text_secondary));
                AudioPlayer::new(&mut self.state.replay, self.theme).show(ui);
            });
    }
}
