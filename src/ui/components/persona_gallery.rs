//! Persona selection grid

use crate::personas::{self, Persona};
use crate::ui::state::AppState;
use crate::ui::theme::Theme;
use egui::load::TexturePoll;
use egui::{self, Align2, Color32, FontId, RichText, Sense, Vec2};

const CARD_WIDTH: f32 = 260.0;

pub struct PersonaGallery<'a> {
    state: &'a mut AppState,
    theme: &'a Theme,
}

impl<'a> PersonaGallery<'a> {
    pub fn new(state: &'a mut AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        let back = ui.add(egui::Button::new("← Back").stroke(self.theme.secondary_button_stroke()));
        back.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Back"));
        if back.clicked() {
            self.state.go_back();
            return;
        }

        let mut chosen: Option<&'static Persona> = None;

        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(self.theme.spacing);
                    ui.label(
                        RichText::new("Choose a Historical Figure")
                            .size(36.0)
                            .color(self.theme.text_primary),
                    );
                    ui.label(
                        RichText::new("Select a figure from the past to begin your conversation")
                            .size(16.0)
                            .color(self.theme.text_secondary),
                    );
                    ui.add_space(self.theme.spacing_lg);
                });

                // Lay the cards out in as many columns as fit
                let per_row = ((ui.available_width() + self.theme.spacing)
                    / (CARD_WIDTH + self.theme.spacing))
                    .floor()
                    .max(1.0) as usize;

                for row in personas::catalog().chunks(per_row) {
                    let row_width = row.len() as f32 * (CARD_WIDTH + self.theme.spacing);
                    ui.horizontal(|ui| {
                        ui.add_space(((ui.available_width() - row_width) / 2.0).max(0.0));
                        for persona in row {
                            if self.show_card(ui, persona) {
                                chosen = Some(persona);
                            }
                            ui.add_space(self.theme.spacing);
                        }
                    });
                    ui.add_space(self.theme.spacing);
                }
            });

        if let Some(persona) = chosen {
            self.state.select_persona(persona);
        }
    }

    fn show_card(&self, ui: &mut egui::Ui, persona: &'static Persona) -> bool {
        let mut selected = false;

        egui::Frame::none()
            .fill(Color32::WHITE)
            .rounding(self.theme.card_rounding)
            .stroke(egui::Stroke::new(1.0, self.theme.bg_tertiary))
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH - 2.0 * self.theme.spacing);
                ui.vertical_centered(|ui| {
                    portrait(ui, persona, 96.0, self.theme);
                    ui.add_space(self.theme.spacing_sm);

                    ui.label(RichText::new(persona.name).size(22.0).color(self.theme.text_primary));
                    ui.label(RichText::new(persona.era).size(13.0).color(self.theme.primary));
                    ui.label(RichText::new(persona.description).color(self.theme.text_secondary));
                    ui.add_space(self.theme.spacing_sm);
                    ui.label(RichText::new(persona.bio).size(12.0).color(self.theme.text_muted));
                    ui.add_space(self.theme.spacing);

                    let button = egui::Button::new(RichText::new("Talk to Me").color(Color32::WHITE))
                        .fill(self.theme.primary)
                        .rounding(self.theme.button_rounding)
                        .min_size(Vec2::new(ui.available_width(), 40.0));
                    let response = ui.add(button);
                    let label = format!("Talk to {}", persona.name);
                    response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::Button, true, &label)
                    });
                    selected = response.clicked();
                });
            });

        selected
    }
}

/// Persona portrait, clipped to a circle. The monogram stands in while the
/// picture is loading or when it cannot be fetched.
pub fn portrait(ui: &mut egui::Ui, persona: &Persona, size: f32, theme: &Theme) -> egui::Response {
    let image = egui::Image::new(persona.image)
        .fit_to_exact_size(Vec2::splat(size))
        .rounding(size / 2.0);

    let response = match image.load_for_size(ui.ctx(), Vec2::splat(size)) {
        Ok(TexturePoll::Ready { .. }) => ui.add(image),
        Ok(TexturePoll::Pending { .. }) | Err(_) => monogram(ui, persona, size, theme),
    };

    let label = format!("Portrait of {}", persona.name);
    response.widget_info(|| egui::WidgetInfo::labeled(egui::WidgetType::Image, true, &label));
    response
}

fn monogram(ui: &mut egui::Ui, persona: &Persona, size: f32, theme: &Theme) -> egui::Response {
    let (rect, response) = ui.allocate_exact_size(Vec2::splat(size), Sense::hover());
    let painter = ui.painter();
    painter.circle_filled(rect.center(), size / 2.0, theme.secondary);
    painter.circle_stroke(
        rect.center(),
        size / 2.0,
        egui::Stroke::new(2.0, theme.primary.gamma_multiply(0.5)),
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        persona.monogram(),
        FontId::proportional(size * 0.38),
        Color32::WHITE,
    );
    response
}
