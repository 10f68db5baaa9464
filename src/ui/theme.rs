//! Theme and styling for the PastPort UI
//!
//! Warm parchment tones with a gold accent.

use egui::{Color32, FontFamily, FontId, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Primary accent color
    pub primary: Color32,
    /// Secondary accent color
    pub secondary: Color32,
    /// Warning color
    pub warning: Color32,
    /// Error color
    pub error: Color32,

    /// Background colors
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Message bubbles
    pub user_bubble: Color32,
    pub persona_bubble: Color32,

    /// Recording indicator color
    pub recording: Color32,

    /// Border radius for buttons
    pub button_rounding: Rounding,
    /// Border radius for cards/panels
    pub card_rounding: Rounding,
    pub bubble_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    /// Large spacing
    pub spacing_lg: f32,
    /// Small spacing
    pub spacing_sm: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::parchment()
    }
}

impl Theme {
    /// Light parchment theme
    pub fn parchment() -> Self {
        Self {
            primary: Color32::from_rgb(184, 134, 11),   // Dark goldenrod
            secondary: Color32::from_rgb(212, 175, 55), // Old gold
            warning: Color32::from_rgb(202, 138, 4),    // Amber
            error: Color32::from_rgb(178, 34, 34),      // Brick

            bg_primary: Color32::from_rgb(250, 244, 230),   // Parchment
            bg_secondary: Color32::from_rgb(241, 230, 205), // Aged paper
            bg_tertiary: Color32::from_rgb(226, 211, 178),  // Vellum

            text_primary: Color32::from_rgb(30, 30, 30),    // Ink
            text_secondary: Color32::from_rgb(107, 75, 44), // Sepia
            text_muted: Color32::from_rgb(140, 120, 95),

            user_bubble: Color32::from_rgb(255, 247, 224),
            persona_bubble: Color32::WHITE,

            recording: Color32::from_rgb(178, 34, 34),

            button_rounding: Rounding::same(8),
            card_rounding: Rounding::same(12),
            bubble_rounding: Rounding::same(14),

            spacing: 16.0,
            spacing_lg: 24.0,
            spacing_sm: 8.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::light();

        // Panel backgrounds
        visuals.panel_fill = self.bg_primary;
        visuals.window_fill = self.bg_secondary;
        visuals.extreme_bg_color = Color32::WHITE;

        // Widget colors
        visuals.widgets.noninteractive.bg_fill = self.bg_secondary;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.inactive.bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.weak_bg_fill = self.bg_tertiary;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.weak_bg_fill = self.primary.gamma_multiply(0.8);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, Color32::WHITE);

        visuals.widgets.active.bg_fill = self.primary;
        visuals.widgets.active.weak_bg_fill = self.primary;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, Color32::WHITE);

        visuals.selection.bg_fill = self.primary.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.primary);

        visuals.hyperlink_color = self.primary;

        visuals.window_corner_radius = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.bg_tertiary);

        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = egui::Margin::same(self.spacing as i8);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(28.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(15.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(15.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }

    /// Outline for secondary buttons
    pub fn secondary_button_stroke(&self) -> Stroke {
        Stroke::new(1.0, self.text_muted)
    }
}
