use eframe::egui::{Color32, Context, RichText, Ui, Visuals};

use crate::ui::config::UI_CONFIG;

/// Extension trait to add semantic styling methods directly to `egui::Ui`.
pub trait UiStyleExt {
    /// Renders small, muted text (good for labels like "Market:").
    fn label_subdued(&mut self, text: impl Into<String>);

    /// Renders a section header using the configured global color.
    fn label_header(&mut self, text: impl Into<String>);

    /// Renders an error message (Red).
    fn label_error(&mut self, text: impl Into<String>);
}

impl UiStyleExt for Ui {
    fn label_subdued(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).small().color(UI_CONFIG.colors.label));
    }

    fn label_header(&mut self, text: impl Into<String>) {
        let text = text.into().to_uppercase() + ":";
        self.label(RichText::new(text).color(UI_CONFIG.colors.heading).monospace());
    }

    fn label_error(&mut self, text: impl Into<String>) {
        self.label(RichText::new(text).color(UI_CONFIG.colors.toast_error));
    }
}

/// Light theme to match the chart's white background
pub fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::light();

    visuals.panel_fill = UI_CONFIG.colors.central_panel;
    visuals.window_fill = UI_CONFIG.colors.toast_fill;

    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;

    ctx.set_visuals(visuals);
}

/// Status dot color for the relay connection
pub fn status_color(connected: bool) -> Color32 {
    if connected {
        Color32::from_rgb(34, 197, 94)
    } else {
        UI_CONFIG.colors.toast_error
    }
}
