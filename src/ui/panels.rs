use eframe::egui::{ComboBox, Spinner, Ui};
use strum::IntoEnumIterator;

use crate::domain::{MarketInfo, Timeframe};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::styles::UiStyleExt;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

/// Market selector. Stays empty while loading or after a failed fetch.
pub struct MarketPanel<'a> {
    markets: &'a [MarketInfo],
    selected_market: Option<String>,
    loading: bool,
}

impl<'a> MarketPanel<'a> {
    pub fn new(markets: &'a [MarketInfo], selected_market: Option<String>, loading: bool) -> Self {
        Self {
            markets,
            selected_market,
            loading,
        }
    }

    fn selected_label(&self) -> String {
        self.selected_market
            .as_deref()
            .and_then(|name| self.markets.iter().find(|m| m.name == name))
            .map(MarketInfo::label)
            .unwrap_or_else(|| UI_TEXT.market_placeholder.to_string())
    }
}

impl<'a> Panel for MarketPanel<'a> {
    /// Name of the newly picked market
    type Event = String;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.label_header(UI_TEXT.market_heading);

        if self.loading {
            ui.add(Spinner::new());
            ui.label_subdued(UI_TEXT.markets_loading);
            return events;
        }

        let previously_selected = self.selected_market.clone();
        ComboBox::from_id_salt("market_selector")
            .width(UI_CONFIG.market_selector_width)
            .selected_text(self.selected_label())
            .show_ui(ui, |ui| {
                for market in self.markets {
                    let is_selected = self.selected_market.as_deref() == Some(market.name.as_str());
                    if ui.selectable_label(is_selected, market.label()).clicked() {
                        self.selected_market = Some(market.name.clone());
                    }
                }
            });

        if self.selected_market != previously_selected {
            if let Some(name) = &self.selected_market {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("A new market was selected: {}", name);
                }
                events.push(name.clone());
            }
        }
        events
    }
}

/// One toggle button per timeframe
pub struct TimeframePanel {
    selected: Timeframe,
}

impl TimeframePanel {
    pub fn new(selected: Timeframe) -> Self {
        Self { selected }
    }
}

impl Panel for TimeframePanel {
    type Event = Timeframe;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        ui.label_header(UI_TEXT.timeframe_heading);

        for timeframe in Timeframe::iter() {
            if ui
                .selectable_label(self.selected == timeframe, timeframe.label())
                .clicked()
                && self.selected != timeframe
            {
                self.selected = timeframe;
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Timeframe switched to {}", timeframe.label());
                }
                events.push(timeframe);
            }
        }
        events
    }
}
