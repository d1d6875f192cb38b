use std::sync::Arc;
use std::time::Duration;

use eframe::egui::{self, CentralPanel, Context, Frame, Margin, RichText, Spinner, TopBottomPanel};
use poll_promise::Promise;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

use crate::chart::{
    AxisFormats, CandlestickChart, ChartHandle, ChartInstance, TextMeasure, signal_template,
};
use crate::config::{CLIENT, ChartConfig};
use crate::data::{ConnectionStatus, RelayConnection, RelayEvent, fetch_markets};
use crate::domain::candle::parse_records;
use crate::domain::{MarketInfo, Timeframe};
use crate::relay::protocol::{CandlesData, CandlesRequest, ServerEvent};
use crate::ui::chart_view::{ChartView, EguiTextMeasure};
use crate::ui::config::{UI_CONFIG, UI_TEXT};
use crate::ui::notifications::Toasts;
use crate::ui::panels::{MarketPanel, Panel, TimeframePanel};
use crate::ui::styles::{UiStyleExt, setup_custom_visuals, status_color};

/// Startup settings resolved from the command line
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub relay_url: String,
    pub markets_url: String,
    pub chart: ChartConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            relay_url: CLIENT.relay_ws_url.to_string(),
            markets_url: CLIENT.markets_url.to_string(),
            chart: ChartConfig::default(),
        }
    }
}

/// Candles request for a market over the whole history of a timeframe
pub fn candles_request(market: &str, timeframe: Timeframe) -> CandlesRequest {
    CandlesRequest {
        market: market.to_string(),
        start_time: timeframe.start_time(),
        end_time: timeframe.end_time(),
        interval: timeframe.interval_sec(),
    }
}

/// Create and fully draw a chart for one `candles-data` payload, signals included.
/// Unparsable rows are dropped before drawing.
pub fn build_chart_instance(
    chart: &mut CandlestickChart,
    data: &CandlesData,
    measure: Option<Arc<dyn TextMeasure>>,
) -> ChartInstance {
    let candles = parse_records(&data.result);
    let mut instance = chart.create(&candles, AxisFormats::default());
    if let Some(measure) = measure {
        instance = instance.with_text_measure(measure);
    }
    instance.draw();
    instance.draw_signals(&data.signals, signal_template);
    instance
}

/// Selector contents, filled once by the market list fetch
#[derive(Debug, Default)]
pub struct MarketList {
    pub markets: Vec<MarketInfo>,
    pub selected: Option<String>,
}

impl MarketList {
    /// Takes the fetch outcome. Returns the market to auto-select when nothing was picked yet.
    /// A failure raises an error toast and leaves the list empty; there is no retry.
    pub fn on_fetched(
        &mut self,
        result: anyhow::Result<Vec<MarketInfo>>,
        toasts: &mut Toasts,
    ) -> Option<String> {
        match result {
            Ok(markets) => {
                self.markets = markets;
                if self.selected.is_some() {
                    return None;
                }
                self.markets.first().map(|m| m.name.clone())
            }
            Err(e) => {
                log::error!("Market list failed: {:#}", e);
                toasts.error(UI_TEXT.toast_markets_failed, Some(format!("{:#}", e)));
                None
            }
        }
    }
}

pub struct CandleViewApp {
    chart: CandlestickChart,
    instance: Option<ChartInstance>,
    chart_view: ChartView,
    relay: RelayConnection,
    markets_promise: Option<Promise<anyhow::Result<Vec<MarketInfo>>>>,
    market_list: MarketList,
    timeframe: Timeframe,
    toasts: Toasts,
}

impl CandleViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: AppSettings) -> Self {
        setup_custom_visuals(&cc.egui_ctx);

        let relay = RelayConnection::connect(settings.relay_url.clone(), Some(cc.egui_ctx.clone()));

        let markets_url = settings.markets_url.clone();
        let markets_promise = Promise::spawn_thread("fetch_markets", move || {
            fetch_markets(&markets_url)
        });

        Self {
            chart: CandlestickChart::new(settings.chart),
            instance: None,
            chart_view: ChartView::default(),
            relay,
            markets_promise: Some(markets_promise),
            market_list: MarketList::default(),
            timeframe: Timeframe::default(),
            toasts: Toasts::default(),
        }
    }

    fn poll_markets(&mut self, ctx: &Context) {
        let Some(promise) = self.markets_promise.take() else {
            return;
        };

        match promise.try_take() {
            Ok(result) => {
                if let Some(first) = self.market_list.on_fetched(result, &mut self.toasts) {
                    self.select_market(first);
                }
            }
            Err(pending) => {
                self.markets_promise = Some(pending);
                ctx.request_repaint_after(Duration::from_millis(CLIENT.poll_interval_ms));
            }
        }
    }

    fn select_market(&mut self, name: String) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_ui_interactions {
            log::info!("Loading chart for {} ({})", name, self.timeframe.label());
        }
        self.market_list.selected = Some(name);
        self.request_chart();
    }

    fn select_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
        self.request_chart();
    }

    fn request_chart(&mut self) {
        let Some(market) = self.market_list.selected.as_deref() else {
            return;
        };
        let request = candles_request(market, self.timeframe);

        self.chart.set_loading(true);
        if let Err(e) = self.relay.request_candles(request) {
            self.chart.set_loading(false);
            self.toasts
                .error(UI_TEXT.toast_request_failed, Some(e.to_string()));
        }
    }

    /// Last response wins: every `candles-data` replaces the chart on screen
    fn drain_relay_events(&mut self, ctx: &Context) {
        for event in self.relay.drain() {
            match event {
                RelayEvent::Server(ServerEvent::CandlesData(data)) => {
                    self.on_candles_data(ctx, &data);
                }
                RelayEvent::Server(ServerEvent::ConnectExchange(_)) => {
                    log::info!("Relay reports the exchange is connected");
                }
                RelayEvent::Server(ServerEvent::ErrorConnectExchange) => {
                    self.chart.set_loading(false);
                    self.toasts.error(UI_TEXT.toast_exchange_connect_failed, None);
                }
                RelayEvent::Server(ServerEvent::DisconnectExchange) => {
                    self.chart.set_loading(false);
                    self.toasts.info(UI_TEXT.toast_exchange_disconnected);
                }
                RelayEvent::Closed(reason) => {
                    self.chart.set_loading(false);
                    self.toasts.error(UI_TEXT.toast_relay_closed, reason);
                }
            }
        }
    }

    fn on_candles_data(&mut self, ctx: &Context, data: &CandlesData) {
        if let Some(error) = &data.error {
            self.chart.set_loading(false);
            self.toasts.error(
                UI_TEXT.toast_upstream_error,
                Some(format!("{} (code {})", error.message, error.code)),
            );
            return;
        }

        let measure: Arc<dyn TextMeasure> = Arc::new(EguiTextMeasure::new(ctx.clone()));
        let instance = build_chart_instance(&mut self.chart, data, Some(measure));
        log::info!(
            "Chart ready: {} candles, {} signals",
            instance.candles().len(),
            instance.signals().markers().len()
        );
        self.chart_view.reset();
        self.instance = Some(instance);
    }

    fn render_top_panel(&mut self, ctx: &Context) {
        let frame = Frame::new()
            .fill(UI_CONFIG.colors.top_panel)
            .inner_margin(Margin::symmetric(12, 8));
        TopBottomPanel::top("controls").frame(frame).show(ctx, |ui| {
            ui.horizontal(|ui| {
                let loading_markets = self.markets_promise.is_some();
                let mut market_panel = MarketPanel::new(
                    &self.market_list.markets,
                    self.market_list.selected.clone(),
                    loading_markets,
                );
                let market_events = market_panel.render(ui);

                ui.add_space(24.0);
                let timeframe_events = TimeframePanel::new(self.timeframe).render(ui);

                for name in market_events {
                    self.select_market(name);
                }
                for timeframe in timeframe_events {
                    self.select_timeframe(timeframe);
                }
            });
        });
    }

    fn render_status_panel(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = self.relay.status();
                let text = match status {
                    ConnectionStatus::Connecting => UI_TEXT.status_connecting,
                    ConnectionStatus::Connected => UI_TEXT.status_connected,
                    ConnectionStatus::Disconnected => UI_TEXT.status_disconnected,
                };
                ui.label(
                    RichText::new("●").color(status_color(status == ConnectionStatus::Connected)),
                );
                ui.label_subdued(text);
            });
        });
    }

    fn render_central_panel(&mut self, ctx: &Context) {
        let frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(8));
        CentralPanel::default().frame(frame).show(ctx, |ui| {
            if self.chart.is_loading() {
                ui.horizontal(|ui| {
                    ui.add(Spinner::new());
                    ui.label_subdued(UI_TEXT.chart_loading);
                });
                ctx.request_repaint_after(Duration::from_millis(CLIENT.poll_interval_ms));
                return;
            }

            match self.instance.as_mut() {
                Some(instance) => {
                    egui::ScrollArea::vertical()
                        .id_salt("chart_vertical")
                        .show(ui, |ui| self.chart_view.show(ui, instance));
                }
                None => {
                    if self.market_list.markets.is_empty() && self.markets_promise.is_none() {
                        ui.label_error(UI_TEXT.toast_markets_failed);
                    } else {
                        ui.label_subdued(UI_TEXT.chart_empty);
                    }
                }
            }
        });
    }
}

impl eframe::App for CandleViewApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Candle view shutting down (relay {:?})", self.relay.status());
        }
    }

    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_markets(ctx);
        self.drain_relay_events(ctx);

        self.render_top_panel(ctx);
        self.render_status_panel(ctx);
        self.render_central_panel(ctx);

        self.toasts.show(ctx);
    }
}
