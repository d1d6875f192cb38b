//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so release
//! builds remain quiet. Every use site is additionally gated by `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Log every event crossing the relay (client requests, upstream frames).
    pub print_relay_traffic: bool,
    /// Log pointer hits against candle bands and signal markers.
    pub print_pointer_events: bool,
    /// Log the derived layout whenever a chart is created.
    pub print_chart_layout: bool,
    /// Emit UI interaction logs (market / timeframe switching).
    pub print_ui_interactions: bool,
    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_relay_traffic: false,
    print_pointer_events: false,
    print_chart_layout: false,
    print_ui_interactions: true,
    print_shutdown: false,
};
