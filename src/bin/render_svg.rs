//! Render a saved `candles-data` payload to an SVG file, without the GUI.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use serde::Deserialize;

use candle_view::chart::CandlestickChart;
use candle_view::config::{CHART, ChartConfig};
use candle_view::relay::{CandlesData, ServerEvent};
use candle_view::ui::build_chart_instance;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render candle JSON (relay candles-data shape) to SVG", long_about = None)]
struct RenderCli {
    /// Input JSON: a `candles-data` event or its bare `{result, signals}` payload
    input: PathBuf,

    /// Output SVG path
    #[arg(short, long, default_value = "chart.svg")]
    output: PathBuf,

    /// Chart height in pixels
    #[arg(long, default_value_t = CHART.view_height)]
    view_height: f64,

    /// Width the plot is laid out against; narrower than the chart keeps the chart width
    #[arg(long, default_value_t = 0.0)]
    container_width: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RenderInput {
    Event(ServerEvent),
    Data(CandlesData),
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args = RenderCli::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let data = match serde_json::from_str::<RenderInput>(&text)
        .context("Input is neither a candles-data event nor its payload")?
    {
        RenderInput::Data(data) | RenderInput::Event(ServerEvent::CandlesData(data)) => data,
        RenderInput::Event(other) => bail!("Expected candles-data, got {}", other.name()),
    };

    if let Some(error) = &data.error {
        bail!("Payload carries an exchange error: {} (code {})", error.message, error.code);
    }

    let mut chart = CandlestickChart::new(ChartConfig {
        view_height: args.view_height,
        ..CHART
    });
    let mut instance = build_chart_instance(&mut chart, &data, None);
    if args.container_width > 0.0 {
        instance.handle_container_width_change(args.container_width);
    }

    fs::write(&args.output, instance.to_svg())
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!(
        "Wrote {} ({} candles, {} signals)",
        args.output.display(),
        instance.candles().len(),
        instance.signals().markers().len()
    );
    Ok(())
}
