use std::{panic, sync::Arc};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tabled::{Table, Tabled, settings::Style};

use prime_lattice::data::load_prices;
use prime_lattice::engine::FixedEnrichment;
use prime_lattice::models::Decomposition;
use prime_lattice::utils::format_duration_ms;
use prime_lattice::utils::AppInstant;
use prime_lattice::{Cli, EnrichmentHints, ProjectionEngine, ProjectionRequest, ProjectionResult};

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "Step")]
    step: usize,
    #[tabled(rename = "Projected")]
    price: String,
}

#[derive(Tabled)]
struct LineRow {
    #[tabled(rename = "Triad")]
    triad: String,
    #[tabled(rename = "Confidence")]
    confidence: String,
    #[tabled(rename = "First")]
    first: String,
    #[tabled(rename = "Last")]
    last: String,
    #[tabled(rename = "Fallback")]
    fallback: bool,
}

#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Frequency")]
    frequency: String,
    #[tabled(rename = "Period")]
    period: usize,
    #[tabled(rename = "Amplitude")]
    amplitude: String,
    #[tabled(rename = "Phase")]
    phase: String,
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map_or_else(|| "n/a".to_string(), |v| format!("{:.4}", v))
}

fn print_result(result: &ProjectionResult) {
    let points: Vec<PointRow> = result
        .points
        .iter()
        .enumerate()
        .map(|(i, p)| PointRow {
            step: i + 1,
            price: format!("{:.4}", p),
        })
        .collect();
    println!("{}", Table::new(points).with(Style::rounded()));

    let lines: Vec<LineRow> = result
        .projection_lines
        .iter()
        .map(|l| LineRow {
            triad: l.triad.to_string(),
            confidence: format!("{:.3}", l.confidence.value()),
            first: fmt_opt(l.points.first().copied()),
            last: fmt_opt(l.points.last().copied()),
            fallback: l.fallback,
        })
        .collect();
    println!("{}", Table::new(lines).with(Style::rounded()));

    let m = &result.metadata;
    let v = &result.validation;
    println!(
        "omega {:.3} Hz ({}) | p={} base {:.2} psi {} | {}/{} lines{}",
        m.omega_hz,
        m.omega_source,
        m.depth_prime,
        m.base,
        m.psi_variant,
        m.triad_count,
        m.triads_attempted,
        if m.enriched { " | enriched" } else { "" }
    );
    println!(
        "MAE {} | RMSE {} | MAPE {} | direction {} | validation {:.3} | confidence {:.3}",
        fmt_opt(v.mae),
        fmt_opt(v.rmse),
        fmt_opt(v.mape),
        fmt_opt(v.directional_accuracy),
        v.confidence.value(),
        result.confidence.value()
    );
}

fn print_decomposition(d: &Decomposition) {
    let rows: Vec<ComponentRow> = d
        .components
        .iter()
        .map(|c| ComponentRow {
            frequency: format!("{:.5}", c.frequency),
            period: c.period,
            amplitude: format!("{:.4}", c.amplitude),
            phase: format!("{:.4}", c.phase),
        })
        .collect();
    println!("{}", Table::new(rows).with(Style::rounded()));
    println!(
        "fft size {} | residual energy {:.4} of {:.4}",
        d.fft_size, d.residual_energy, d.signal_energy
    );
}

fn run(args: Cli) -> Result<()> {
    let prices = match (&args.prices, &args.input) {
        (Some(p), _) => p.clone(),
        (None, Some(path)) => load_prices(path)?,
        (None, None) => bail!("Provide prices with --prices or --input"),
    };

    let settings = args.settings()?;
    let request = ProjectionRequest::from(&settings);

    let mut engine = ProjectionEngine::new();
    if let Some(path) = &args.hints {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read hints file {}", path.display()))?;
        let hints: EnrichmentHints = serde_json::from_str(&text)
            .with_context(|| format!("Invalid hints JSON in {}", path.display()))?;
        engine = engine.with_enrichment(Arc::new(FixedEnrichment(hints)));
    }

    let start = AppInstant::now();
    let result = engine.project(&prices, &request).context("Projection failed")?;
    let elapsed = format_duration_ms(start.elapsed().as_millis());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    if args.oscillations {
        match engine.decompose(&prices) {
            Ok(d) => print_decomposition(&d),
            Err(e) => log::warn!("Oscillation breakdown unavailable: {}", e),
        }
    }
    print_result(&result);
    log::info!("Projected {} prices in {}", prices.len(), elapsed);
    Ok(())
}

fn main() -> Result<()> {
    panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::force_capture();
        log::error!("CRITICAL PANIC:\n{}\nStack Trace:\n{}", info, backtrace);
    }));

    let args = Cli::parse();

    let (global_level, my_code_level) = if args.verbose {
        (log::LevelFilter::Warn, log::LevelFilter::Debug)
    } else if cfg!(debug_assertions) {
        (log::LevelFilter::Warn, log::LevelFilter::Info)
    } else {
        (log::LevelFilter::Error, log::LevelFilter::Error)
    };

    let mut builder = env_logger::Builder::new();

    builder
        .filter(None, global_level)
        .filter(Some("prime_lattice"), my_code_level)
        .init();

    run(args)
}
