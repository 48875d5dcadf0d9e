//! # Hero Ticker
//!
//! Runs the rotating label ticker against the wall clock and prints every
//! label change as the live region would announce it.
//!
//! ## Usage
//!
//! ```bash
//! hero_ticker --hold 1500 --duration 10 Acme Globex Initech
//! hero_ticker --config ticker.toml --sellers sellers.json
//! RUST_LOG=storefront_ui=trace hero_ticker Acme Globex
//! ```

use std::process::ExitCode;
use std::thread;
use std::time::{Duration, Instant};

use storefront::hero_ticker_config;
use storefront_data::InMemoryStore;
use storefront_ui::{Rect, RenderCommand, TextStyle, TickerConfig, TickerStage};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Target frame time for 60 FPS.
const FRAME_TIME: Duration = Duration::from_micros(16_666);

#[derive(Debug)]
struct Options {
    config: Option<String>,
    sellers: Option<String>,
    hold_ms: Option<u64>,
    transition_ms: Option<u64>,
    placeholder: Option<String>,
    no_fade: bool,
    duration_secs: u64,
    labels: Vec<String>,
}

fn print_help() {
    println!("Usage: hero_ticker [OPTIONS] [LABEL]...");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>        Ticker config (TOML)");
    println!("  -s, --sellers <FILE>       Seller listing response (JSON) to take labels from");
    println!("      --hold <MS>            Hold duration (default: 3200)");
    println!("      --transition <MS>      Slide duration (default: 700)");
    println!("      --placeholder <TEXT>   Label shown when no label is left (default: Vendors)");
    println!("      --no-fade              Disable the crossfade");
    println!("  -d, --duration <SECS>      How long to run (default: 15)");
    println!("  -h, --help                 Show this help");
}

fn flag_value<'a>(flag: &str, value: Option<&'a String>) -> Result<&'a String, String> {
    value.ok_or_else(|| format!("{flag} needs a value"))
}

fn numeric_value(flag: &str, value: Option<&String>) -> Result<u64, String> {
    let raw = flag_value(flag, value)?;
    raw.parse()
        .map_err(|_| format!("{flag} expects a whole number, got '{raw}'"))
}

/// Parses the command line. `Ok(None)` means help was printed.
fn parse_args<I>(args: I) -> Result<Option<Options>, String>
where
    I: IntoIterator<Item = String>,
{
    let args: Vec<String> = args.into_iter().collect();
    let mut options = Options {
        config: None,
        sellers: None,
        hold_ms: None,
        transition_ms: None,
        placeholder: None,
        no_fade: false,
        duration_secs: 15,
        labels: Vec::new(),
    };

    let mut i = 0;
    while i < args.len() {
        let flag = args[i].as_str();
        let value = args.get(i + 1);
        match flag {
            "--config" | "-c" => {
                options.config = Some(flag_value(flag, value)?.clone());
                i += 1;
            }
            "--sellers" | "-s" => {
                options.sellers = Some(flag_value(flag, value)?.clone());
                i += 1;
            }
            "--hold" => {
                options.hold_ms = Some(numeric_value(flag, value)?);
                i += 1;
            }
            "--transition" => {
                options.transition_ms = Some(numeric_value(flag, value)?);
                i += 1;
            }
            "--placeholder" => {
                options.placeholder = Some(flag_value(flag, value)?.clone());
                i += 1;
            }
            "--duration" | "-d" => {
                options.duration_secs = numeric_value(flag, value)?;
                i += 1;
            }
            "--no-fade" => options.no_fade = true,
            "--help" | "-h" => {
                print_help();
                return Ok(None);
            }
            other if other.starts_with("--") => return Err(format!("unknown option {other}")),
            label => options.labels.push(label.to_owned()),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn build_config(options: &Options) -> Result<TickerConfig, String> {
    let mut config = match &options.config {
        Some(path) => TickerConfig::from_toml_file(path).map_err(|err| err.to_string())?,
        None => TickerConfig::default(),
    };

    if let Some(path) = &options.sellers {
        let body = std::fs::read_to_string(path).map_err(|err| format!("{path}: {err}"))?;
        let store = InMemoryStore::new().with_json("/store/seller", body);
        config = hero_ticker_config(&store, config);
    } else if !options.labels.is_empty() {
        config.labels.clone_from(&options.labels);
    }

    if let Some(hold) = options.hold_ms {
        config = config.with_hold_ms(hold);
    }
    if let Some(transition) = options.transition_ms {
        config = config.with_transition_ms(transition);
    }
    if let Some(placeholder) = &options.placeholder {
        config = config.with_placeholder(placeholder.clone());
    }
    if options.no_fade {
        config = config.with_fade(false);
    }
    Ok(config)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => return ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("hero_ticker: {err}");
            eprintln!("Try 'hero_ticker --help' for more information.");
            return ExitCode::FAILURE;
        }
    };

    let config = match build_config(&options) {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "could not build ticker config");
            return ExitCode::FAILURE;
        }
    };

    info!(
        labels = config.normalized_labels().len(),
        hold_ms = config.hold_duration_ms,
        transition_ms = config.transition_duration_ms,
        "starting hero ticker"
    );

    let mut stage = TickerStage::new(config, Rect::new(0.0, 0.0, 320.0, 19.2), TextStyle::default());
    let run_for = Duration::from_secs(options.duration_secs);
    let start = Instant::now();
    let mut last = start;

    while start.elapsed() < run_for {
        thread::sleep(FRAME_TIME);
        let now = Instant::now();
        let dt_ms = u64::try_from(now.duration_since(last).as_millis()).unwrap_or(u64::MAX);
        last = now;

        let output = stage.frame(dt_ms);
        for command in &output.commands {
            match command {
                RenderCommand::Announce { text, .. } => println!("▸ {text}"),
                RenderCommand::Text { text, y, color, .. } if output.stats.view_changed => {
                    debug!(frame = output.stats.frame, text = %text, y, alpha = color.a, "slot");
                }
                _ => {}
            }
        }
    }

    stage.unmount();
    info!(elapsed_secs = start.elapsed().as_secs_f64(), "hero ticker stopped");
    ExitCode::SUCCESS
}
