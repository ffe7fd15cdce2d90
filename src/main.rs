//! dial-meter CLI: render a dial to SVG/HTML, or show it in a window.
//!
//! Commands:
//! - `render`: print (or write) the dial for one value
//! - `show`: open a window; values arrive on stdin, one per line, or from
//!   a random feed with `--demo`

use std::fs;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Sender};
use std::thread;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use rand::Rng;
use rusttype::Font;
use tracing::{debug, info, warn};

use dial_meter::{DialOptions, DialUpdate, DialWidget, StyleHints, Viewer, ViewerConfig};

#[derive(Parser)]
#[command(name = "dial-meter", about = "Circular dial gauge renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one dial and print it.
    Render {
        #[command(flatten)]
        input: DialInput,

        /// Output format.
        #[arg(long, value_enum, default_value_t = Format::Svg)]
        format: Format,

        /// Write to this file instead of stdout.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show the dial in a window, updating from stdin.
    Show {
        #[command(flatten)]
        input: DialInput,

        /// Feed random values instead of reading stdin.
        #[arg(long, default_value_t = false)]
        demo: bool,

        /// TTF/OTF font used for the numeric label. No label without it.
        #[arg(long)]
        font: Option<PathBuf>,

        /// Window size in logical pixels (overrides the config file).
        #[arg(long)]
        size: Option<u32>,
    },
}

#[derive(clap::Args)]
struct DialInput {
    /// Declarative value, 0–100.
    #[arg(long, allow_hyphen_values = true)]
    value: Option<String>,

    /// CSS declarations, e.g. "--radius: 40; color: red".
    #[arg(long)]
    style: Option<String>,

    /// Path to a TOML config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Svg,
    Html,
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,dial_meter=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(io::stderr).with_target(true))
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            input,
            format,
            output,
        } => {
            let (config, mut widget) = load_widget(&input)?;
            debug!(window = ?config.window, "config loaded");
            let frame = widget.on_mounted(widget.style().clone());
            let text = match format {
                Format::Svg => frame.to_svg(),
                Format::Html => frame.to_html(),
            };
            match output {
                Some(path) => {
                    fs::write(&path, text + "\n")
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!(path = %path.display(), "dial written");
                }
                None => println!("{text}"),
            }
        }
        Commands::Show {
            input,
            demo,
            font,
            size,
        } => {
            let (mut config, widget) = load_widget(&input)?;
            if let Some(size) = size {
                config.window.size = size;
            }

            let mut viewer = Viewer::new(widget, config.window);
            if let Some(path) = font {
                viewer = viewer.with_font(load_font(&path)?);
            }

            let (sender, receiver) = mpsc::channel();
            if demo {
                spawn_random_feed(sender);
            } else {
                spawn_stdin_feed(sender);
            }

            viewer
                .show_with_updates(receiver)
                .map_err(|e| anyhow!("viewer failed: {e}"))?;
        }
    }

    Ok(())
}

/// Builds an unmounted widget from the config file and CLI flags.
fn load_widget(input: &DialInput) -> Result<(ViewerConfig, DialWidget)> {
    let config = match &input.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            ViewerConfig::from_toml_str(&text)
                .with_context(|| format!("parsing {}", path.display()))?
        }
        None => ViewerConfig::default(),
    };

    let style = match &input.style {
        Some(decls) => config.style.merged_with(&StyleHints::from_declarations(decls)),
        None => config.style.clone(),
    };
    let value = input.value.clone().or_else(|| config.value.clone());

    let options = DialOptions::builder()
        .maybe_value(value)
        .style(style)
        .build();
    Ok((config, DialWidget::new(options)))
}

fn load_font(path: &Path) -> Result<Font<'static>> {
    let data = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    Font::try_from_vec(data).ok_or_else(|| anyhow!("{} is not a usable font", path.display()))
}

/// Forwards each stdin line as a new raw value.
fn spawn_stdin_feed(sender: Sender<DialUpdate>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if sender.send(DialUpdate::SetValue(line.trim().to_string())).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    warn!(%err, "stdin closed");
                    break;
                }
            }
        }
    });
}

/// Sends a random value, sometimes out of range, every 500 ms.
fn spawn_random_feed(sender: Sender<DialUpdate>) {
    thread::spawn(move || {
        let mut rng = rand::rng();
        loop {
            let value: i32 = rng.random_range(-10..=110);
            if sender.send(DialUpdate::SetValue(value.to_string())).is_err() {
                break;
            }
            thread::sleep(Duration::from_millis(500));
        }
    });
}
