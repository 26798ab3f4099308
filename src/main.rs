//! tplot command line
//!
//! Restores saved variable stores, prints their contents and drives one
//! hover update through a text render target.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tplot_rs::{
    hover::{Axis, HoverEvent, HoverIndexer, HoverOutcome, HoverSource, RenderTarget},
    snapshot, RestoreReport, TplotConfig, VariableRestorer, VariableStore,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tplot")]
#[command(about = "Restore and inspect tplot variable stores", long_about = None)]
struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Restore a file and list its variables
    Restore {
        /// Legacy save file or native snapshot
        file: PathBuf,
    },
    /// Restore a file and show the spectrum nearest to a time
    Hover {
        /// Legacy save file or native snapshot
        file: PathBuf,
        /// Spectrogram variable to slice
        variable: String,
        /// Time (seconds) under the cursor
        time: f64,
    },
    /// Restore a file and save it as a native snapshot
    Convert {
        /// Legacy save file or native snapshot
        input: PathBuf,
        /// Output snapshot path
        output: PathBuf,
    },
}

/// Render target that prints every call
#[derive(Default)]
struct TextTarget {
    x_log: bool,
    y_log: bool,
}

impl RenderTarget for TextTarget {
    fn set_axis_label(&mut self, axis: Axis, text: &str) {
        println!("{:?} label: {}", axis, text);
    }

    fn set_log_mode(&mut self, x_log: bool, y_log: bool) {
        self.x_log = x_log;
        self.y_log = y_log;
        println!("log axes: x={} y={}", x_log, y_log);
    }

    fn set_range(&mut self, axis: Axis, lo: f64, hi: f64) {
        let log = match axis {
            Axis::X => self.x_log,
            Axis::Y => self.y_log,
        };
        if log {
            println!("{:?} range: 1e{} .. 1e{}", axis, lo, hi);
        } else {
            println!("{:?} range: {} .. {}", axis, lo, hi);
        }
    }

    fn set_data(&mut self, xs: &[f64], ys: &[f64]) {
        if xs.is_empty() {
            println!("(no data)");
        }
        for (x, y) in xs.iter().zip(ys) {
            println!("{:>14.6e} {:>14.6e}", x, y);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TplotConfig::load(path)
            .with_context(|| format!("Loading configuration {:?}", path))?,
        None => TplotConfig::load_or_default(),
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let restorer = VariableRestorer::from_config(&config);

    match cli.command {
        Commands::Restore { file } => {
            let store = restore(&restorer, &file)?;
            print_summary(&store);
        }
        Commands::Hover {
            file,
            variable,
            time,
        } => {
            let store = restore(&restorer, &file)?;
            if !store.contains(&variable) {
                bail!("No variable '{}' in {:?}", variable, file);
            }

            println!(
                "{} ({}x{})",
                config.interactive.title,
                config.interactive.window_size[0],
                config.interactive.window_size[1]
            );
            let mut outcome = None;
            {
                let mut indexer = HoverIndexer::new(TextTarget::default());
                let mut source = HoverSource::new();
                source.register_listener(|store: &VariableStore, event: &HoverEvent| {
                    outcome = Some(indexer.handle(store, event));
                });
                source.change_hover_time(&store, time, &variable);
            }

            match outcome {
                Some(HoverOutcome::Updated { index, .. }) => {
                    if let Some(t) = store.get(&variable).and_then(|v| v.times.get(index)) {
                        println!("sample {} at t = {}", index, t);
                    }
                }
                _ => println!("'{}' has no spectrum at t = {}", variable, time),
            }
        }
        Commands::Convert { input, output } => {
            let store = restore(&restorer, &input)?;
            let output = if output.extension().is_none() {
                output.with_extension(&config.snapshot_extension)
            } else {
                output
            };
            snapshot::save(&output, &store)
                .with_context(|| format!("Saving snapshot {:?}", output))?;
            println!("Wrote {} variables to {}", store.len(), output.display());
        }
    }

    Ok(())
}

fn restore(restorer: &VariableRestorer, path: &Path) -> anyhow::Result<VariableStore> {
    let mut store = VariableStore::new();
    match restorer
        .restore(&mut store, path)
        .with_context(|| format!("Restoring {:?}", path))?
    {
        RestoreReport::NotFound => bail!("{} does not exist", path.display()),
        RestoreReport::Restored { .. } => Ok(store),
    }
}

fn print_summary(store: &VariableStore) {
    let shared = store.shared_options();
    if let Some(title) = &shared.title {
        println!("title: {}", title);
    }
    if let Some([lo, hi]) = shared.x_range {
        println!("time range: {} .. {}", lo, hi);
    }

    for variable in store.iter() {
        let kind = if variable.is_spectrogram() {
            "spectrogram"
        } else {
            "time series"
        };
        println!(
            "{:<24} {:<12} {:>6} samples x {:<4} {}",
            variable.name,
            kind,
            variable.len(),
            variable.values.cols(),
            variable.options.y.label.as_deref().unwrap_or("")
        );
    }
}
