//! Tabplot - plot tabular numeric files in the terminal.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tabplot::app;
use tabplot::generate::{self, Target};
use tabplot::overlay::Scenario;
use tabplot::util::PlotConfig;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "tabplot")]
#[command(about = "Plot whitespace-delimited numeric files in the terminal", long_about = None)]
struct Args {
    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plot a two-column file as a line with its overlay markers
    Plot {
        /// Path to the data file
        file: PathBuf,

        /// Overlay to draw; defaults to the one named like the file
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Plot a three-column file as a surface
    Surface {
        /// Path to the data file
        file: PathBuf,
    },
    /// Write sample data: general, step, line, basic or manual
    Generate {
        /// Dataset to generate
        target: String,

        /// Output file
        out: PathBuf,
    },
}

fn main() {
    if let Err(err) = run(Args::parse()) {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let log_file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(log_file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting tabplot");
    }

    let config = PlotConfig::default();
    match args.command {
        Command::Plot { file, scenario } => {
            let scenario = scenario.map(|s| s.parse::<Scenario>()).transpose()?;
            let chart = app::build_line_chart(&file, scenario, &config)?;
            app::show(&chart, &config)?;
        },
        Command::Surface { file } => {
            let chart = app::build_surface_chart(&file, &config)?;
            app::show(&chart, &config)?;
        },
        Command::Generate { target, out } => {
            let target: Target = target.parse()?;
            let rows = generate::write_samples(target, &out, &config.data, &config.generate)?;
            println!("Wrote {} rows to {}", rows, out.display());
        },
    }

    tracing::info!("Tabplot exited");
    Ok(())
}
