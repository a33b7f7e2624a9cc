//! Factory Monitor
//!
//! Command line front end for the factory floor dashboard.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use factory_monitor::dashboard::{Dashboard, Event, PageView};
use factory_monitor::presentation::{BottleneckCard, EnergyCard};
use factory_monitor::{Edit, MonitorConfig, Page, Snapshot, View};

#[derive(Parser)]
#[command(name = "factory-monitor")]
#[command(about = "Cycle time, energy cost and bottleneck calculator for a factory floor")]
struct Cli {
    /// TOML file with rates, thresholds, credentials and machines
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Electricity rate per kWh (overrides the config file)
    #[arg(long)]
    rate: Option<f64>,

    /// Currency symbol for costs (overrides the config file)
    #[arg(long)]
    currency: Option<String>,

    #[arg(long, default_value = "user")]
    username: String,

    #[arg(long, default_value = "password")]
    password: String,

    /// Print trace output to stderr
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Cycle times, outputs and bottleneck alerts
    Bottleneck {
        /// Edit a machine before recalculating (e.g. M2.manual_load_time=9)
        #[arg(long = "set", value_name = "ID.FIELD=VALUE")]
        edits: Vec<Edit>,

        #[arg(long)]
        json: bool,
    },

    /// Energy use, cost and high cost alerts
    Energy {
        /// Edit a machine before recalculating (e.g. M1.power=3.2)
        #[arg(long = "set", value_name = "ID.FIELD=VALUE")]
        edits: Vec<Edit>,

        #[arg(long)]
        json: bool,
    },

    /// Output and energy series per machine
    Chart {
        #[arg(long)]
        json: bool,
    },

    /// Weekly production report
    Report {
        /// Seconds to let the report page run before exiting
        #[arg(long, default_value = "0")]
        simulate: u64,
    },

    /// List the machines and their raw inputs
    Machines,
}

fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn load_config(cli: &Cli) -> Result<MonitorConfig> {
    let mut config = match &cli.config {
        Some(path) => MonitorConfig::load(path)?,
        None => MonitorConfig::default(),
    };
    if let Some(rate) = cli.rate {
        config.pipeline.electricity_rate = rate;
    }
    if let Some(currency) = &cli.currency {
        config.currency = currency.clone();
    }
    config.pipeline.validate()?;
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    let config = load_config(&cli)?;
    let mut dashboard = Dashboard::new(&config).context("Failed to calculate initial metrics")?;
    dashboard.login(&cli.username, &cli.password)?;

    match cli.command {
        Commands::Bottleneck { edits, json } => {
            dashboard.show_page(Page::Bottleneck)?;
            let snapshot = dashboard
                .recalculate(View::Bottleneck, &edits)
                .context("Bottleneck recalculation rejected")?;
            if json {
                print_json(&snapshot)?;
            } else {
                for m in &snapshot.metrics {
                    println!("{}", BottleneckCard(m));
                }
            }
        }

        Commands::Energy { edits, json } => {
            dashboard.show_page(Page::Energy)?;
            let snapshot = dashboard
                .recalculate(View::Energy, &edits)
                .context("Energy recalculation rejected")?;
            if json {
                print_json(&snapshot)?;
            } else {
                for m in &snapshot.metrics {
                    let card = EnergyCard {
                        metrics: m,
                        currency: dashboard.currency(),
                    };
                    println!("{}", card);
                }
            }
        }

        Commands::Chart { json } => {
            if let PageView::Graph(series) = dashboard.show_page(Page::Graph)? {
                if json {
                    println!("{}", serde_json::to_string_pretty(&series)?);
                } else {
                    print!("{}", series);
                }
            }
        }

        Commands::Report { simulate } => {
            if let PageView::Report(report) = dashboard.show_page(Page::Report)? {
                print!("{}", report);
            }
            for event in dashboard.advance(Duration::from_secs(simulate)) {
                match event {
                    Event::NotificationShown(text) => println!("\n{}", text),
                    Event::NotificationDismissed => {}
                    Event::ReportRegenerated => {
                        println!();
                        print!("{}", dashboard.report());
                    }
                }
            }
        }

        Commands::Machines => {
            let snapshot = dashboard.snapshot();
            println!(
                "{:<6} {:<16} {:>10} {:>10} {:>8} {:>8}",
                "ID", "Name", "Ideal (s)", "Manual (s)", "Run (h)", "kW"
            );
            println!("{}", "-".repeat(63));
            for m in &snapshot.inputs {
                println!(
                    "{:<6} {:<16} {:>10.1} {:>10.1} {:>8.1} {:>8.2}",
                    m.id, m.name, m.ideal_machine_time, m.manual_load_time, m.run_time, m.power
                );
            }
        }
    }

    Ok(())
}

fn print_json(snapshot: &Snapshot) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&snapshot.metrics)?);
    Ok(())
}
