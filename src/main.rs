//! Syntech Analytics CLI
//!
//! Fetches the analytics buckets and prints the dashboard:
//! - `show`: counters and line charts (default)
//! - `endpoints`: resolved endpoint URLs
//! - `config`: generate a default config file

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::Duration;
use syntech_analytics::{
    generate_default_config, render_loading, render_text, AnalyticsClient, AnalyticsView, Bucket,
    Config, DisplayZone, FetchError, LoggingConfig, RenderOptions,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "syntech-analytics")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Syntech analytics dashboard for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: ~/.config/syntech-analytics/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Analytics API base URL
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch analytics and render the dashboard
    Show(ShowArgs),

    /// Print the URL of every analytics endpoint
    Endpoints,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Default)]
pub struct ShowArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// List every point under its chart
    #[arg(long)]
    pub points: bool,

    /// Disable coloured chart lines
    #[arg(long)]
    pub no_color: bool,

    /// Chart width in cells
    #[arg(long)]
    pub width: Option<usize>,

    /// Chart height in rows
    #[arg(long)]
    pub height: Option<usize>,

    /// Time zone for dates: utc, local or +HH:MM
    #[arg(long)]
    pub timezone: Option<DisplayZone>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(url) = cli.base_url {
        config.source.base_url = url;
    }

    init_logging(&config.logging);
    tracing::debug!("Syntech Analytics v{}", env!("CARGO_PKG_VERSION"));

    match cli.command.unwrap_or_else(|| Commands::Show(ShowArgs::default())) {
        Commands::Show(args) => show(config, args).await,

        Commands::Endpoints => {
            for bucket in Bucket::ALL {
                println!("{:<22} {}", bucket.label(), config.source.url(bucket));
            }
            Ok(())
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

/// Logs go to stderr so stdout carries only the dashboard
fn init_logging(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("syntech_analytics={}", logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn show(config: Config, args: ShowArgs) -> anyhow::Result<()> {
    let zone = args.timezone.unwrap_or(config.display.timezone);
    let client = AnalyticsClient::new(config.source.clone())?;
    let view = AnalyticsView::new(client, zone);

    let unmount = view.unmount_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            unmount.cancel();
        }
    });

    let spinner = args.format == OutputFormat::Table && std::io::stderr().is_terminal();
    let mut ticker = tokio::time::interval(Duration::from_millis(80));
    let mut frame = 0usize;
    let mut load = view.mount();

    let outcome = loop {
        tokio::select! {
            joined = &mut load => break joined?,
            _ = ticker.tick(), if spinner => {
                eprint!("\r{}", render_loading(frame));
                frame += 1;
            }
        }
    };
    if spinner {
        eprint!("\r\x1b[2K");
    }

    if outcome == Err(FetchError::Cancelled) {
        eprintln!("Cancelled");
        std::process::exit(130);
    }

    let state = view.state().await;
    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state)?),
        OutputFormat::Table => {
            let opts = RenderOptions {
                width: args.width.unwrap_or(config.display.chart_width),
                height: args.height.unwrap_or(config.display.chart_height),
                color: config.display.color && !args.no_color && std::io::stdout().is_terminal(),
                points: args.points,
            };
            print!("{}", render_text(&state, &opts));
        }
    }

    // The dashboard looks the same for an empty result and a failed load;
    // the exit status tells them apart.
    if outcome.is_err() {
        std::process::exit(1);
    }
    Ok(())
}
