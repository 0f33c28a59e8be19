//! Crowdscape CLI - Command-line interface for the level editor controller

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, layout, session};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "crowdscape")]
#[command(about = "Headless driver for the Crowdscape level editor", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show how camera views are tiled on screen
    Layout {
        /// Number of views (1-4)
        #[arg(long, default_value = "1")]
        views: usize,

        /// Zoom this view (0-based) to fill the screen
        #[arg(long)]
        zoom: Option<usize>,

        /// Output format (text, json or toml)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Replay a TOML command script against an in-memory editor
    Session {
        /// Path to the session script
        script: String,

        /// Editor config file (defaults to the layered config)
        #[arg(long)]
        config: Option<String>,

        /// Stop at the first refused step
        #[arg(long)]
        strict: bool,

        /// Output format (text, json or toml)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Print the resolved editor configuration
    Config {
        /// Read only this file instead of the layered config
        #[arg(long)]
        file: Option<String>,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" | "toml" => Ok(s.to_string()),
        _ => Err(format!(
            "unknown format '{}'; valid values: text, json, toml",
            s
        )),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Layout {
            views,
            zoom,
            format,
        } => layout::run(views, zoom, &format),
        Commands::Session {
            script,
            config,
            strict,
            format,
        } => session::run(session::SessionArgs {
            script,
            config,
            strict,
            format,
        }),
        Commands::Config { file } => config::run(file.as_deref()),
    }
}
