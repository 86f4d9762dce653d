//! CLI argument definitions using clap derive macros.

use clap::{Args, Parser, Subcommand, ValueEnum};
use innkeeper_constant::app;

#[derive(Parser)]
#[command(name = app::NAME, about = app::DESCRIPTION, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format: text (human-readable) or json (machine-readable)
    #[arg(short, long, global = true, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored terminal output for humans
    #[default]
    Text,
    /// Structured JSON for machine consumption
    Json,
}

/// Overrides applied on top of `INNKEEPER_*` environment settings
#[derive(Args, Debug, Default, Clone)]
pub struct SessionArgs {
    /// Hotel page to answer from. Uses INNKEEPER_URL env if not set.
    #[arg(long)]
    pub url: Option<String>,
    /// Model to use (e.g. llama-3.1-8b-instant). Uses INNKEEPER_MODEL env if not set.
    #[arg(long)]
    pub model: Option<String>,
    /// Provider to use (groq). Uses INNKEEPER_PROVIDER env if not set.
    #[arg(long)]
    pub provider: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start an interactive chat about the hotel
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Ask a single question and print the answer
    Ask {
        /// The question
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Fetch the hotel page and print the extracted excerpt
    Fetch {
        /// Hotel page to fetch. Uses INNKEEPER_URL env if not set.
        #[arg(long)]
        url: Option<String>,
    },
    /// Inspect and test LLM providers
    Providers {
        #[command(subcommand)]
        action: ProvidersAction,
    },
    /// Show or change innkeeper settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ProvidersAction {
    /// List all known providers
    List,
    /// Test provider connectivity
    Test {
        /// Provider ID
        provider: String,
    },
    /// List available models
    Models {
        /// Provider ID
        provider: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Configure the API key for a provider
    Api {
        /// Provider to configure (groq)
        #[arg(short, long)]
        provider: Option<String>,
    },
}
