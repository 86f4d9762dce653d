//! CLI entry point for innkeeper.

mod cli;
mod commands;
mod output;

use std::path::{Path, PathBuf};

use clap::Parser;
use innkeeper_constant::app;
use innkeeper_observability::ObservabilityConfig;

use crate::cli::Cli;

/// Nearest `relative` path in the current directory or one of its parents.
fn find_upwards(relative: &Path) -> Option<PathBuf> {
    let mut dir = std::env::current_dir().ok()?;
    for _ in 0..32 {
        let candidate = dir.join(relative);
        if candidate.exists() {
            return Some(candidate);
        }
        dir = dir.parent()?.to_path_buf();
    }
    None
}

/// Load env files. dotenvy never overrides, so earlier sources win.
/// Order: 1) process env  2) .innkeeper/env (project)  3) ~/.innkeeper/env  4) .env (project root)
fn load_innkeeper_config() {
    let project_env = Path::new(app::DATA_DIR).join(app::ENV_FILE);
    if let Some(path) = find_upwards(&project_env) {
        let _ = dotenvy::from_path(&path);
    }

    if let Some(home) = dirs::home_dir() {
        let config_path = home.join(app::DATA_DIR).join(app::ENV_FILE);
        if config_path.exists() {
            let _ = dotenvy::from_path(&config_path);
        }
    }

    if let Some(path) = find_upwards(Path::new(".env")) {
        let _ = dotenvy::from_path(&path);
    }
}

fn init_logging(verbose: bool) {
    let mut config = ObservabilityConfig::from_env().with_version(app::VERSION);
    if verbose {
        config = config.with_log_level("debug");
    } else if config.log_level.is_none() {
        // Keep the chat readable unless asked otherwise
        config = config.with_log_level("warn");
    }

    if let Err(e) = innkeeper_observability::init(config) {
        eprintln!("warning: logging disabled: {e}");
    }
}

#[tokio::main]
async fn main() {
    load_innkeeper_config();
    let cli = Cli::parse();
    output::init(cli.output);
    init_logging(cli.verbose);

    let result = commands::handle(cli).await;
    innkeeper_observability::shutdown();

    if let Err(e) = result {
        output::error(&e.to_string());
        std::process::exit(1);
    }
}
