//! Command dispatch.

pub mod ask;
pub mod chat;
pub mod config;
pub mod fetch;
pub mod providers;

use anyhow::{Result, anyhow};
use innkeeper_runtime::{LlmProvider, RuntimeConfig};

use crate::cli::{Cli, Command, SessionArgs};

pub async fn handle(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Chat { session } => chat::handle(runtime_config(&session)?).await,
        Command::Ask { question, session } => {
            ask::handle(runtime_config(&session)?, &question.join(" ")).await
        }
        Command::Fetch { url } => {
            let args = SessionArgs {
                url,
                ..Default::default()
            };
            fetch::handle(runtime_config(&args)?).await
        }
        Command::Providers { action } => providers::handle(action).await,
        Command::Config { action } => config::handle(action).await,
    }
}

/// Environment settings with command-line overrides applied.
fn runtime_config(args: &SessionArgs) -> Result<RuntimeConfig> {
    let mut config = RuntimeConfig::from_env();

    if let Some(url) = &args.url {
        config = config.with_url(url);
    }
    if let Some(model) = &args.model {
        config = config.with_model(model);
    }
    if let Some(provider) = &args.provider {
        let provider = provider.parse::<LlmProvider>().map_err(|_| {
            anyhow!(
                "Unknown provider '{}'. Available: {}",
                provider,
                LlmProvider::ALL
                    .iter()
                    .map(LlmProvider::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        config = config.with_provider(provider);
    }

    Ok(config)
}
