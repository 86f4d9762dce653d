//! `innkeeper providers` subcommands.

use anyhow::{Result, anyhow};
use comfy_table::{Cell, Color};
use innkeeper_llms::ProviderRegistry;
use innkeeper_runtime::{LlmProvider, Runtime};
use serde::Serialize;

use crate::cli::ProvidersAction;
use crate::output;

#[derive(Serialize)]
struct ProviderInfo {
    id: &'static str,
    key_env: &'static str,
    has_key: bool,
    models: &'static [&'static str],
}

const GROQ_MODELS: &[&str] = &[
    "llama-3.1-8b-instant",
    "llama-3.3-70b-versatile",
    "gemma2-9b-it",
    "mixtral-8x7b-32768",
];

fn known_models(provider: LlmProvider) -> &'static [&'static str] {
    match provider {
        LlmProvider::Groq => GROQ_MODELS,
    }
}

fn build_registry() -> (ProviderRegistry, Vec<ProviderInfo>) {
    let registry = Runtime::build_registry();
    let registered = registry.list_providers();

    let infos = LlmProvider::ALL
        .iter()
        .map(|provider| ProviderInfo {
            id: provider.as_str(),
            key_env: provider.api_key_env(),
            has_key: registered.iter().any(|id| id == provider.as_str()),
            models: known_models(*provider),
        })
        .collect();

    (registry, infos)
}

pub async fn handle(action: ProvidersAction) -> Result<()> {
    match action {
        ProvidersAction::List => list(),
        ProvidersAction::Test { provider } => test(&provider).await,
        ProvidersAction::Models { provider } => models(&provider).await,
    }
}

fn list() -> Result<()> {
    let (_, infos) = build_registry();

    output::header("Registered Providers");

    let mut table = output::table();
    output::table_header(&mut table, &["Provider", "Status", "Models"]);

    for info in &infos {
        let status = if info.has_key {
            Cell::new("configured").fg(Color::Green)
        } else {
            Cell::new(format!("missing {}", info.key_env)).fg(Color::Yellow)
        };
        table.add_row(vec![
            Cell::new(info.id).fg(Color::Green),
            status,
            Cell::new(format_models(info.models)),
        ]);
    }

    output::table_print(&table, &infos);

    Ok(())
}

fn format_models(models: &[&str]) -> String {
    if models.len() <= 3 {
        models.join(", ")
    } else {
        format!(
            "{}, {}, {} (+{} more)",
            models[0],
            models[1],
            models[2],
            models.len() - 3
        )
    }
}

async fn test(provider_id: &str) -> Result<()> {
    let (registry, _) = build_registry();
    let provider = registry.get_provider(provider_id)?;

    let spinner = output::spinner(&format!("Testing {} connectivity...", provider_id));

    // Listing models is the cheapest authenticated call
    match provider.list_models().await {
        Ok(models) => {
            output::spinner_success(
                &spinner,
                &format!("{} is reachable ({} models)", provider_id, models.len()),
            );
            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, &format!("{} connection failed", provider_id));
            Err(anyhow!("Provider test failed: {}", e))
        }
    }
}

async fn models(provider_id: &str) -> Result<()> {
    let (registry, _) = build_registry();
    let provider = registry.get_provider(provider_id)?;

    let spinner = output::spinner(&format!("Fetching models for {}...", provider_id));

    match provider.list_models().await {
        Ok(mut models) => {
            spinner.finish_and_clear();
            models.sort();

            output::header(&format!("Models for {}", provider_id));

            if models.is_empty() {
                output::dim("No models returned (provider may not support listing)");
                return Ok(());
            }

            let mut table = output::table();
            output::table_header(&mut table, &["Model"]);
            for model in &models {
                table.add_row(vec![Cell::new(model).fg(Color::Green)]);
            }

            output::table_print(&table, &models);

            Ok(())
        }
        Err(e) => {
            output::spinner_error(&spinner, "Failed to fetch models");
            Err(anyhow!("Failed to list models: {}", e))
        }
    }
}
