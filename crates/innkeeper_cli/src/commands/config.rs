//! `innkeeper config` subcommands.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Result, anyhow};
use console::Term;
use innkeeper_constant::app;
use innkeeper_runtime::{LlmProvider, RuntimeConfig};

use crate::cli::ConfigAction;
use crate::output;

pub async fn handle(action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => show(),
        ConfigAction::Api { provider } => configure_api(provider),
    }
}

fn show() -> Result<()> {
    let config = RuntimeConfig::from_env();
    let key_env = config.provider.api_key_env();
    let has_key = env::var(key_env).is_ok_and(|k| !k.trim().is_empty());

    if output::is_json() {
        let mut value = serde_json::to_value(&config)?;
        value["api_key_configured"] = serde_json::Value::Bool(has_key);
        output::data("config", &value);
        return Ok(());
    }

    output::header("Effective configuration");
    output::kv("provider", config.provider.as_str());
    output::kv("model", &config.model);
    output::kv("url", &config.url);
    output::kv("max_tokens", &config.max_tokens.to_string());
    output::kv("temperature", &config.temperature.to_string());
    output::kv("top_p", &config.top_p.to_string());
    output::kv("excerpt_limit", &config.excerpt_limit.to_string());
    output::kv("fetch_timeout", &format!("{}s", config.fetch_timeout_secs));
    output::kv("refetch_cooldown", &format!("{}s", config.refetch_cooldown_secs));
    output::kv("export_dir", &config.export_dir.display().to_string());
    output::kv(key_env, if has_key { "set" } else { "not set" });

    Ok(())
}

fn configure_api(provider: Option<String>) -> Result<()> {
    let provider = match provider {
        Some(p) => p.parse::<LlmProvider>().map_err(|_| {
            anyhow!(
                "Unknown provider '{}'. Available: {}",
                p,
                LlmProvider::ALL
                    .iter()
                    .map(LlmProvider::as_str)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?,
        None => LlmProvider::default(),
    };
    let env_var = provider.api_key_env();

    output::header(&format!("Configure {}", provider));

    if let Ok(current) = env::var(env_var) {
        output::kv("current", &mask_key(&current));
    }

    let term = Term::stderr();
    term.write_str(&format!("Enter {}: ", env_var))?;
    let key = term.read_secure_line()?;
    let key = key.trim();

    if key.is_empty() {
        output::warning("No key entered, cancelled.");
        return Ok(());
    }

    let config_path = get_config_path()?;
    save_api_key(&config_path, env_var, key)?;

    output::success(&format!("Saved {} to {}", env_var, config_path.display()));
    output::dim("It will be picked up the next time innkeeper starts.");

    Ok(())
}

fn mask_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

fn get_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
    let data_dir = home.join(app::DATA_DIR);
    fs::create_dir_all(&data_dir)?;
    Ok(data_dir.join(app::ENV_FILE))
}

/// Set `env_var` in an `export KEY="value"` env file, keeping other entries.
fn save_api_key(path: &Path, env_var: &str, key: &str) -> Result<()> {
    let existing = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    let mut config: BTreeMap<String, String> = existing
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let line = line.strip_prefix("export ").unwrap_or(line);
            if line.starts_with('#') {
                return None;
            }
            let (key, value) = line.split_once('=')?;
            Some((key.trim().to_string(), value.trim().to_string()))
        })
        .collect();

    config.insert(env_var.to_string(), format!("\"{}\"", key));

    let mut content = String::new();
    content.push_str("# innkeeper configuration\n");
    content.push_str(&format!("# Loaded automatically from ~/{}/{}\n\n", app::DATA_DIR, app::ENV_FILE));
    for (k, v) in &config {
        content.push_str(&format!("export {}={}\n", k, v));
    }

    fs::write(path, content)?;
    Ok(())
}
