//! `innkeeper fetch`: show what the assistant would be told about the hotel.

use anyhow::{Result, bail};
use innkeeper_core::Excerpt;
use innkeeper_runtime::{HttpExtractor, PageExtractor, RuntimeConfig};

use crate::output;

pub async fn handle(config: RuntimeConfig) -> Result<()> {
    let extractor = HttpExtractor::new(config.fetch_timeout(), config.excerpt_limit)?;

    let spinner = output::spinner(&format!("Fetching {}...", config.url));
    let excerpt = extractor.extract(&config.url).await;
    spinner.finish_and_clear();

    if output::is_json() {
        output::data("excerpt", &excerpt);
    }

    match &excerpt {
        Excerpt::Ready { text, .. } => {
            if !output::is_json() {
                output::header(&config.url);
                output::dim(&format!("{} characters", text.chars().count()));
                println!("{text}");
            }
            Ok(())
        }
        Excerpt::Failed { .. } => bail!("{}", excerpt.system_context()),
        Excerpt::Empty => bail!("Nothing was fetched"),
    }
}
