//! `innkeeper ask`: one question, one answer.

use anyhow::{Result, bail};
use innkeeper_core::Session;
use innkeeper_runtime::{Runtime, RuntimeConfig};
use serde::Serialize;

use crate::output;

#[derive(Serialize)]
struct Answer<'a> {
    url: &'a str,
    model: &'a str,
    question: &'a str,
    answer: &'a str,
}

pub async fn handle(config: RuntimeConfig, question: &str) -> Result<()> {
    let runtime = Runtime::new(config)?;
    let mut session = Session::new();
    let url = runtime.config().url.clone();

    let spinner = output::spinner(&format!("Loading {}...", url));
    runtime.ensure_excerpt(&mut session, &url).await;
    spinner.finish_and_clear();

    if !session.excerpt().is_usable() {
        bail!("{}", session.excerpt().system_context());
    }

    let spinner = output::spinner("Thinking...");
    let reply = runtime.ask(&mut session, question).await?;
    spinner.finish_and_clear();

    if reply.failed {
        bail!("{}", reply.content);
    }

    if output::is_json() {
        output::data(
            "answer",
            &Answer {
                url: &url,
                model: &runtime.config().model,
                question,
                answer: &reply.content,
            },
        );
    } else {
        println!("{}", reply.content);
    }

    Ok(())
}
