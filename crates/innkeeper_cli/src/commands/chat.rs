//! `innkeeper chat`: interactive conversation over stdin.
//!
//! Each input line is one user action, processed to completion before the
//! next line is read.

use std::io::{IsTerminal, Write};
use std::path::PathBuf;

use anyhow::{Result, bail};
use innkeeper_core::Session;
use innkeeper_runtime::{Runtime, RuntimeConfig, RuntimeError};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::output;

#[derive(Debug, PartialEq)]
enum SlashCommand {
    Clear,
    Export(Option<PathBuf>),
    Url(String),
    Status,
    History,
    Help,
    Quit,
}

impl SlashCommand {
    /// Parse a `/command [arg]` line. `Err` carries a message for the user.
    fn parse(line: &str) -> std::result::Result<Self, String> {
        let line = line.trim_start_matches('/');
        let (name, arg) = match line.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (line, ""),
        };

        match name {
            "clear" => Ok(SlashCommand::Clear),
            "export" if arg.is_empty() => Ok(SlashCommand::Export(None)),
            "export" => Ok(SlashCommand::Export(Some(PathBuf::from(arg)))),
            "url" if arg.is_empty() => Err("Usage: /url <url>".to_string()),
            "url" => Ok(SlashCommand::Url(arg.to_string())),
            "status" => Ok(SlashCommand::Status),
            "history" => Ok(SlashCommand::History),
            "help" | "?" => Ok(SlashCommand::Help),
            "quit" | "exit" | "q" => Ok(SlashCommand::Quit),
            other => Err(format!("Unknown command '/{}'. Type /help", other)),
        }
    }
}

const HELP: &[(&str, &str)] = &[
    ("/clear", "Forget the conversation and the loaded page"),
    ("/export [dir]", "Save the conversation as a text file"),
    ("/url <url>", "Load a hotel page, or retry the current one"),
    ("/status", "Show session state"),
    ("/history", "Reprint the conversation"),
    ("/help", "Show this help"),
    ("/quit", "Leave"),
];

struct ChatState {
    runtime: Runtime,
    session: Session,
    url: String,
    export_dir: PathBuf,
}

pub async fn handle(config: RuntimeConfig) -> Result<()> {
    if !std::io::stdin().is_terminal() {
        bail!("`innkeeper chat` needs an interactive terminal. Use `innkeeper ask <question>` instead.");
    }

    let url = config.url.clone();
    let export_dir = config.export_dir.clone();
    let runtime = Runtime::new(config)?;
    let mut state = ChatState {
        runtime,
        session: Session::new(),
        url,
        export_dir,
    };

    output::header(innkeeper_constant::app::DISPLAY_NAME);
    output::dim("Ask anything about the hotel. Type /help for commands.");

    load_page(&mut state).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", console::style("›").green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if trimmed.starts_with('/') {
            match SlashCommand::parse(trimmed) {
                Ok(SlashCommand::Quit) => break,
                Ok(command) => run_command(&mut state, command).await,
                Err(message) => output::warning(&message),
            }
            continue;
        }

        ask(&mut state, &line).await?;
    }

    Ok(())
}

/// Populate the excerpt for the current page, reporting the outcome.
async fn load_page(state: &mut ChatState) {
    if !state.session.needs_excerpt(&state.url) {
        return;
    }

    let spinner = output::spinner(&format!("Loading {}...", state.url));
    let fetched = state
        .runtime
        .ensure_excerpt(&mut state.session, &state.url)
        .await;
    spinner.finish_and_clear();

    if fetched {
        report_page(state);
    }
}

/// Fetch the current page again, even right after a failed attempt.
async fn reload_page(state: &mut ChatState) {
    let spinner = output::spinner(&format!("Loading {}...", state.url));
    state
        .runtime
        .refresh_excerpt(&mut state.session, &state.url)
        .await;
    spinner.finish_and_clear();

    report_page(state);
}

fn report_page(state: &ChatState) {
    if state.session.excerpt().is_usable() {
        output::success("Hotel information loaded");
    } else {
        output::warning(&state.session.excerpt().system_context());
        output::dim("Answers will not be grounded in the hotel page.");
    }
}

async fn ask(state: &mut ChatState, question: &str) -> Result<()> {
    load_page(state).await;

    let spinner = output::spinner("Thinking...");
    let result = state.runtime.ask(&mut state.session, question).await;
    spinner.finish_and_clear();

    match result {
        Ok(reply) => output::turn(&reply),
        Err(RuntimeError::EmptyQuestion) => {}
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn run_command(state: &mut ChatState, command: SlashCommand) {
    match command {
        SlashCommand::Clear => {
            state.runtime.clear(&mut state.session);
            output::success("Chat history cleared");
        }
        SlashCommand::Export(dir) => {
            if state.session.turn_count() == 0 {
                output::warning("Nothing to export yet");
                return;
            }
            let dir = dir.unwrap_or_else(|| state.export_dir.clone());
            match state.runtime.export_to_dir(&state.session, &dir) {
                Ok(path) => output::success(&format!("Exported to {}", path.display())),
                Err(e) => output::error(&e.to_string()),
            }
        }
        SlashCommand::Url(url) => {
            state.url = url;
            reload_page(state).await;
        }
        SlashCommand::Status => {
            let excerpt = state.session.excerpt();
            output::kv("status", state.session.status().as_str());
            output::kv("url", &state.url);
            output::kv("provider", state.runtime.completion().provider_id());
            output::kv("model", state.runtime.completion().model());
            output::kv("turns", &state.session.turn_count().to_string());
            let chars = excerpt.text().map_or(0, |t| t.chars().count());
            output::kv("excerpt", &format!("{} chars", chars));
            if excerpt.is_failed() {
                output::kv("last error", &excerpt.system_context());
            }
        }
        SlashCommand::History => {
            if state.session.turn_count() == 0 {
                output::dim("No messages yet");
            }
            for turn in state.session.turns() {
                output::turn(turn);
            }
        }
        SlashCommand::Help => {
            for (name, desc) in HELP {
                output::kv(name, desc);
            }
        }
        SlashCommand::Quit => {}
    }
}
