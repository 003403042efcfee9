// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Interactive session
//!
//! Reads one command per line from stdin while poll updates keep arriving,
//! so a new `generate` can supersede a task that is still running. At end
//! of input the current flow is played out before exiting.

use super::{CliController, Context};
use crate::view::TerminalView;
use mg_core::ControllerEvent;
use std::ops::ControlFlow;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "commands: generate <id> | regenerate [<id>] | new | quit";

/// One line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Generate(String),
    /// Without an id, regenerate whatever is rendered
    Regenerate(Option<String>),
    New,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => Command::Empty,
        "generate" | "g" => Command::Generate(rest.to_string()),
        "regenerate" | "r" if rest.is_empty() => Command::Regenerate(None),
        "regenerate" | "r" => Command::Regenerate(Some(rest.to_string())),
        "new" => Command::New,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

enum Input {
    Line(std::io::Result<Option<String>>),
    Event(Option<ControllerEvent>),
}

pub async fn handle(ctx: &Context) -> anyhow::Result<()> {
    let mut controller = ctx.controller(TerminalView::stdio(ctx.format).with_hints());
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    eprintln!("{HELP}");

    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line),
            event = controller.next_event() => Input::Event(event),
        };

        match input {
            Input::Event(Some(event)) => controller.handle_event(event),
            Input::Event(None) => break,
            Input::Line(Ok(Some(line))) => {
                if dispatch(&mut controller, parse_command(&line)).await.is_break() {
                    break;
                }
            }
            Input::Line(Ok(None)) => {
                controller.run_until_settled().await;
                break;
            }
            Input::Line(Err(e)) => return Err(e.into()),
        }
    }

    Ok(())
}

async fn dispatch(controller: &mut CliController, command: Command) -> ControlFlow<()> {
    match command {
        Command::Generate(analysis_id) => {
            controller.launch(&analysis_id).await;
        }
        Command::Regenerate(Some(analysis_id)) => {
            controller.regenerate(&analysis_id).await;
        }
        Command::Regenerate(None) => {
            controller.regenerate_current().await;
        }
        Command::New => controller.start_new_analysis(),
        Command::Help => eprintln!("{HELP}"),
        Command::Quit => return ControlFlow::Break(()),
        Command::Empty => {}
        Command::Unknown(word) => eprintln!("unknown command '{word}' ({HELP})"),
    }
    ControlFlow::Continue(())
}

#[cfg(test)]
#[path = "interactive_tests.rs"]
mod tests;
