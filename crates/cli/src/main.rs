// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! mg - drive email generation tasks to completion

mod commands;
mod error;
mod output;
mod view;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{generate, interactive, regenerate, Context};
use mg_adapters::HttpConfig;
use mg_core::ControllerConfig;
use output::OutputFormat;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "mg",
    version,
    about = "Mail Generation - start, poll, and render email drafts"
)]
struct Cli {
    /// Job executor base URL [env: MG_BASE_URL, default: http://127.0.0.1:5000]
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// How rendered drafts are printed
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate drafts for an analysis and wait for them
    Generate(generate::GenerateArgs),
    /// Replace the drafts of an analysis and wait for them
    Regenerate(regenerate::RegenerateArgs),
    /// Read commands from stdin (generate, regenerate, new, quit)
    Interactive,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    setup_logging();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut http = HttpConfig::from_env();
    if let Some(base_url) = cli.base_url {
        http = http.with_base_url(base_url);
    }
    let ctx = Context::new(http, ControllerConfig::from_env(), cli.format);

    match cli.command {
        Commands::Generate(args) => generate::handle(args, &ctx).await,
        Commands::Regenerate(args) => regenerate::handle(args, &ctx).await,
        Commands::Interactive => interactive::handle(&ctx).await,
    }
}

/// Log to stderr so stdout carries rendered drafts only
fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
