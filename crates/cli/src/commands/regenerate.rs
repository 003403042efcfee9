// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Regenerate command

use super::{settle, Context};
use crate::view::TerminalView;
use clap::Args;
use mg_core::TaskKind;

#[derive(Args)]
pub struct RegenerateArgs {
    /// Analysis whose drafts are replaced
    pub analysis_id: String,
}

pub async fn handle(args: RegenerateArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut controller = ctx.controller(TerminalView::stdio(ctx.format));
    let outcome = controller.regenerate(&args.analysis_id).await;
    settle(&mut controller, outcome, TaskKind::Regenerate, ctx).await?;
    Ok(())
}
