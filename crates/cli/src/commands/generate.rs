// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generate command

use super::{settle, Context};
use crate::view::TerminalView;
use clap::Args;
use mg_core::TaskKind;

#[derive(Args)]
pub struct GenerateArgs {
    /// Analysis to generate drafts for
    pub analysis_id: String,
}

pub async fn handle(args: GenerateArgs, ctx: &Context) -> anyhow::Result<()> {
    let mut controller = ctx.controller(TerminalView::stdio(ctx.format));
    let outcome = controller.launch(&args.analysis_id).await;
    settle(&mut controller, outcome, TaskKind::Generate, ctx).await?;
    Ok(())
}
