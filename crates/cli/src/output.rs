// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Output formatting for rendered drafts

use clap::ValueEnum;
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Write a value in the specified format, followed by a newline
pub fn write<T, W>(out: &mut W, value: &T, format: OutputFormat) -> std::io::Result<()>
where
    T: Serialize + std::fmt::Display,
    W: Write + ?Sized,
{
    match format {
        OutputFormat::Text => writeln!(out, "{}", value)?,
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            writeln!(out, "{}", json)?;
        }
    }
    out.flush()
}
