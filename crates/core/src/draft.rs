// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Generated email drafts as delivered by the job executor

use serde::{Deserialize, Serialize};

/// One generated email. Immutable once received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailDraft {
    pub subject_line: String,
    pub email_body: String,
}

impl EmailDraft {
    pub fn new(subject_line: impl Into<String>, email_body: impl Into<String>) -> Self {
        Self {
            subject_line: subject_line.into(),
            email_body: email_body.into(),
        }
    }
}

impl std::fmt::Display for EmailDraft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Subject: {}", self.subject_line)?;
        writeln!(f)?;
        write!(f, "{}", self.email_body)
    }
}

/// Ordered drafts produced by one completed task
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    #[serde(default)]
    pub emails: Vec<EmailDraft>,
}

impl ResultSet {
    pub fn new(emails: Vec<EmailDraft>) -> Self {
        Self { emails }
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EmailDraft> {
        self.emails.iter()
    }
}

impl std::fmt::Display for ResultSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "No drafts");
        }
        for (i, draft) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
                writeln!(f)?;
            }
            writeln!(f, "--- Email {} ---", i + 1)?;
            write!(f, "{draft}")?;
        }
        Ok(())
    }
}
