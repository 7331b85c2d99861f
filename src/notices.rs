// ABOUTME: Transient user-facing notices raised by background work
// ABOUTME: Unbounded channel so persistence and lookup failures are reported once without blocking
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use fittrack_core::errors::AppError;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Confirmation of a completed action
    Info,
    /// A failure the user should know about
    Error,
}

/// A short message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity
    pub level: NoticeLevel,
    /// Headline
    pub title: String,
    /// Body text, may be empty
    pub message: String,
}

impl Notice {
    /// Informational notice
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notice
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }

    /// Error notice carrying an error's message
    #[must_use]
    pub fn from_error(title: &str, error: &AppError) -> Self {
        Self::error(title, error.message.clone())
    }
}

/// Receiving half handed to whatever renders notices
pub type NoticeReceiver = mpsc::UnboundedReceiver<Notice>;

/// Sending half shared by background tasks
#[derive(Debug, Clone)]
pub struct NoticeSender {
    tx: mpsc::UnboundedSender<Notice>,
}

impl NoticeSender {
    /// Create a connected sender/receiver pair
    #[must_use]
    pub fn channel() -> (Self, NoticeReceiver) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Send a notice; a closed receiver only logs
    pub fn send(&self, notice: Notice) {
        if let Err(mpsc::error::SendError(dropped)) = self.tx.send(notice) {
            debug!(title = %dropped.title, "Notice dropped, no receiver attached");
        }
    }
}
