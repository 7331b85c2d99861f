// ABOUTME: Authenticated user identity as exposed by the auth collaborator
// ABOUTME: The uid scopes every per-user document path
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// A signed-in user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable user identifier
    pub uid: String,
    /// Email address, absent for some federated accounts
    pub email: Option<String>,
    /// Sign-in provider id (`password` or a federated provider)
    pub provider: String,
}

impl AuthUser {
    /// Name shown in greetings: the local part of the email, or the uid
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or(&self.uid)
    }
}
