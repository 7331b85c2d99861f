// ABOUTME: Authentication collaborator contract: password, federated sign-in and session changes
// ABOUTME: Callers observe the signed-in user through a watch channel instead of global state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// In-memory authentication provider
pub mod memory;

pub use memory::InMemoryAuthProvider;

use async_trait::async_trait;
use fittrack_core::constants::auth::MIN_PASSWORD_LENGTH;
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::AuthUser;
use tokio::sync::watch;

/// Sign-in, sign-up and session observation
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Sign in with email and password
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when the credentials do not match an account
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser>;

    /// Create an account and sign it in
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for a malformed email or short password, and
    /// `ResourceAlreadyExists` when the email is taken
    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser>;

    /// Sign in through the federated identity provider
    ///
    /// # Errors
    ///
    /// Returns `AuthInvalid` when the provider flow is cancelled or refused
    async fn federated_sign_in(&self) -> AppResult<AuthUser>;

    /// End the current session
    ///
    /// # Errors
    ///
    /// Returns an error if the provider cannot end the session
    async fn sign_out(&self) -> AppResult<()>;

    /// The signed-in user, if any
    fn current_user(&self) -> Option<AuthUser>;

    /// Observe sign-in and sign-out; dropping the receiver unsubscribes
    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>>;
}

/// Check email shape and password length before contacting a provider
///
/// # Errors
///
/// Returns `InvalidInput` describing the first problem found
pub fn validate_credentials(email: &str, password: &str) -> AppResult<()> {
    let email = email.trim();
    let well_formed = email.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && domain.contains('.')
            && !domain.starts_with('.')
            && !domain.ends_with('.')
    });
    if !well_formed {
        return Err(AppError::invalid_input("The email address is badly formatted."));
    }
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::invalid_input(format!(
            "Password should be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
