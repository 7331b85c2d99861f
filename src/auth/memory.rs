// ABOUTME: In-memory authentication provider storing salted SHA-256 password digests
// ABOUTME: Publishes the signed-in user on a watch channel for session-change listeners
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{validate_credentials, AuthProvider};
use async_trait::async_trait;
use fittrack_core::constants::auth::{FEDERATED_PROVIDER, PASSWORD_PROVIDER};
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::AuthUser;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use tokio::sync::{watch, RwLock};
use tracing::{info, warn};
use uuid::Uuid;

struct Account {
    uid: String,
    email: String,
    salt: String,
    password_digest: String,
}

fn digest_password(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    hex::encode(hasher.finalize())
}

fn new_uid() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Authentication provider held in memory
pub struct InMemoryAuthProvider {
    accounts: RwLock<HashMap<String, Account>>,
    federated_email: Option<String>,
    session: watch::Sender<Option<AuthUser>>,
}

impl Default for InMemoryAuthProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryAuthProvider {
    /// Provider with no accounts and no federated identity
    #[must_use]
    pub fn new() -> Self {
        let (session, _) = watch::channel(None);
        Self {
            accounts: RwLock::new(HashMap::new()),
            federated_email: None,
            session,
        }
    }

    /// Let federated sign-in succeed as `email`
    #[must_use]
    pub fn with_federated_account(mut self, email: impl Into<String>) -> Self {
        self.federated_email = Some(email.into());
        self
    }

    fn publish(&self, user: Option<AuthUser>) {
        self.session.send_replace(user);
    }
}

#[async_trait]
impl AuthProvider for InMemoryAuthProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        let key = email.trim().to_lowercase();
        let user = {
            let accounts = self.accounts.read().await;
            accounts
                .get(&key)
                .filter(|account| {
                    account.password_digest == digest_password(&account.salt, password)
                })
                .map(|account| AuthUser {
                    uid: account.uid.clone(),
                    email: Some(account.email.clone()),
                    provider: PASSWORD_PROVIDER.to_owned(),
                })
        };

        let Some(user) = user else {
            warn!("Sign-in rejected");
            return Err(AppError::auth_invalid("Invalid email or password"));
        };
        info!(user.id = %user.uid, "Signed in successfully");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> AppResult<AuthUser> {
        validate_credentials(email, password)?;
        let key = email.trim().to_lowercase();

        let user = {
            let mut accounts = self.accounts.write().await;
            if accounts.contains_key(&key) {
                return Err(AppError::already_exists("An account with this email"));
            }
            let salt = Uuid::new_v4().simple().to_string();
            let account = Account {
                uid: new_uid(),
                email: key.clone(),
                password_digest: digest_password(&salt, password),
                salt,
            };
            let user = AuthUser {
                uid: account.uid.clone(),
                email: Some(account.email.clone()),
                provider: PASSWORD_PROVIDER.to_owned(),
            };
            accounts.insert(key, account);
            user
        };

        info!(user.id = %user.uid, "Account created successfully");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn federated_sign_in(&self) -> AppResult<AuthUser> {
        let Some(email) = self.federated_email.as_deref() else {
            return Err(AppError::auth_invalid("Federated sign-in was cancelled"));
        };
        let key = email.trim().to_lowercase();

        // First federated sign-in registers the account; later ones reuse its uid
        let uid = {
            let mut accounts = self.accounts.write().await;
            accounts
                .entry(key.clone())
                .or_insert_with(|| Account {
                    uid: new_uid(),
                    email: key.clone(),
                    salt: String::new(),
                    password_digest: String::new(),
                })
                .uid
                .clone()
        };
        let user = AuthUser {
            uid,
            email: Some(key),
            provider: FEDERATED_PROVIDER.to_owned(),
        };

        info!(user.id = %user.uid, provider = FEDERATED_PROVIDER, "Signed in with federated provider");
        self.publish(Some(user.clone()));
        Ok(user)
    }

    async fn sign_out(&self) -> AppResult<()> {
        if let Some(user) = self.current_user() {
            info!(user.id = %user.uid, "Signed out successfully");
        }
        self.publish(None);
        Ok(())
    }

    fn current_user(&self) -> Option<AuthUser> {
        self.session.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<AuthUser>> {
        self.session.subscribe()
    }
}
