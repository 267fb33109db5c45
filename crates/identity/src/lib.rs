//! User Identity
//!
//! Resolves `Authorization: Bearer <token>` credentials to an authenticated
//! principal:
//! - Header parsing
//! - Pluggable token verification
//! - Static service tokens configured at deploy time

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Authentication error types
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("Authorization header is missing")]
    MissingToken,

    #[error("Authorization header must be 'Bearer <token>'")]
    MalformedHeader,

    #[error("Token not recognized")]
    InvalidToken,
}

/// Authenticated caller. The user id is opaque to the rest of the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub user_id: String,
}

/// Verifies a raw bearer token
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError>;
}

/// Extract the token from an `Authorization` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingToken)?;
    let (scheme, token) = header.trim().split_once(' ').ok_or(AuthError::MalformedHeader)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MalformedHeader);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MalformedHeader);
    }
    Ok(token)
}

/// Maps configured service tokens to user ids. Tokens are kept only as
/// SHA-256 digests.
pub struct StaticTokenVerifier {
    tokens: HashMap<[u8; 32], String>,
}

impl StaticTokenVerifier {
    /// Build from `token -> user_id` pairs
    pub fn new<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let tokens: HashMap<[u8; 32], String> = entries
            .into_iter()
            .map(|(token, user_id)| (digest(token.as_ref()), user_id.into()))
            .collect();

        if tokens.is_empty() {
            warn!("No static tokens configured; every authenticated request will be rejected");
        } else {
            info!("Loaded {} static service tokens", tokens.len());
        }

        Self { tokens }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<Principal, AuthError> {
        match self.tokens.get(&digest(token)) {
            Some(user_id) => {
                debug!("Authenticated user {}", user_id);
                Ok(Principal {
                    user_id: user_id.clone(),
                })
            }
            None => Err(AuthError::InvalidToken),
        }
    }
}

fn digest(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
