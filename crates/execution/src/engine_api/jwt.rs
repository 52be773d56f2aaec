// Engine API authentication.
//
// Tokens carry an `iat` claim and no `exp` claim, as the Engine API authentication rules require.
// ELs reject tokens whose `iat` is more than 60s away from their clock, so a cached token is
// reused only while it is comfortably younger than that.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use color_eyre::eyre;
use jsonwebtoken::{Header, encode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::ExecutionError;

const TOKEN_VALIDITY_DURATION: Duration = Duration::from_secs(55);

/// Claims for the JWT token, as required by the Engine API specification.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    iat: u64,
}

/// Caches a JWT token and its creation time.
#[derive(Clone)]
struct JwtCache {
    token: String,
    created_at: SystemTime,
}

/// Provides JWT tokens for authenticating with the Engine API.
pub struct JwtProvider {
    key: jsonwebtoken::EncodingKey,
    cache: RwLock<Option<JwtCache>>,
}

impl JwtProvider {
    /// Creates a new `JwtProvider` with the given secret.
    pub fn new(secret: [u8; 32]) -> Self {
        Self { key: jsonwebtoken::EncodingKey::from_secret(&secret), cache: RwLock::new(None) }
    }

    /// Returns a valid JWT token, either from the cache or by generating a new one.
    pub async fn get_token(&self) -> eyre::Result<String> {
        {
            let cached_guard = self.cache.read().await;
            if let Some(cached) = cached_guard.as_ref() &&
                cached.created_at.elapsed()? < TOKEN_VALIDITY_DURATION
            {
                return Ok(cached.token.clone());
            }
        }

        let mut cache = self.cache.write().await;

        // Another task may have refreshed the token while we waited for the write lock.
        if let Some(cached) = cache.as_ref() &&
            cached.created_at.elapsed()? < TOKEN_VALIDITY_DURATION
        {
            return Ok(cached.token.clone());
        }

        let now = SystemTime::now();
        let iat = now.duration_since(UNIX_EPOCH)?.as_secs();
        let token = encode(&Header::default(), &Claims { iat }, &self.key)
            .map_err(|e| ExecutionError::Jwt(e.to_string()))?;

        cache.replace(JwtCache { token: token.clone(), created_at: now });

        Ok(token)
    }
}

/// Parses a hex-encoded 32-byte JWT secret, as written to `jwt.hex` by execution clients.
///
/// Surrounding whitespace and an optional `0x` prefix are accepted.
pub fn parse_jwt_secret(contents: &str) -> Result<[u8; 32], ExecutionError> {
    let trimmed = contents.trim();
    let stripped = trimmed.strip_prefix("0x").unwrap_or(trimmed);

    let bytes = hex::decode(stripped).map_err(|e| ExecutionError::Jwt(e.to_string()))?;
    bytes.try_into().map_err(|bytes: Vec<u8>| {
        ExecutionError::Jwt(format!("JWT secret must be 32 bytes, got {}", bytes.len()))
    })
}
