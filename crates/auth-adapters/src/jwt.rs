//! HS256 access-token verification.
//!
//! Tokens are minted by the account service with the same shared key; this
//! adapter only checks signature and expiry and extracts the user id.

use domains::{AccessTokenVerifier, DomainError, Result};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct AccessClaims {
    id: String,
}

pub struct JwtAccessTokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl JwtAccessTokenVerifier {
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl AccessTokenVerifier for JwtAccessTokenVerifier {
    fn verify(&self, token: &str) -> Result<String> {
        decode::<AccessClaims>(token, &self.key, &self.validation)
            .map(|data| data.claims.id)
            .map_err(|err| {
                debug!(error = %err, "access token rejected");
                DomainError::Authentication("invalid access token".into())
            })
    }
}
