//! JWT token handling

use crate::config::JwtConfig;
use crate::error::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user email)
    pub sub: String,
    /// Display name
    pub name: String,
    /// Issuer
    pub iss: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// JWT token manager (HS256)
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create an access token for a user, keyed by email
    pub fn create_token(&self, email: &str, name: &str) -> Result<String> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.config.token_ttl_secs);

        let claims = Claims {
            sub: email.to_string(),
            name: name.to_string(),
            iss: self.config.issuer.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };
        let header = Header::new(Algorithm::HS256);
        Ok(encode(&header, &claims, &self.encoding_key)?)
    }

    /// Verify and decode an access token
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        // 5 second leeway instead of the default 60 so tokens expire promptly
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 5;
        validation.set_issuer(&[&self.config.issuer]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;
        Ok(token_data.claims)
    }

    /// Token TTL in seconds
    pub fn token_ttl(&self) -> i64 {
        self.config.token_ttl_secs
    }
}
