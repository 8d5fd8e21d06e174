//! Service-account authentication against Google's OAuth token endpoint.
//!
//! The key JSON is exchanged for a short-lived bearer token with the
//! JWT-bearer grant: an RS256-signed assertion naming the account, the
//! requested scopes and the token endpoint as audience.

use crate::errors::{AppError, AppResult};
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Read-only access to spreadsheets, plus Drive search to resolve a title.
pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/spreadsheets.readonly",
    "https://www.googleapis.com/auth/drive.readonly",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

/// The fields of a service-account key file this tool uses.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    #[serde(rename = "type", default)]
    pub key_type: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub private_key_id: String,
    pub private_key: String,
    pub client_email: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

// Keeps the private key out of `{:?}` output.
impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

impl ServiceAccountKey {
    pub fn from_json(json: &str) -> AppResult<Self> {
        let key: Self = serde_json::from_str(json)?;
        key.validate()?;
        Ok(key)
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let json = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read credentials file {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    fn validate(&self) -> AppResult<()> {
        if let Some(kind) = &self.key_type {
            if kind != "service_account" {
                return Err(AppError::Config(format!(
                    "credentials are of type '{kind}', expected 'service_account'"
                )));
            }
        }
        if self.client_email.trim().is_empty() {
            return Err(AppError::Config("credentials have an empty client_email".into()));
        }
        if !self.private_key.contains("PRIVATE KEY") {
            return Err(AppError::Config(
                "credentials private_key is not a PEM encoded key".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
}

/// Build the signed assertion sent to the token endpoint.
pub fn signed_assertion(key: &ServiceAccountKey, issued_at: i64) -> AppResult<String> {
    let mut header = Header::new(Algorithm::RS256);
    if !key.private_key_id.is_empty() {
        header.kid = Some(key.private_key_id.clone());
    }

    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES.join(" "),
        aud: &key.token_uri,
        iat: issued_at,
        exp: issued_at + ASSERTION_LIFETIME_SECS,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}

/// Exchange the service-account key for an access token.
pub fn fetch_access_token(http: &Client, key: &ServiceAccountKey) -> AppResult<String> {
    let assertion = signed_assertion(key, Utc::now().timestamp())?;

    log::debug!("requesting access token for {}", key.client_email);
    let response = http
        .post(&key.token_uri)
        .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
        .send()?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().unwrap_or_default();
        return Err(AppError::Sheets(format!(
            "token endpoint answered {status}: {}",
            body.trim()
        )));
    }

    let token: TokenResponse = response.json()?;
    if let Some(kind) = &token.token_type {
        log::debug!("received {kind} token");
    }
    Ok(token.access_token)
}
