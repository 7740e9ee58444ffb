use anyhow::Context;
use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::SheetsError;

const SCOPES: &str =
    "https://www.googleapis.com/auth/spreadsheets https://www.googleapis.com/auth/drive";
const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

#[derive(Deserialize, Debug, Clone)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    "https://oauth2.googleapis.com/token".to_string()
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Exchange a signed service-account assertion for a bearer token.
///
/// One token per run; it outlives the single linear pass, so there is no
/// refresh handling.
pub async fn fetch_access_token(key: &ServiceAccountKey) -> Result<String, SheetsError> {
    let assertion = signed_assertion(key)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .build()
        .context("Failed to build token HTTP client")?;

    let params = [("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())];
    let response = client
        .post(&key.token_uri)
        .form(&params)
        .send()
        .await
        .context("Token request failed")?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        return Err(SheetsError::ApiStatus { status, body });
    }

    let body = response.text().await.context("Token response body")?;
    let token: TokenResponse = serde_json::from_str(&body).context("Token response JSON")?;
    Ok(token.access_token)
}

fn signed_assertion(key: &ServiceAccountKey) -> Result<String, SheetsError> {
    let iat = Utc::now().timestamp();
    let claims = Claims {
        iss: &key.client_email,
        scope: SCOPES,
        aud: &key.token_uri,
        iat,
        exp: iat + 3600,
    };

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
        .context("Invalid service account private key")?;
    let assertion = jsonwebtoken::encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
        .context("Signing service account assertion")?;
    Ok(assertion)
}
