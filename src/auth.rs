// Use 3rd party
use data_encoding::BASE64URL_NOPAD;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Use built-in library
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

// Use internal modules
use crate::config::Config;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("malformed id token: {0}")]
    MalformedToken(String),
    #[error("no identity provider API key configured")]
    MissingApiKey,
    #[error("sign-in failed: {0}")]
    SignIn(String),
    #[error("identity request error: {0}")]
    Request(#[from] reqwest::Error),
}

//Id token payload example:
//{
    //"admin": true,
    //"user_id": "pD1rQm0b3ZcN2x",
    //"email": "staff@waveform.ink",
    //"exp": 1760000000
//}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdTokenClaims {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub sub: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub exp: Option<u64>,
}

impl IdTokenClaims {
    /// Identity provider UID, from `user_id` or the standard `sub` claim.
    pub fn uid(&self) -> Option<&str> {
        self.user_id.as_deref().or_else(|| self.sub.as_deref())
    }
}

/// A bearer id token together with the claims it carries.
#[derive(Clone)]
pub struct AdminCredentials {
    token: String,
    claims: IdTokenClaims,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("token", &"<redacted>")
            .field("claims", &self.claims)
            .finish()
    }
}

impl AdminCredentials {
    pub fn new(id_token: &str) -> Result<Self, AuthError> {
        let claims = decode_claims(id_token)?;
        Ok(Self {
            token: id_token.to_owned(),
            claims,
        })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub const fn claims(&self) -> &IdTokenClaims {
        &self.claims
    }

    pub const fn is_admin(&self) -> bool {
        self.claims.admin
    }

    /// Tokens without an `exp` claim never expire locally; the backend still decides.
    pub fn is_expired_at(&self, unix_seconds: u64) -> bool {
        self.claims.exp.map_or(false, |exp| exp <= unix_seconds)
    }

    pub fn is_expired(&self) -> bool {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_secs())
            .unwrap_or_default();
        self.is_expired_at(now)
    }

    /// Fetches a fresh id token from the identity provider using email and password.
    pub async fn sign_in(config: &Config, email: &str, password: &str) -> Result<Self, AuthError> {
        let api_key = config.identity_api_key.as_deref().ok_or(AuthError::MissingApiKey)?;
        let url = format!("{}/accounts:signInWithPassword", config.identity_url);
        let query = [("key", api_key)];
        let payload = SignInRequest {
            email,
            password,
            return_secure_token: true,
        };

        let response = Client::new()
            .post(&url)
            .query(&query)
            .json(&payload)
            .send()
            .await?;

        if response.status().is_success() {
            let body: SignInResponse = response.json().await?;
            debug!("signed in as {}", body.email.as_deref().unwrap_or(email));
            Self::new(&body.id_token)
        } else {
            let status = response.status();
            let message = response
                .json::<SignInErrorBody>()
                .await
                .map(|body| body.error.message)
                .unwrap_or_else(|_| status.to_string());
            error!("sign-in failed for {}: {}", email, message);
            Err(AuthError::SignIn(message))
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignInResponse {
    id_token: String,
    email: Option<String>,
}

#[derive(Deserialize)]
struct SignInErrorBody {
    error: SignInErrorDetail,
}

#[derive(Deserialize)]
struct SignInErrorDetail {
    message: String,
}

fn decode_claims(id_token: &str) -> Result<IdTokenClaims, AuthError> {
    let mut segments = id_token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(AuthError::MalformedToken("expected three segments".to_owned())),
    };
    let bytes = BASE64URL_NOPAD
        .decode(payload.trim_end_matches('=').as_bytes())
        .map_err(|err| AuthError::MalformedToken(err.to_string()))?;
    serde_json::from_slice(&bytes).map_err(|err| AuthError::MalformedToken(err.to_string()))
}
