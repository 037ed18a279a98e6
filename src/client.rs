// Use 3rd party
use log::{debug, error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::Form;
use reqwest::{Client, Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Use built-in library
use std::borrow::Cow;

// Use internal modules
use crate::auth::{AdminCredentials, AuthError};
use crate::config::Config;
use crate::edit::ValidationError;

// Possible errors returned from the `Waveform` client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request unauthorized")]
    Unauthorized,
    #[error("administrative privileges required")]
    NotAdmin,
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("api error {status}: {message}")]
    Api { status: u16, message: String },
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),
    #[error("invalid release: {0}")]
    Validation(#[from] ValidationError),
    #[error("json parse error: {0}")]
    ParseJSON(#[from] serde_json::Error),
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("status code: {0}")]
    StatusCode(StatusCode),
}

impl ClientError {
    async fn from_response(response: Response) -> Self {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Self::Unauthorized;
        }
        let message = response
            .json::<ApiMessage>()
            .await
            .ok()
            .and_then(|body| body.message);
        match (status, message) {
            (StatusCode::FORBIDDEN, message) => {
                Self::Forbidden(message.unwrap_or_else(|| status.to_string()))
            }
            (status, Some(message)) => Self::Api {
                status: status.as_u16(),
                message,
            },
            (status, None) => status.into(),
        }
    }

    /// Errors that should send the user back to sign-in instead of showing a message.
    pub const fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized | Self::NotAdmin | Self::Forbidden(_) | Self::Auth(_)
        )
    }
}

impl From<StatusCode> for ClientError {
    fn from(code: StatusCode) -> Self {
        Self::StatusCode(code)
    }
}

/// The `{ "message": ... }` body the API returns on most responses.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Request body variants the API accepts.
pub enum Payload {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

impl Payload {
    pub fn json<T: Serialize + ?Sized>(value: &T) -> ClientResult<Self> {
        Ok(Self::Json(serde_json::to_value(value)?))
    }
}

// Waveform admin API
pub struct Waveform {
    client: Client,
    base_url: String,
    credentials: AdminCredentials,
}

impl Waveform {
    #[must_use]
    pub fn new(config: &Config, credentials: AdminCredentials) -> Self {
        Self {
            client: Client::new(),
            base_url: config.api_base_url.clone(),
            credentials,
        }
    }

    pub const fn credentials(&self) -> &AdminCredentials {
        &self.credentials
    }

    /// Swaps in a freshly fetched token.
    pub fn set_credentials(&mut self, credentials: AdminCredentials) {
        self.credentials = credentials;
    }

    async fn api_call(&self, method: Method, url: &str, payload: Payload) -> ClientResult<Response> {
        if !self.credentials.is_admin() {
            error!("refusing {} {}: token has no admin claim", method, url);
            return Err(ClientError::NotAdmin);
        }

        let mut url: Cow<str> = url.into();
        if !url.starts_with("http") {
            url = [self.base_url.as_str(), &url].concat().into();
        }

        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.credentials.token());
        headers.insert(AUTHORIZATION, HeaderValue::from_str(&bearer).map_err(|_| ClientError::Unauthorized)?);

        debug!("{} {}", method, url);
        let response = {
            let builder = self
                .client
                .request(method.clone(), &*url)
                .headers(headers);

            // Only add payload when sent
            let builder = match payload {
                Payload::Empty => builder,
                Payload::Json(body) => builder.json(&body),
                Payload::Multipart(form) => builder.multipart(form),
            };

            builder.send().await.map_err(ClientError::from)?
        };

        if response.status().is_success() {
            Ok(response)
        } else {
            let err = ClientError::from_response(response).await;
            error!("{} {} failed: {}", method, url, err);
            Err(err)
        }
    }

    pub async fn get(&self, url: &str) -> ClientResult<String> {
        self.api_call(Method::GET, url, Payload::Empty).await?.text().await.map_err(Into::into)
    }

    pub async fn post(&self, url: &str, payload: Payload) -> ClientResult<String> {
        self.api_call(Method::POST, url, payload).await?.text().await.map_err(Into::into)
    }

    pub async fn put(&self, url: &str, payload: Payload) -> ClientResult<String> {
        self.api_call(Method::PUT, url, payload).await?.text().await.map_err(Into::into)
    }

    pub async fn delete(&self, url: &str) -> ClientResult<String> {
        self.api_call(Method::DELETE, url, Payload::Empty).await?.text().await.map_err(Into::into)
    }

    pub(crate) fn convert_result<'a, T: Deserialize<'a>>(input: &'a str) -> ClientResult<T> {
        serde_json::from_str::<T>(input).map_err(Into::into)
    }

    /// Success bodies are informational; an empty or non-JSON body yields no message.
    pub(crate) fn convert_message(input: &str) -> ApiMessage {
        serde_json::from_str(input).unwrap_or_default()
    }
}
