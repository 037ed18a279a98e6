//! Waveform Admin is a client for the administrative API of the Waveform music
//! publishing platform.
//!
//! ## Configuration
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! waveform-admin = "0.1.0"
//! ```
//!
//! Waveform Admin uses asynchronous programming with `async` and `await`.
//!
//! The API location is read from the environment:
//!
//! - `WAVEFORM_API_BASE_URL`: base URL of the REST API (required)
//! - `WAVEFORM_IDENTITY_URL`: identity provider REST endpoint (optional)
//! - `WAVEFORM_IDENTITY_API_KEY`: identity provider API key, needed for sign-in
//!
//! ## Authorization
//!
//! Every call is authorized with a bearer id token issued by the identity
//! provider. Only tokens carrying the `admin` claim are accepted; the client
//! refuses to send requests with any other token.
//!
//! ## Editing releases
//!
//! [`edit::ReleaseEditSession`] holds a loaded release and the edits made to it.
//! On submit the session is reconciled into new, updated and deleted tracks and
//! sent as one multipart request.
//!
//! ### Examples
//!
//! ```toml
//! [dependencies]
//! waveform-admin = { version = "0.1.0" }
//! tokio = { version = "1", features = ["full"] }
//! ```
//!
//! ```rust,no_run
//! use waveform_admin::auth::AdminCredentials;
//! use waveform_admin::client::Waveform;
//! use waveform_admin::config::Config;
//! use waveform_admin::edit::{Attachment, TrackRef};
//! use dotenv::dotenv;
//! use std::env;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     dotenv().ok();
//!     let config = Config::from_env()?;
//!
//!     // Fetch an id token for an admin account.
//!     let email = env::var("WAVEFORM_EMAIL")?;
//!     let password = env::var("WAVEFORM_PASSWORD")?;
//!     let credentials = AdminCredentials::sign_in(&config, &email, &password).await?;
//!
//!     let client = Waveform::new(&config, credentials);
//!     let mut session = client.albums().edit_session(42).await?;
//!     session.remove_track(&TrackRef::Persistent(2));
//!     let track = session.add_track();
//!     session.set_track_title(&track, "Bonus");
//!     session.attach_file(&track, Attachment::from_path("bonus.mp3")?)?;
//!
//!     client.albums().update(&session).await?;
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
pub mod config;
pub mod edit;
pub mod endpoints;
pub mod model;
