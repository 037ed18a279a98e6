//! Endpoint functions relating to genres

use serde_json::json;

use crate::client::{ApiMessage, ClientError, ClientResult, Payload, Waveform};
use crate::edit::ValidationError;
use crate::model::genre::Genre;

pub struct Genres<'a>(pub &'a Waveform);

impl Genres<'_> {
    pub async fn list(&self) -> ClientResult<Vec<Genre>> {
        let result = self.0.get("/admin/genres").await?;
        Waveform::convert_result::<Vec<Genre>>(&result)
    }

    /// The name is trimmed; a blank name is rejected without a request.
    pub async fn create(&self, name: &str) -> ClientResult<ApiMessage> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(ValidationError::EmptyField("genre name")));
        }
        let payload = Payload::json(&json!({ "name": name }))?;
        let result = self.0.post("/admin/genres", payload).await?;
        Ok(Waveform::convert_message(&result))
    }

    pub async fn delete(&self, id: u64) -> ClientResult<ApiMessage> {
        let url = format!("/admin/genres/{}", id);
        let result = self.0.delete(&url).await?;
        Ok(Waveform::convert_message(&result))
    }
}
