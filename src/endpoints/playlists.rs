//! Endpoint functions related to playlists

use crate::client::*;
use crate::edit::ValidationError;
use crate::model::playlist::*;

pub struct Playlists<'a>(pub &'a Waveform);

impl Playlists<'_> {
    pub async fn list(&self) -> ClientResult<Vec<Playlist>> {
        let result = self.0.get("/playlists").await?;
        Waveform::convert_result::<Vec<Playlist>>(&result)
    }

    pub async fn create(&self, name: &str, description: &str, is_public: bool) -> ClientResult<Playlist> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation(ValidationError::EmptyField("playlist name")));
        }
        let payload = Payload::json(&NewPlaylist {
            name,
            description,
            is_public,
        })?;
        let result = self.0.post("/playlists", payload).await?;
        Waveform::convert_result::<Playlist>(&result)
    }
}
