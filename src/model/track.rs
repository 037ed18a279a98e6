// Use 3rd party
use serde::{Deserialize, Serialize};

/// A stored track as the backend returns it.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub title: String,
    #[serde(default)]
    pub track_number: Option<u32>,
    #[serde(rename = "audioPath", default)]
    pub audio_path: Option<String>,
}
