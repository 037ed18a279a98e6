// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::track::Track;
use crate::model::{AlbumStatus, Licensing, ReleaseType};

/// Release entry as listed by the pending and approved content endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Album {
    pub id: u64,
    pub title: String,
    #[serde(rename = "artistName")]
    pub artist_name: String,
    #[serde(default)]
    pub artwork: Option<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub release_type: ReleaseType,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub licensing: Licensing,
    #[serde(default)]
    pub cc_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    pub status: AlbumStatus,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub tracks: Vec<Track>,
}

/// Release as returned by the edit endpoint. This is the baseline an edit session diffs against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlbumForEdit {
    pub id: u64,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub title: String,
    #[serde(rename = "artistName", default, deserialize_with = "crate::model::null_as_default")]
    pub artist_name: String,
    #[serde(rename = "artistUserId", default, deserialize_with = "crate::model::null_as_default")]
    pub artist_user_id: String,
    #[serde(default)]
    pub artwork: Option<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub release_type: ReleaseType,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub release_date: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub licensing: Licensing,
    #[serde(default)]
    pub cc_type: Option<String>,
    pub status: AlbumStatus,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub tracks: Vec<Track>,
    #[serde(default, deserialize_with = "crate::model::null_as_default")]
    pub genres: Vec<String>,
}
