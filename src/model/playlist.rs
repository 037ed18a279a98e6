// Use 3rd party
use serde::{Deserialize, Serialize};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub artwork: Option<String>,
}

/// Body of a playlist creation request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlaylist<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub is_public: bool,
}
