// Use 3rd party
use serde::{Deserialize, Serialize};

/// The signed-in admin's own public profile.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub artwork: Option<String>,
}
