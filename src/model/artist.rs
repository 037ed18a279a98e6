// Use 3rd party
use serde::{Deserialize, Serialize};

// Use local
use crate::model::UserStatus;

/// A registered artist account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    pub id: u64,
    /// Identity provider UID, used to address the account in admin calls.
    pub user_id: String,
    pub name: String,
    pub bio: Option<String>,
    pub artwork_path: Option<String>,
    pub created_at: String,
    pub status: UserStatus,
}
