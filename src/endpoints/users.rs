//! Endpoint functions relating to registered artists

use serde_json::json;

use crate::client::{ApiMessage, ClientResult, Payload, Waveform};
use crate::model::artist::Artist;
use crate::model::UserStatus;

pub struct Users<'a>(pub &'a Waveform);

impl Users<'_> {
    pub async fn list(&self) -> ClientResult<Vec<Artist>> {
        let result = self.0.get("/admin/users").await?;
        Waveform::convert_result::<Vec<Artist>>(&result)
    }

    /// `user_id` is the identity provider UID of the account, not its numeric id.
    pub async fn set_status(&self, user_id: &str, status: UserStatus) -> ClientResult<ApiMessage> {
        let url = format!("/admin/users/{}/status", user_id);
        let payload = Payload::json(&json!({ "status": status }))?;
        let result = self.0.put(&url, payload).await?;
        Ok(Waveform::convert_message(&result))
    }

    pub async fn ban(&self, user_id: &str) -> ClientResult<ApiMessage> {
        self.set_status(user_id, UserStatus::Banned).await
    }

    pub async fn activate(&self, user_id: &str) -> ClientResult<ApiMessage> {
        self.set_status(user_id, UserStatus::Active).await
    }
}
