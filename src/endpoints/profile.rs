//! Endpoint functions relating to the signed-in admin's profile

use reqwest::multipart::Form;

use crate::client::{ApiMessage, ClientResult, Payload, Waveform};
use crate::edit::Attachment;
use crate::endpoints::file_part;
use crate::model::profile::Profile;

pub struct Profiles<'a>(pub &'a Waveform);

impl Profiles<'_> {
    pub async fn get(&self) -> ClientResult<Profile> {
        let result = self.0.get("/artist/profile").await?;
        Waveform::convert_result::<Profile>(&result)
    }

    /// Replaces name and bio. The avatar is only sent when a new one is given.
    pub async fn update(&self, name: &str, bio: &str, avatar: Option<&Attachment>) -> ClientResult<ApiMessage> {
        let mut form = Form::new()
            .text("name", name.to_owned())
            .text("bio", bio.to_owned());
        if let Some(avatar) = avatar {
            form = form.part("artwork", file_part(avatar)?);
        }
        let result = self.0.put("/artist/profile", Payload::Multipart(form)).await?;
        Ok(Waveform::convert_message(&result))
    }
}
