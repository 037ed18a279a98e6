//! Endpoint functions relating to albums

use log::debug;
use reqwest::multipart::Form;

use crate::client::{ApiMessage, ClientResult, Payload, Waveform};
use crate::edit::{FormPart, ReleaseEditSession, ReleaseSubmission};
use crate::endpoints::file_part;
use crate::model::album::{Album, AlbumForEdit};

pub struct Albums<'a>(pub &'a Waveform);

impl Albums<'_> {
    /// Uploads waiting for moderation.
    pub async fn pending(&self) -> ClientResult<Vec<Album>> {
        let result = self.0.get("/admin/uploads/pending").await?;
        Waveform::convert_result::<Vec<Album>>(&result)
    }

    /// Releases that are currently live.
    pub async fn approved(&self) -> ClientResult<Vec<Album>> {
        let result = self.0.get("/admin/content/approved").await?;
        Waveform::convert_result::<Vec<Album>>(&result)
    }

    pub async fn unpublish(&self, id: u64) -> ClientResult<ApiMessage> {
        let url = format!("/admin/uploads/{}/unpublish", id);
        let result = self.0.put(&url, Payload::Empty).await?;
        Ok(Waveform::convert_message(&result))
    }

    pub async fn get_for_edit(&self, id: u64) -> ClientResult<AlbumForEdit> {
        let url = format!("/admin/albums/{}/edit", id);
        let result = self.0.get(&url).await?;
        Waveform::convert_result::<AlbumForEdit>(&result)
    }

    /// Loads a release and opens an edit session on it.
    pub async fn edit_session(&self, id: u64) -> ClientResult<ReleaseEditSession> {
        let album = self.get_for_edit(id).await?;
        Ok(ReleaseEditSession::new(album))
    }

    /// Reconciles the session and submits the result as one multipart request.
    ///
    /// Validation failures are returned before anything is sent. The session is
    /// only borrowed, so after any failure it can be corrected and submitted again.
    pub async fn update(&self, session: &ReleaseEditSession) -> ClientResult<ApiMessage> {
        let submission = session.reconcile()?;
        debug!(
            "updating album {}: {} new, {} updated, {} deleted tracks",
            submission.album_id,
            submission.changes.new_tracks.len(),
            submission.changes.updated_tracks.len(),
            submission.changes.deleted_ids.len()
        );
        let form = submission_form(&submission)?;
        let url = format!("/admin/albums/{}", submission.album_id);
        let result = self.0.put(&url, Payload::Multipart(form)).await?;
        Ok(Waveform::convert_message(&result))
    }
}

pub fn submission_form(submission: &ReleaseSubmission) -> ClientResult<Form> {
    let mut form = Form::new();
    for part in submission.parts()? {
        form = match part {
            FormPart::Text { name, value } => form.text(name, value),
            FormPart::File { name, file } => form.part(name, file_part(file)?),
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::tests::{client, mock_request_status, mock_request_success, mock_request_success_from_file, BEARER};
    use crate::client::ClientError;
    use crate::edit::{Attachment, TrackRef, ValidationError};
    use crate::model::AlbumStatus;
    use mockito::{mock, Matcher};

    #[tokio::test]
    async fn pending() {
        let _mock = mock_request_success_from_file("GET", "/admin/uploads/pending", "tests/files/albums_pending.json");

        let result: Vec<Album> = client().albums().pending().await.unwrap();
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].title, "First Light");
        assert_eq!(result[0].status, AlbumStatus::Pending);
    }

    #[tokio::test]
    async fn approved() {
        let _mock = mock_request_success_from_file("GET", "/admin/content/approved", "tests/files/albums_approved.json");

        let result: Vec<Album> = client().albums().approved().await.unwrap();
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].artist_name, "The Tapes");
        assert_eq!(result[0].tracks.len(), 2);
        assert!(result[1].tracks.is_empty());
    }

    #[tokio::test]
    async fn unpublish() {
        let mock = mock_request_success("PUT", "/admin/uploads/42/unpublish", r#"{"message": "Album unpublished"}"#);

        let result = client().albums().unpublish(42).await.unwrap();
        assert_eq!(result.message.as_deref(), Some("Album unpublished"));
        mock.assert();
    }

    #[tokio::test]
    async fn edit_session() {
        let _mock = mock_request_success_from_file("GET", "/admin/albums/42/edit", "tests/files/album_edit.json");

        let session = client().albums().edit_session(42).await.unwrap();
        assert_eq!(session.album_id(), 42);
        assert_eq!(session.metadata().genres, vec!["Synthwave", "Ambient"]);
        let titles: Vec<_> = session.tracks().iter().map(|track| track.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn edit_session_tolerates_null_fields() {
        let _mock = mock_request_success_from_file("GET", "/admin/albums/43/edit", "tests/files/album_edit_nulls.json");

        let session = client().albums().edit_session(43).await.unwrap();
        assert_eq!(session.album_id(), 43);
        assert!(session.metadata().genres.is_empty());
        assert_eq!(session.metadata().description, "");
        assert_eq!(session.tracks().len(), 1);
        assert_eq!(session.tracks()[0].track_number, 1);
        assert!(!session.is_dirty());
    }

    #[tokio::test]
    async fn update_sends_reconciled_multipart() {
        let _mock_load = mock_request_success_from_file("GET", "/admin/albums/42/edit", "tests/files/album_edit.json");
        let client = client();
        let mut session = client.albums().edit_session(42).await.unwrap();
        session.remove_track(&TrackRef::Persistent(2));
        session.set_track_title(&TrackRef::Persistent(1), "A2");
        let id = session.add_track();
        session.set_track_title(&id, "C");
        session.attach_file(&id, Attachment::new("c.mp3", b"not really audio".to_vec())).unwrap();

        let mock_update = mock("PUT", "/admin/albums/42")
            .match_header(BEARER, Matcher::Regex("^Bearer ".to_owned()))
            .match_header("content-type", Matcher::Regex("^multipart/form-data; boundary=".to_owned()))
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="artistName"\s+The Tapes"#.to_owned()),
                Matcher::Regex(r#"name="genres"\s+Synthwave, Ambient"#.to_owned()),
                Matcher::Regex(r#"name="status"\s+approved"#.to_owned()),
                Matcher::Regex(r#"name="tracksToDelete"\s+\[2\]"#.to_owned()),
                Matcher::Regex(r#"name="updatedExistingTracksMetadata"\s+\[\{"id":1,"title":"A2","track_number":1\}\]"#.to_owned()),
                Matcher::Regex(r#""originalFileName":"c.mp3""#.to_owned()),
                Matcher::Regex(r#"name="newTracks"; filename="c.mp3""#.to_owned()),
                Matcher::Regex("not really audio".to_owned()),
            ]))
            .with_status(200)
            .with_body(r#"{"message": "Album updated successfully"}"#)
            .create();

        let result = client.albums().update(&session).await.unwrap();
        assert_eq!(result.message.as_deref(), Some("Album updated successfully"));
        mock_update.assert();
    }

    #[tokio::test]
    async fn update_rejects_invalid_session_without_sending() {
        let _mock_load = mock_request_success_from_file("GET", "/admin/albums/42/edit", "tests/files/album_edit.json");
        let client = client();
        let mut session = client.albums().edit_session(42).await.unwrap();
        let id = session.add_track();
        session.set_track_title(&id, "C");

        let mock_update = mock("PUT", "/admin/albums/42").expect(0).create();
        let err = client.albums().update(&session).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingFile(ref local)) if local == "new-track-1"
        ));
        mock_update.assert();
    }

    #[tokio::test]
    async fn update_failure_keeps_session() {
        let _mock_load = mock_request_success_from_file("GET", "/admin/albums/42/edit", "tests/files/album_edit.json");
        let client = client();
        let mut session = client.albums().edit_session(42).await.unwrap();
        session.set_title("Night Drive (Remastered)");

        {
            let _mock = mock_request_status("PUT", "/admin/albums/42", 500, r#"{"message": "Storage unavailable"}"#);
            let err = client.albums().update(&session).await.unwrap_err();
            assert_eq!(err.to_string(), "api error 500: Storage unavailable");
        }
        assert_eq!(session.metadata().title, "Night Drive (Remastered)");

        let _mock = mock_request_success("PUT", "/admin/albums/42", r#"{"message": "ok"}"#);
        assert!(client.albums().update(&session).await.is_ok());
    }
}
