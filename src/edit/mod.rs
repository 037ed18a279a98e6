//! In-memory editing of a single release.
//!
//! A [`ReleaseEditSession`] is created from the release returned by the edit
//! endpoint. It keeps that release as an untouched baseline and a working copy
//! that the edit actions mutate. [`ReleaseEditSession::reconcile`] diffs the two
//! and produces a [`ReleaseSubmission`] ready to be sent as one multipart request.

pub mod reconcile;

// Use 3rd party
use thiserror::Error;

// Use built-in library
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

// Use internal modules
use crate::model::album::AlbumForEdit;
use crate::model::{Licensing, ReleaseType};

pub use self::reconcile::{
    FormPart, NewTrackMetadata, ReleaseSubmission, TrackChanges, UpdatedTrackMetadata,
};

const LOCAL_ID_PREFIX: &str = "new-track-";

/// Problems found before anything is sent. A submission is never partially assembled.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a release needs at least one track")]
    NoTracks,
    #[error("track {0} has no title")]
    EmptyTitle(TrackRef),
    #[error("{0} is required")]
    EmptyField(&'static str),
    #[error("new track {0} has no audio file attached")]
    MissingFile(String),
    #[error("audio of existing track {0} cannot be replaced, delete it and add a new track instead")]
    AudioReplacement(u64),
    #[error("unknown track {0}")]
    UnknownTrack(TrackRef),
}

/// Identifies a track within an edit session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackRef {
    /// Assigned by the backend; the track existed when the session was loaded.
    Persistent(u64),
    /// Assigned by the session to a track added during editing.
    Local(String),
}

impl TrackRef {
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Local(_))
    }
}

impl fmt::Display for TrackRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Persistent(id) => write!(f, "{}", id),
            Self::Local(token) => f.write_str(token),
        }
    }
}

/// A local file waiting to be uploaded.
#[derive(Clone, PartialEq, Eq)]
pub struct Attachment {
    file_name: String,
    mime_type: String,
    content: Vec<u8>,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.content.len())
            .finish()
    }
}

impl Attachment {
    pub fn new(file_name: &str, content: Vec<u8>) -> Self {
        let mime_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_owned();
        Self {
            file_name: file_name.to_owned(),
            mime_type,
            content,
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "path has no file name"))?;
        let content = fs::read(path)?;
        Ok(Self::new(file_name, content))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

/// A track in the working copy of a release.
#[derive(Debug, Clone, PartialEq)]
pub struct EditTrack {
    pub id: TrackRef,
    pub title: String,
    pub track_number: u32,
    /// Already stored audio. Only persistent tracks have one.
    pub audio_path: Option<String>,
    /// Newly attached audio. Only local tracks have one.
    pub pending_file: Option<Attachment>,
}

impl EditTrack {
    pub fn original_file_name(&self) -> Option<&str> {
        self.pending_file.as_ref().map(Attachment::file_name)
    }
}

/// Editable release fields besides the track list.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseMetadata {
    pub artist_name: String,
    pub title: String,
    pub release_type: ReleaseType,
    pub genres: Vec<String>,
    pub release_date: String,
    pub description: String,
    pub licensing: Licensing,
    pub cc_type: Option<String>,
    /// Replacement artwork. `None` keeps the stored one.
    pub artwork: Option<Attachment>,
}

impl From<&AlbumForEdit> for ReleaseMetadata {
    fn from(album: &AlbumForEdit) -> Self {
        Self {
            artist_name: album.artist_name.clone(),
            title: album.title.clone(),
            release_type: album.release_type,
            genres: album.genres.clone(),
            release_date: album.release_date.clone(),
            description: album.description.clone(),
            licensing: album.licensing,
            cc_type: album.cc_type.clone().filter(|cc_type| !cc_type.is_empty()),
            artwork: None,
        }
    }
}

/// Editing context for one release.
#[derive(Debug, Clone)]
pub struct ReleaseEditSession {
    original: AlbumForEdit,
    metadata: ReleaseMetadata,
    tracks: Vec<EditTrack>,
    local_counter: u32,
}

impl ReleaseEditSession {
    #[must_use]
    pub fn new(original: AlbumForEdit) -> Self {
        let metadata = ReleaseMetadata::from(&original);
        let tracks = initial_tracks(&original);
        Self {
            original,
            metadata,
            tracks,
            local_counter: 0,
        }
    }

    pub const fn original(&self) -> &AlbumForEdit {
        &self.original
    }

    pub const fn album_id(&self) -> u64 {
        self.original.id
    }

    pub const fn metadata(&self) -> &ReleaseMetadata {
        &self.metadata
    }

    pub fn tracks(&self) -> &[EditTrack] {
        &self.tracks
    }

    pub fn track(&self, id: &TrackRef) -> Option<&EditTrack> {
        self.tracks.iter().find(|track| &track.id == id)
    }

    /// Whether the working copy differs from what was loaded.
    pub fn is_dirty(&self) -> bool {
        self.metadata != ReleaseMetadata::from(&self.original) || self.tracks != initial_tracks(&self.original)
    }

    /// Classifies the working track list against the loaded one.
    pub fn changes(&self) -> Result<TrackChanges, ValidationError> {
        reconcile::classify(&self.original.tracks, &self.tracks)
    }

    /// Validates the session and builds the submission for it.
    pub fn reconcile(&self) -> Result<ReleaseSubmission, ValidationError> {
        reconcile::assemble(&self.original, &self.metadata, &self.tracks)
    }

    // Track mutations

    /// Appends an untitled track without audio and returns its local id.
    pub fn add_track(&mut self) -> TrackRef {
        self.local_counter += 1;
        let id = TrackRef::Local(format!("{}{}", LOCAL_ID_PREFIX, self.local_counter));
        self.tracks.push(EditTrack {
            id: id.clone(),
            title: String::new(),
            track_number: self.tracks.len() as u32 + 1,
            audio_path: None,
            pending_file: None,
        });
        id
    }

    /// Returns `false` if no track has this id.
    pub fn remove_track(&mut self, id: &TrackRef) -> bool {
        let before = self.tracks.len();
        self.tracks.retain(|track| &track.id != id);
        let removed = self.tracks.len() != before;
        if removed {
            self.renumber();
        }
        removed
    }

    /// Moves a track to `position` (0-based, clamped to the end of the list).
    pub fn move_track(&mut self, id: &TrackRef, position: usize) -> bool {
        let from = match self.tracks.iter().position(|track| &track.id == id) {
            Some(from) => from,
            None => return false,
        };
        let track = self.tracks.remove(from);
        let to = position.min(self.tracks.len());
        self.tracks.insert(to, track);
        self.renumber();
        true
    }

    /// Returns `false` if no track has this id.
    pub fn set_track_title(&mut self, id: &TrackRef, title: &str) -> bool {
        match self.tracks.iter_mut().find(|track| &track.id == id) {
            Some(track) => {
                track.title = title.to_owned();
                true
            }
            None => false,
        }
    }

    pub fn attach_file(&mut self, id: &TrackRef, file: Attachment) -> Result<(), ValidationError> {
        let track = self
            .tracks
            .iter_mut()
            .find(|track| &track.id == id)
            .ok_or_else(|| ValidationError::UnknownTrack(id.clone()))?;
        match &track.id {
            TrackRef::Persistent(id) => Err(ValidationError::AudioReplacement(*id)),
            TrackRef::Local(_) => {
                track.pending_file = Some(file);
                Ok(())
            }
        }
    }

    fn renumber(&mut self) {
        for (index, track) in self.tracks.iter_mut().enumerate() {
            track.track_number = index as u32 + 1;
        }
    }

    // Metadata mutations

    pub fn set_artist_name(&mut self, artist_name: &str) {
        self.metadata.artist_name = artist_name.to_owned();
    }

    pub fn set_title(&mut self, title: &str) {
        self.metadata.title = title.to_owned();
    }

    pub fn set_release_type(&mut self, release_type: ReleaseType) {
        self.metadata.release_type = release_type;
    }

    pub fn set_release_date(&mut self, release_date: &str) {
        self.metadata.release_date = release_date.to_owned();
    }

    pub fn set_description(&mut self, description: &str) {
        self.metadata.description = description.to_owned();
    }

    /// Proprietary releases carry no CC subtype, so switching to it clears one.
    pub fn set_licensing(&mut self, licensing: Licensing) {
        self.metadata.licensing = licensing;
        if licensing == Licensing::Proprietary {
            self.metadata.cc_type = None;
        }
    }

    pub fn set_cc_type(&mut self, cc_type: Option<&str>) {
        self.metadata.cc_type = cc_type.filter(|cc_type| !cc_type.is_empty()).map(str::to_owned);
    }

    /// Blank and already selected genres are ignored.
    pub fn add_genre(&mut self, genre: &str) -> bool {
        let genre = genre.trim();
        if genre.is_empty() || self.metadata.genres.iter().any(|selected| selected == genre) {
            return false;
        }
        self.metadata.genres.push(genre.to_owned());
        true
    }

    pub fn remove_genre(&mut self, genre: &str) -> bool {
        let before = self.metadata.genres.len();
        self.metadata.genres.retain(|selected| selected != genre);
        self.metadata.genres.len() != before
    }

    pub fn set_artwork(&mut self, artwork: Attachment) {
        self.metadata.artwork = Some(artwork);
    }

    pub fn clear_artwork(&mut self) {
        self.metadata.artwork = None;
    }
}

/// The loaded tracks in playback order, numbered densely from 1.
fn initial_tracks(original: &AlbumForEdit) -> Vec<EditTrack> {
    let mut tracks: Vec<(u32, EditTrack)> = original
        .tracks
        .iter()
        .enumerate()
        .map(|(index, track)| {
            let baseline = reconcile::baseline_number(index, track);
            let track = EditTrack {
                id: TrackRef::Persistent(track.id),
                title: track.title.clone(),
                track_number: baseline,
                audio_path: track.audio_path.clone(),
                pending_file: None,
            };
            (baseline, track)
        })
        .collect();
    tracks.sort_by_key(|(baseline, _)| *baseline);
    tracks
        .into_iter()
        .enumerate()
        .map(|(index, (_, mut track))| {
            track.track_number = index as u32 + 1;
            track
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::track::Track;
    use crate::model::AlbumStatus;

    pub fn original_album(tracks: &[(u64, &str, u32)]) -> AlbumForEdit {
        AlbumForEdit {
            id: 42,
            title: "Night Drive".to_owned(),
            artist_name: "The Tapes".to_owned(),
            artist_user_id: "artist-uid".to_owned(),
            artwork: Some("/uploads/artwork/42.jpg".to_owned()),
            release_type: ReleaseType::Album,
            release_date: "2024-05-01".to_owned(),
            description: "Late night recordings".to_owned(),
            licensing: Licensing::Proprietary,
            cc_type: None,
            status: AlbumStatus::Approved,
            rejection_reason: None,
            tracks: tracks
                .iter()
                .map(|(id, title, number)| Track {
                    id: *id,
                    title: (*title).to_owned(),
                    track_number: Some(*number),
                    audio_path: Some(format!("/uploads/audio/{}.mp3", id)),
                })
                .collect(),
            genres: vec!["Synthwave".to_owned()],
        }
    }

    fn numbers(session: &ReleaseEditSession) -> Vec<u32> {
        session.tracks().iter().map(|track| track.track_number).collect()
    }

    #[test]
    fn loads_tracks_in_playback_order() {
        let session = ReleaseEditSession::new(original_album(&[(7, "B", 2), (3, "A", 1)]));
        let ids: Vec<_> = session.tracks().iter().map(|track| track.id.clone()).collect();
        assert_eq!(ids, vec![TrackRef::Persistent(3), TrackRef::Persistent(7)]);
        assert_eq!(numbers(&session), vec![1, 2]);
        assert!(!session.is_dirty());
    }

    #[test]
    fn missing_track_numbers_follow_list_position() {
        let mut album = original_album(&[(1, "A", 1), (2, "B", 2)]);
        album.tracks[0].track_number = None;
        album.tracks[1].track_number = None;
        let session = ReleaseEditSession::new(album);
        assert_eq!(numbers(&session), vec![1, 2]);
        assert!(session.changes().unwrap().is_empty());
    }

    #[test]
    fn gapped_stored_numbers_are_compacted_on_load() {
        let session = ReleaseEditSession::new(original_album(&[(1, "A", 1), (2, "B", 3)]));
        assert_eq!(numbers(&session), vec![1, 2]);
        // Loading alone is not an edit, but the stored gap is repaired on the next submit.
        assert!(!session.is_dirty());
        let changes = session.changes().unwrap();
        assert!(changes.new_tracks.is_empty());
        assert!(changes.deleted_ids.is_empty());
        assert_eq!(
            changes.updated_tracks,
            vec![UpdatedTrackMetadata {
                id: 2,
                title: "B".to_owned(),
                track_number: 2,
            }]
        );
    }

    #[test]
    fn add_track_appends_untitled_local_track() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1)]));
        let id = session.add_track();
        assert_eq!(id, TrackRef::Local("new-track-1".to_owned()));
        let track = session.track(&id).unwrap();
        assert_eq!(track.title, "");
        assert_eq!(track.track_number, 2);
        assert!(track.pending_file.is_none());
        assert!(session.is_dirty());
    }

    #[test]
    fn local_ids_stay_unique_after_removals() {
        let mut session = ReleaseEditSession::new(original_album(&[]));
        let first = session.add_track();
        let second = session.add_track();
        assert!(session.remove_track(&first));
        let third = session.add_track();
        assert_ne!(second, third);
        assert_eq!(numbers(&session), vec![1, 2]);
    }

    #[test]
    fn remove_track_renumbers_survivors() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1), (2, "B", 2), (3, "C", 3)]));
        assert!(session.remove_track(&TrackRef::Persistent(2)));
        assert!(!session.remove_track(&TrackRef::Persistent(2)));
        assert_eq!(numbers(&session), vec![1, 2]);
        assert_eq!(session.track(&TrackRef::Persistent(3)).unwrap().track_number, 2);
        // the baseline is untouched
        assert_eq!(session.original().tracks.len(), 3);
    }

    #[test]
    fn track_numbers_stay_dense() {
        // small LCG so the sequence of operations is reproducible
        let mut seed: u64 = 0x2545_f491;
        let mut next = move |bound: usize| {
            seed = seed.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1_442_695_040_888_963_407);
            ((seed >> 33) as usize) % bound.max(1)
        };

        for _ in 0..20 {
            let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1), (2, "B", 2), (3, "C", 3)]));
            for _ in 0..30 {
                match next(3) {
                    0 => {
                        session.add_track();
                    }
                    1 if !session.tracks().is_empty() => {
                        let id = session.tracks()[next(session.tracks().len())].id.clone();
                        session.remove_track(&id);
                    }
                    _ if !session.tracks().is_empty() => {
                        let id = session.tracks()[next(session.tracks().len())].id.clone();
                        let position = next(session.tracks().len() + 1);
                        session.move_track(&id, position);
                    }
                    _ => {}
                }
                let expected: Vec<u32> = (1..=session.tracks().len() as u32).collect();
                assert_eq!(numbers(&session), expected);
            }
        }
    }

    #[test]
    fn move_track_reorders() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1), (2, "B", 2), (3, "C", 3)]));
        assert!(session.move_track(&TrackRef::Persistent(3), 0));
        let titles: Vec<_> = session.tracks().iter().map(|track| track.title.as_str()).collect();
        assert_eq!(titles, vec!["C", "A", "B"]);
        assert!(session.move_track(&TrackRef::Persistent(3), 99));
        assert_eq!(session.tracks()[2].id, TrackRef::Persistent(3));
        assert!(!session.move_track(&TrackRef::Local("new-track-9".to_owned()), 0));
    }

    #[test]
    fn set_track_title_ignores_unknown_ids() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1)]));
        assert!(!session.set_track_title(&TrackRef::Persistent(9), "X"));
        assert!(session.set_track_title(&TrackRef::Persistent(1), "A2"));
        assert_eq!(session.tracks()[0].title, "A2");
    }

    #[test]
    fn attach_file_only_to_local_tracks() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1)]));
        let id = session.add_track();
        session.attach_file(&id, Attachment::new("c.mp3", b"ID3".to_vec())).unwrap();
        let track = session.track(&id).unwrap();
        assert_eq!(track.original_file_name(), Some("c.mp3"));
        assert_eq!(track.pending_file.as_ref().unwrap().mime_type(), "audio/mpeg");

        let result = session.attach_file(&TrackRef::Persistent(1), Attachment::new("a.mp3", vec![]));
        assert_eq!(result, Err(ValidationError::AudioReplacement(1)));
        assert!(session.track(&TrackRef::Persistent(1)).unwrap().pending_file.is_none());

        let missing = TrackRef::Local("new-track-7".to_owned());
        let result = session.attach_file(&missing, Attachment::new("x.mp3", vec![]));
        assert_eq!(result, Err(ValidationError::UnknownTrack(missing)));
    }

    #[test]
    fn genres_reject_blanks_and_duplicates() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1)]));
        assert!(!session.add_genre("Synthwave"));
        assert!(!session.add_genre("   "));
        assert!(session.add_genre(" Techno "));
        assert_eq!(session.metadata().genres, vec!["Synthwave", "Techno"]);
        assert!(session.remove_genre("Synthwave"));
        assert!(!session.remove_genre("Synthwave"));
    }

    #[test]
    fn proprietary_licensing_clears_cc_type() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1)]));
        session.set_licensing(Licensing::Cc);
        session.set_cc_type(Some("by-sa"));
        assert_eq!(session.metadata().cc_type.as_deref(), Some("by-sa"));
        session.set_licensing(Licensing::Proprietary);
        assert!(session.metadata().cc_type.is_none());
    }

    #[test]
    fn metadata_edits_mark_session_dirty() {
        let mut session = ReleaseEditSession::new(original_album(&[(1, "A", 1)]));
        session.set_description("Late night recordings");
        assert!(!session.is_dirty());
        session.set_release_type(ReleaseType::Single);
        assert!(session.is_dirty());
    }

    #[test]
    fn attachment_debug_omits_content() {
        let attachment = Attachment::new("cover.png", vec![0; 1024]);
        assert_eq!(attachment.mime_type(), "image/png");
        assert!(format!("{:?}", attachment).contains("len: 1024"));
    }
}
