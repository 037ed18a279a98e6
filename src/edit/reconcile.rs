//! Diffing of an edited track list against the loaded one.

// Use 3rd party
use serde::Serialize;

// Use built-in library
use std::collections::{HashMap, HashSet};

// Use internal modules
use crate::edit::{Attachment, EditTrack, ReleaseMetadata, TrackRef, ValidationError};
use crate::model::album::AlbumForEdit;
use crate::model::track::Track;
use crate::model::{AlbumStatus, Licensing, ReleaseType};

pub const GENRE_SEPARATOR: &str = ", ";

/// Metadata of a track to create. `original_file_name` links it to its uploaded file part.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTrackMetadata {
    pub id: String,
    pub title: String,
    pub track_number: u32,
    #[serde(rename = "originalFileName")]
    pub original_file_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdatedTrackMetadata {
    pub id: u64,
    pub title: String,
    pub track_number: u32,
}

/// Create, update and delete operations needed to turn the loaded track list into the edited one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackChanges {
    pub new_tracks: Vec<NewTrackMetadata>,
    /// Files of `new_tracks`, in the same order.
    pub new_files: Vec<Attachment>,
    pub deleted_ids: Vec<u64>,
    pub updated_tracks: Vec<UpdatedTrackMetadata>,
}

impl TrackChanges {
    pub fn is_empty(&self) -> bool {
        self.new_tracks.is_empty() && self.deleted_ids.is_empty() && self.updated_tracks.is_empty()
    }
}

/// One part of the multipart update request.
#[derive(Debug, Clone, PartialEq)]
pub enum FormPart<'a> {
    Text { name: &'static str, value: String },
    File { name: &'static str, file: &'a Attachment },
}

/// Everything the album update endpoint needs, assembled from a validated session.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseSubmission {
    pub album_id: u64,
    pub artist_name: String,
    pub album_title: String,
    pub release_type: ReleaseType,
    pub genres: Vec<String>,
    pub release_date: String,
    pub description: String,
    pub licensing: Licensing,
    pub cc_type: Option<String>,
    pub status: AlbumStatus,
    pub rejection_reason: String,
    pub artwork: Option<Attachment>,
    pub changes: TrackChanges,
}

impl ReleaseSubmission {
    /// The request body in field order. The track operation arrays are JSON encoded.
    pub fn parts(&self) -> Result<Vec<FormPart<'_>>, serde_json::Error> {
        let mut parts = vec![
            text("artistName", &self.artist_name),
            text("albumTitle", &self.album_title),
            text("releaseType", self.release_type.as_str()),
            text("genres", &self.genres.join(GENRE_SEPARATOR)),
            text("releaseDate", &self.release_date),
            text("description", &self.description),
            text("licensing", self.licensing.as_str()),
        ];
        if let Some(cc_type) = &self.cc_type {
            parts.push(text("ccType", cc_type));
        }
        parts.push(text("status", self.status.as_str()));
        parts.push(text("rejectionReason", &self.rejection_reason));

        if let Some(artwork) = &self.artwork {
            parts.push(FormPart::File {
                name: "artwork",
                file: artwork,
            });
        }
        for file in &self.changes.new_files {
            parts.push(FormPart::File {
                name: "newTracks",
                file,
            });
        }

        parts.push(FormPart::Text {
            name: "newTrackMetadata",
            value: serde_json::to_string(&self.changes.new_tracks)?,
        });
        parts.push(FormPart::Text {
            name: "tracksToDelete",
            value: serde_json::to_string(&self.changes.deleted_ids)?,
        });
        parts.push(FormPart::Text {
            name: "updatedExistingTracksMetadata",
            value: serde_json::to_string(&self.changes.updated_tracks)?,
        });
        Ok(parts)
    }
}

fn text(name: &'static str, value: &str) -> FormPart<'static> {
    FormPart::Text {
        name,
        value: value.to_owned(),
    }
}

/// Track number a stored track is compared against; stored tracks without one count by position.
pub(crate) fn baseline_number(index: usize, track: &Track) -> u32 {
    track
        .track_number
        .filter(|number| *number > 0)
        .unwrap_or(index as u32 + 1)
}

pub fn classify(original: &[Track], current: &[EditTrack]) -> Result<TrackChanges, ValidationError> {
    let baseline: HashMap<u64, (&str, u32)> = original
        .iter()
        .enumerate()
        .map(|(index, track)| (track.id, (track.title.as_str(), baseline_number(index, track))))
        .collect();

    let mut changes = TrackChanges::default();
    let mut kept = HashSet::new();
    for track in current {
        match &track.id {
            TrackRef::Local(token) => {
                let file = track
                    .pending_file
                    .as_ref()
                    .ok_or_else(|| ValidationError::MissingFile(token.clone()))?;
                changes.new_tracks.push(NewTrackMetadata {
                    id: token.clone(),
                    title: track.title.clone(),
                    track_number: track.track_number,
                    original_file_name: file.file_name().to_owned(),
                });
                changes.new_files.push(file.clone());
            }
            TrackRef::Persistent(id) => {
                let (title, track_number) = baseline
                    .get(id)
                    .copied()
                    .ok_or_else(|| ValidationError::UnknownTrack(track.id.clone()))?;
                kept.insert(*id);
                if title != track.title || track_number != track.track_number {
                    changes.updated_tracks.push(UpdatedTrackMetadata {
                        id: *id,
                        title: track.title.clone(),
                        track_number: track.track_number,
                    });
                }
            }
        }
    }

    let mut seen = HashSet::new();
    changes.deleted_ids = original
        .iter()
        .map(|track| track.id)
        .filter(|id| !kept.contains(id) && seen.insert(*id))
        .collect();
    Ok(changes)
}

pub fn assemble(
    original: &AlbumForEdit,
    metadata: &ReleaseMetadata,
    tracks: &[EditTrack],
) -> Result<ReleaseSubmission, ValidationError> {
    if tracks.is_empty() {
        return Err(ValidationError::NoTracks);
    }
    let changes = classify(&original.tracks, tracks)?;
    if let Some(track) = tracks.iter().find(|track| track.title.trim().is_empty()) {
        return Err(ValidationError::EmptyTitle(track.id.clone()));
    }
    if metadata.artist_name.trim().is_empty() {
        return Err(ValidationError::EmptyField("artist name"));
    }
    if metadata.title.trim().is_empty() {
        return Err(ValidationError::EmptyField("album title"));
    }

    Ok(ReleaseSubmission {
        album_id: original.id,
        artist_name: metadata.artist_name.clone(),
        album_title: metadata.title.clone(),
        release_type: metadata.release_type,
        genres: metadata.genres.clone(),
        release_date: metadata.release_date.clone(),
        description: metadata.description.clone(),
        licensing: metadata.licensing,
        cc_type: metadata.cc_type.clone(),
        status: original.status,
        rejection_reason: original.rejection_reason.clone().unwrap_or_default(),
        artwork: metadata.artwork.clone(),
        changes,
    })
}
