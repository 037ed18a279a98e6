//! Overview counters shown on the admin landing page

use crate::client::{ClientResult, Waveform};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DashboardSummary {
    pub pending_uploads: usize,
    pub registered_artists: usize,
    /// Tracks across all approved releases.
    pub total_tracks: usize,
}

pub struct Dashboard<'a>(pub &'a Waveform);

impl Dashboard<'_> {
    pub async fn summary(&self) -> ClientResult<DashboardSummary> {
        let pending_uploads = self.0.albums().pending().await?.len();
        let registered_artists = self.0.users().list().await?.len();
        let total_tracks: usize = self
            .0
            .albums()
            .approved()
            .await?
            .iter()
            .map(|album| album.tracks.len())
            .sum();

        Ok(DashboardSummary {
            pending_uploads,
            registered_artists,
            total_tracks,
        })
    }
}
