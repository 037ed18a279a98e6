pub mod album;
pub mod artist;
pub mod genre;
pub mod playlist;
pub mod profile;
pub mod track;

use serde::{Deserialize, Deserializer, Serialize};

use std::fmt;

/// Reads an explicit `null` the same way as a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    Single,
    Album,
}

impl Default for ReleaseType {
    fn default() -> Self {
        Self::Single
    }
}

impl ReleaseType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Album => "album",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Licensing {
    /// Creative Commons, refined by an optional CC subtype.
    Cc,
    Proprietary,
}

impl Default for Licensing {
    fn default() -> Self {
        Self::Proprietary
    }
}

impl Licensing {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cc => "cc",
            Self::Proprietary => "proprietary",
        }
    }
}

/// Moderation state of a release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlbumStatus {
    Pending,
    Approved,
    Rejected,
    Unpublished,
}

impl AlbumStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unpublished => "unpublished",
        }
    }
}

impl fmt::Display for AlbumStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Banned,
}

impl UserStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Banned => "banned",
        }
    }
}

impl fmt::Display for UserStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
