pub mod albums;
pub mod dashboard;
pub mod genres;
pub mod playlists;
pub mod profile;
pub mod users;

use reqwest::multipart::Part;

use crate::client::{ClientResult, Waveform};
use crate::edit::Attachment;
use crate::endpoints::albums::*;
use crate::endpoints::dashboard::*;
use crate::endpoints::genres::*;
use crate::endpoints::playlists::*;
use crate::endpoints::profile::*;
use crate::endpoints::users::*;

// Endpoint function namespaces

impl Waveform {
    pub const fn albums(&self) -> Albums {
        Albums(self)
    }

    pub const fn dashboard(&self) -> Dashboard {
        Dashboard(self)
    }

    pub const fn genres(&self) -> Genres {
        Genres(self)
    }

    pub const fn playlists(&self) -> Playlists {
        Playlists(self)
    }

    pub const fn profile(&self) -> Profiles {
        Profiles(self)
    }

    pub const fn users(&self) -> Users {
        Users(self)
    }
}

/// Binary form part carrying the attachment's file name and MIME type.
pub(crate) fn file_part(file: &Attachment) -> ClientResult<Part> {
    Part::bytes(file.content().to_vec())
        .file_name(file.file_name().to_owned())
        .mime_str(file.mime_type())
        .map_err(Into::into)
}
