use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A named, clonable repository offered to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSource {
    /// `owner/repo`
    pub name: String,
    /// Clone url
    pub url: String,
}

/// Repository record as returned by the GitHub REST API.
///
/// Only the fields needed to build a [`RemoteSource`] are kept. They are
/// optional here so a missing field is reported instead of failing the
/// whole response decode.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct RawRepo {
    pub full_name: Option<String>,
    pub clone_url: Option<String>,
}

impl RawRepo {
    pub fn new(full_name: &str, clone_url: &str) -> Self {
        Self {
            full_name: Some(full_name.to_string()),
            clone_url: Some(clone_url.to_string()),
        }
    }
}

impl TryFrom<RawRepo> for RemoteSource {
    type Error = Error;

    fn try_from(raw: RawRepo) -> Result<Self> {
        let name = raw
            .full_name
            .ok_or(Error::MalformedRecord { field: "full_name" })?;
        let url = raw
            .clone_url
            .ok_or(Error::MalformedRecord { field: "clone_url" })?;
        Ok(RemoteSource { name, url })
    }
}

/// Maps a page of raw records, failing on the first malformed one.
pub fn as_remote_sources(raw: Vec<RawRepo>) -> Result<Vec<RemoteSource>> {
    raw.into_iter().map(RemoteSource::try_from).collect()
}
