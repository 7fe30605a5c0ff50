//! Data layer: immutable types and the service's fixed wire constants.

use serde::{Deserialize, Serialize};

pub const TIMEMAP_ENDPOINT: &str = "https://archive.is/timemap/";
pub const SUBMIT_ENDPOINT: &str = "https://archive.is/submit/";

/// The submission endpoint rejects requests without these exact header
/// values; both must go out verbatim.
pub const REFERER: &str = "https://archive.is";
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 6.1) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/41.0.2228.0 Safari/537.36";

/// Options for [`crate::ArchiveClient::save`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Capture even if a snapshot of the page already exists. On the wire
    /// this is the service's `anyway=1` form field.
    pub force: bool,
}

impl SaveOptions {
    pub fn forced() -> Self { Self { force: true } }
}

/// Outcome of a save call: the snapshot's short URL and whether the service
/// served a pre-existing capture instead of taking a new one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveResult {
    pub id: String,
    pub short_url: String,
    pub already_exists: bool,
}
