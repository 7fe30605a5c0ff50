//! Core layer: pure decoding of the service's save-response conventions.
//!
//! The submission endpoint signals success in two ways: a `200` whose
//! `Refresh` header carries a `0;url=<short-url>` redirect page (fresh
//! capture), or a `302`/`307` whose `Location` points at the existing
//! snapshot. Both targets must be archive short URLs of the form
//! `https://archive.is/<id>`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::data::SaveResult;
use crate::error::ArchiveError;

static REFRESH_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^0;url=(?<target>.+)$").unwrap());

static SHORT_URL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://archive\.is/(?<id>.+)$").unwrap());

pub(crate) fn decode_save_response(
    url: &str,
    status: u16,
    refresh: Option<&str>,
    location: Option<&str>,
) -> Result<SaveResult, ArchiveError> {
    match status {
        200 => {
            let target = refresh.and_then(refresh_target).ok_or_else(|| {
                ArchiveError::SaveRefused {
                    url: url.to_string(),
                }
            })?;
            let (id, short_url) = split_short_url(target)
                .ok_or_else(|| ArchiveError::BadRefreshHeader(target.to_string()))?;
            Ok(SaveResult {
                id,
                short_url,
                already_exists: false,
            })
        }
        302 | 307 => {
            let target = location.ok_or_else(|| ArchiveError::MissingLocation {
                url: url.to_string(),
            })?;
            let (id, short_url) = split_short_url(target)
                .ok_or_else(|| ArchiveError::BadLocationHeader(target.to_string()))?;
            Ok(SaveResult {
                id,
                short_url,
                already_exists: true,
            })
        }
        status => Err(ArchiveError::HttpStatus { status }),
    }
}

fn refresh_target(header: &str) -> Option<&str> {
    REFRESH_REGEX
        .captures(header)
        .and_then(|caps| caps.name("target"))
        .map(|m| m.as_str())
}

fn split_short_url(target: &str) -> Option<(String, String)> {
    SHORT_URL_REGEX
        .captures(target)
        .and_then(|caps| caps.name("id"))
        .map(|id| (id.as_str().to_string(), target.to_string()))
}
