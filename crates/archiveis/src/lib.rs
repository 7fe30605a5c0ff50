//! Client for the archive.is snapshot service.
//!
//! Two operations: fetch the snapshot history of a page (its timemap), and
//! ask the service to take a new snapshot.
//!
//! # Architecture
//!
//! This crate follows the three-layer pattern:
//! - `data` - Immutable types and the service's fixed wire constants
//! - `core` - Pure decoding of the service's response conventions
//! - `effects` - HTTP behind the [`HttpTransport`] trait seam
//!
//! The default transport is reqwest-backed (feature `reqwest`, on by
//! default) with redirect following disabled: the save flow decodes the
//! service's `302`/`307` + `Location` convention itself.
//!
//! ```no_run
//! use archiveis::{ArchiveClient, SaveOptions};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArchiveClient::with_default_transport()?;
//!
//! let history = client.timemap("https://www.kernel.org").await?;
//! println!("{} snapshots", history.mementos.len());
//!
//! let saved = client.save("https://www.kernel.org", SaveOptions::default()).await?;
//! println!("snapshot at {}", saved.short_url);
//! # Ok(())
//! # }
//! ```

mod core;
mod data;
mod effects;
mod error;

pub use data::{REFERER, SUBMIT_ENDPOINT, SaveOptions, SaveResult, TIMEMAP_ENDPOINT, USER_AGENT};
pub use effects::{ArchiveClient, HttpTransport, Response};
pub use error::ArchiveError;

#[cfg(feature = "reqwest")]
pub use effects::ReqwestTransport;

pub use archiveis_timemap::{Memento, MementoList, ParseError};
