//! Error types for the snapshot client.

use thiserror::Error;

/// Every failure a client operation can surface. Nothing is retried or
/// suppressed internally; partial results are never returned beside an
/// error.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The timemap body did not conform to the link-format grammar.
    #[error(transparent)]
    Parse(#[from] archiveis_timemap::ParseError),

    /// The service answered with a status the operation does not handle.
    #[error("unexpected HTTP status: {status}")]
    HttpStatus { status: u16 },

    /// Connection-level failure from the underlying transport.
    #[error("transport failure: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered a submission with 200 but no usable `Refresh`
    /// header, meaning it did not accept the page.
    #[error("couldn't save page: {url}")]
    SaveRefused { url: String },

    /// The `Refresh` target was not an archive short URL.
    #[error("incorrect 'Refresh' header: {0}")]
    BadRefreshHeader(String),

    /// The service redirected to an existing snapshot without saying where.
    #[error("redirect without 'Location' header for: {url}")]
    MissingLocation { url: String },

    /// The `Location` target was not an archive short URL.
    #[error("incorrect 'Location' header: {0}")]
    BadLocationHeader(String),
}
