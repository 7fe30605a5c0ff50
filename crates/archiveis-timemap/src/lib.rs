//! Timemap parsing for page snapshot histories.
//!
//! A timemap is a machine-readable list of every archived snapshot
//! ("memento") of a page, delivered as a comma-separated sequence of
//! link-format entries:
//!
//! ```text
//! <https://www.kernel.org/>; rel="original",
//! <https://archive.is/19980130085039/http://www.kernel.org/>; rel="first memento"; datetime="Fri, 30 Jan 1998 08:50:39 GMT",
//! ```
//!
//! [`parse`] turns that text into a [`MementoList`]: the original page URL,
//! the timegate URL, the explicitly tagged first/last snapshots, and all
//! `memento`-tagged entries in source order. Pure text-to-structure
//! transform, no I/O.

pub use self::link::{Link, LinkError};
pub use self::timemap::{Memento, MementoList, ParseError, parse};

mod link;
mod timemap;
