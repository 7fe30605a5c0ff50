//! Timemap assembly: relation tokens to snapshot history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::link::{Link, LinkError, split_links};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error(transparent)]
    Link(#[from] LinkError),
    #[error("invalid datetime attribute: {0}")]
    InvalidDatetime(String),
}

/// One archived snapshot of a page at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Memento {
    pub url: String,
    pub date: DateTime<Utc>,
}

/// The snapshot history of a page.
///
/// `mementos` keeps the source order of `memento`-tagged entries (the
/// service emits them ascending by date). `first` and `last` come from the
/// entries the format itself tags `first`/`last`; they are trusted as-is and
/// never cross-checked against the chronological extremes of `mementos`.
/// Fields the input lacks stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MementoList {
    pub original: Option<String>,
    pub timegate: Option<String>,
    pub first: Option<Memento>,
    pub last: Option<Memento>,
    pub mementos: Vec<Memento>,
}

/// Parses a timemap body into a [`MementoList`].
///
/// Entries without a `rel` parameter are skipped. Only entries that carry a
/// `datetime` parameter can become snapshots; an unparseable datetime fails
/// the whole parse rather than producing a bogus timestamp.
pub fn parse(input: &str) -> Result<MementoList, ParseError> {
    let mut list = MementoList::default();

    for raw in split_links(input) {
        let link = Link::parse(raw)?;
        let Some(rel) = link.param("rel") else {
            continue;
        };
        let rel: Vec<&str> = rel.split_whitespace().collect();

        if rel.contains(&"original") {
            list.original = Some(link.uri.clone());
        }
        if rel.contains(&"timegate") {
            list.timegate = Some(link.uri.clone());
        }

        let snapshot_tagged =
            rel.contains(&"memento") || rel.contains(&"first") || rel.contains(&"last");
        if let Some(datetime) = link.param("datetime")
            && snapshot_tagged
        {
            let snapshot = Memento {
                url: link.uri.clone(),
                date: parse_datetime(datetime)?,
            };
            if rel.contains(&"memento") {
                list.mementos.push(snapshot.clone());
            }
            if rel.contains(&"first") {
                list.first = Some(snapshot.clone());
            }
            if rel.contains(&"last") {
                list.last = Some(snapshot);
            }
        }
    }

    Ok(list)
}

impl std::str::FromStr for MementoList {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { parse(s) }
}

// RFC 2822 covers the `Sat, 09 Jan 2016 15:34:44 GMT` form the service emits.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, ParseError> {
    DateTime::parse_from_rfc2822(s)
        .map(|date| date.with_timezone(&Utc))
        .map_err(|_| ParseError::InvalidDatetime(s.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn memento_date_round_trip() {
        let list = parse(
            r#"<https://archive.is/x>; rel="memento"; datetime="Sat, 09 Jan 2016 15:34:44 GMT""#,
        )
        .unwrap();
        assert_eq!(list.mementos.len(), 1);
        assert_eq!(list.mementos[0].url, "https://archive.is/x");
        assert_eq!(
            list.mementos[0].date,
            Utc.with_ymd_and_hms(2016, 1, 9, 15, 34, 44).unwrap()
        );
    }

    #[test]
    fn source_order_preserved() {
        let input = concat!(
            "<u:b>; rel=\"memento\"; datetime=\"Thu, 29 Apr 1999 09:31:20 GMT\",\n",
            "<u:a>; rel=\"memento\"; datetime=\"Fri, 30 Jan 1998 08:50:39 GMT\"",
        );
        let list = parse(input).unwrap();
        let urls: Vec<&str> = list.mementos.iter().map(|m| m.url.as_str()).collect();
        assert_eq!(urls, ["u:b", "u:a"]);
    }

    #[test]
    fn last_original_and_timegate_win() {
        let input = concat!(
            "<http://one/>; rel=\"original\",\n",
            "<http://two/>; rel=\"original\",\n",
            "<http://gate/>; rel=\"timegate\"",
        );
        let list = parse(input).unwrap();
        assert_eq!(list.original.as_deref(), Some("http://two/"));
        assert_eq!(list.timegate.as_deref(), Some("http://gate/"));
    }

    #[test]
    fn entries_without_rel_are_inert() {
        let input = concat!(
            "<http://no-rel/>; type=\"text/html\"; datetime=\"Sat, 09 Jan 2016 15:34:44 GMT\",\n",
            "<http://page/>; rel=\"original\"",
        );
        let list = parse(input).unwrap();
        assert_eq!(list.original.as_deref(), Some("http://page/"));
        assert!(list.mementos.is_empty());
        assert!(list.first.is_none() && list.last.is_none());
    }

    #[test]
    fn snapshot_rels_without_datetime_are_skipped() {
        let list = parse("<u:a>; rel=\"first memento\"").unwrap();
        assert!(list.first.is_none());
        assert!(list.mementos.is_empty());
    }

    #[test]
    fn first_without_memento_rel_does_not_join_the_sequence() {
        let input = concat!(
            "<u:a>; rel=\"first\"; datetime=\"Fri, 30 Jan 1998 08:50:39 GMT\",\n",
            "<u:b>; rel=\"memento\"; datetime=\"Thu, 29 Apr 1999 09:31:20 GMT\"",
        );
        let list = parse(input).unwrap();
        assert_eq!(list.first.as_ref().unwrap().url, "u:a");
        assert_eq!(list.mementos.len(), 1);
        assert_eq!(list.mementos[0].url, "u:b");
    }

    // Open question resolved the original client's way: the tags are
    // trusted, even when they disagree with the memento sequence.
    #[test]
    fn first_last_trusted_from_tags() {
        let input = concat!(
            "<u:old>; rel=\"memento\"; datetime=\"Fri, 30 Jan 1998 08:50:39 GMT\",\n",
            "<u:new>; rel=\"memento\"; datetime=\"Sat, 09 Jan 2016 15:34:44 GMT\",\n",
            "<u:odd>; rel=\"first last\"; datetime=\"Thu, 09 Nov 2000 01:45:00 GMT\"",
        );
        let list = parse(input).unwrap();
        assert_eq!(list.first.as_ref().unwrap().url, "u:odd");
        assert_eq!(list.last.as_ref().unwrap().url, "u:odd");
        assert_eq!(list.mementos.len(), 2);
    }

    #[test]
    fn invalid_datetime_fails_fast() {
        let err = parse("<u:a>; rel=\"memento\"; datetime=\"not a date\"").unwrap_err();
        assert!(matches!(err, ParseError::InvalidDatetime(ref s) if s == "not a date"));
    }

    // A bad datetime on an entry that never becomes a snapshot must not
    // fail the parse; only snapshot-tagged entries get their dates decoded.
    #[test]
    fn datetime_ignored_on_non_snapshot_rels() {
        let list = parse("<u:a>; rel=\"self\"; datetime=\"garbage\"").unwrap();
        assert!(list.mementos.is_empty());
    }

    #[test]
    fn empty_input_is_an_empty_history() {
        assert_eq!(parse("").unwrap(), MementoList::default());
    }
}
