//! Link-format entry parsing.
//!
//! Entries have the shape `<uri>; key="value"; key2=token`. Commas separate
//! entries, but only outside angle brackets and quoted strings; URIs and
//! quoted values may themselves contain commas and semicolons.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("malformed link entry: {0}")]
pub struct LinkError(pub String);

/// One parsed link-value: a URI plus its attribute parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub uri: String,
    params: Vec<(String, String)>,
}

impl Link {
    pub fn parse(s: &str) -> Result<Self, LinkError> {
        let trimmed = s.trim();
        let rest = trimmed
            .strip_prefix('<')
            .ok_or_else(|| LinkError(trimmed.to_string()))?;
        let (uri, attrs) = rest
            .split_once('>')
            .ok_or_else(|| LinkError(trimmed.to_string()))?;

        let mut params = Vec::new();
        for attr in split_unquoted(attrs, ';') {
            let attr = attr.trim();
            if attr.is_empty() {
                continue;
            }
            let (key, value) = attr
                .split_once('=')
                .ok_or_else(|| LinkError(attr.to_string()))?;
            params.push((key.trim().to_string(), unquote(value.trim()).to_string()));
        }

        Ok(Self {
            uri: uri.to_string(),
            params,
        })
    }

    /// Looks up a parameter by key; the first occurrence wins.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

impl std::str::FromStr for Link {
    type Err = LinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Link::parse(s) }
}

/// Splits a timemap body into individual link entries, honouring angle
/// brackets and quotes. Blank segments (trailing commas, blank lines) are
/// dropped.
pub(crate) fn split_links(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_uri = false;
    let mut in_quotes = false;

    for (i, c) in input.char_indices() {
        match c {
            '<' if !in_quotes => in_uri = true,
            '>' if !in_quotes => in_uri = false,
            '"' if !in_uri => in_quotes = !in_quotes,
            ',' if !in_uri && !in_quotes => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);

    parts.retain(|part| !part.trim().is_empty());
    parts
}

fn unquote(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_uri_and_quoted_params() {
        let link =
            Link::parse(r#"<https://archive.is/abc>; rel="first memento"; datetime="Fri, 30 Jan 1998 08:50:39 GMT""#)
                .unwrap();
        assert_eq!(link.uri, "https://archive.is/abc");
        assert_eq!(link.param("rel"), Some("first memento"));
        assert_eq!(link.param("datetime"), Some("Fri, 30 Jan 1998 08:50:39 GMT"));
        assert_eq!(link.param("type"), None);
    }

    #[test]
    fn parses_token_params() {
        let link = Link::parse("<coap://host/sensor>; ct=40; rel=hosts").unwrap();
        assert_eq!(link.param("ct"), Some("40"));
        assert_eq!(link.param("rel"), Some("hosts"));
    }

    #[test]
    fn first_param_occurrence_wins() {
        let link = Link::parse(r#"<u:a>; rel="one"; rel="two""#).unwrap();
        assert_eq!(link.param("rel"), Some("one"));
    }

    #[test]
    fn rejects_missing_angle_brackets() {
        assert!(Link::parse(r#"https://a; rel="x""#).is_err());
        assert!(Link::parse("<https://a; rel=x").is_err());
    }

    #[test]
    fn rejects_param_without_value() {
        let err = Link::parse("<u:a>; rel").unwrap_err();
        assert_eq!(err.to_string(), "malformed link entry: rel");
    }

    #[test]
    fn split_ignores_commas_in_uris_and_quotes() {
        let input = r#"<http://h/a,b>; rel="x", <http://h/c>; title="one, two", <http://h/d>"#;
        let parts = split_links(input);
        assert_eq!(parts.len(), 3);
        assert!(parts[0].contains("a,b"));
        assert!(parts[1].contains("one, two"));
    }

    #[test]
    fn split_drops_blank_segments() {
        assert!(split_links("").is_empty());
        assert!(split_links(" \n ,\n,").is_empty());
        assert_eq!(split_links("<u:a>,\n<u:b>,\n").len(), 2);
    }
}
