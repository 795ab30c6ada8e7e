use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Position used when a location declares no query.
pub const DEFAULT_POSITION: &str = "after=additions";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LocationError {
    #[error("Location has no scheme delimiter: {0:?}")]
    Malformed(String),
}

/// A parsed `scheme:path?query` address.
///
/// The query is stored as declared. The default position is applied by
/// [`LocationExpression::query`] at the point of use, never at parse time.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocationExpression {
    raw: String,
    scheme: String,
    path: String,
    query: Option<String>,
}

impl LocationExpression {
    pub fn parse(raw: impl Into<String>) -> Result<Self, LocationError> {
        let raw = raw.into();

        let (scheme, rest) = match raw.split_once(':') {
            Some((scheme, rest)) if !scheme.is_empty() => (scheme, rest),
            _ => return Err(LocationError::Malformed(raw)),
        };

        let (path, query) = match rest.split_once('?') {
            Some((path, query)) => (path, Some(query)),
            None => (rest, None),
        };

        Ok(Self {
            scheme: scheme.to_string(),
            path: path.to_string(),
            query: query.filter(|q| !q.is_empty()).map(str::to_string),
            raw,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// The declared query, or [`DEFAULT_POSITION`] when there is none.
    pub fn query(&self) -> &str {
        self.query.as_deref().unwrap_or(DEFAULT_POSITION)
    }

    pub fn declared_query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn is_toolbar_scheme(&self) -> bool {
        self.scheme.starts_with("toolbar")
    }

    /// The location exactly as authored.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl FromStr for LocationExpression {
    type Err = LocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LocationExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_scheme_path_and_query() {
        let loc = LocationExpression::parse("menu:file?after=open").unwrap();
        assert_eq!(loc.scheme(), "menu");
        assert_eq!(loc.path(), "file");
        assert_eq!(loc.query(), "after=open");
        assert_eq!(loc.declared_query(), Some("after=open"));
    }

    #[test]
    fn empty_query_reads_as_default_position() {
        let bare = LocationExpression::parse("menu:file").unwrap();
        let dangling = LocationExpression::parse("menu:file?").unwrap();
        assert_eq!(bare.query(), DEFAULT_POSITION);
        assert_eq!(dangling.query(), DEFAULT_POSITION);
        assert_eq!(bare.declared_query(), None);
        assert_eq!(dangling.declared_query(), None);
    }

    #[test]
    fn only_first_question_mark_splits() {
        let loc = LocationExpression::parse("popup:ctx?before=a?b").unwrap();
        assert_eq!(loc.path(), "ctx");
        assert_eq!(loc.query(), "before=a?b");
    }

    #[test]
    fn missing_or_empty_scheme_is_malformed() {
        assert_eq!(
            LocationExpression::parse("file?after=x"),
            Err(LocationError::Malformed("file?after=x".to_string()))
        );
        assert!(LocationExpression::parse(":file").is_err());
        assert!(LocationExpression::parse("").is_err());
    }

    #[test]
    fn display_keeps_raw_text() {
        let loc: LocationExpression = "menu:help?after=additions".parse().unwrap();
        assert_eq!(loc.to_string(), "menu:help?after=additions");
        assert_eq!(LocationExpression::parse("menu:help").unwrap().to_string(), "menu:help");
    }

    #[test]
    fn toolbar_scheme_is_a_prefix_match() {
        assert!(LocationExpression::parse("toolbar:x").unwrap().is_toolbar_scheme());
        assert!(LocationExpression::parse("toolbarX:x").unwrap().is_toolbar_scheme());
        assert!(!LocationExpression::parse("menu:toolbar").unwrap().is_toolbar_scheme());
    }
}
