use serde::{Deserialize, Serialize};

use super::errors::DocumentError;

/// Path of a document relative to the database root, e.g. `feedbacks/abc123`.
///
/// Always an even, non-zero number of non-empty segments
/// (collection/document pairs).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DocumentPath(String);

impl DocumentPath {
    pub fn new(path: impl Into<String>) -> Result<Self, DocumentError> {
        let path = path.into();
        let trimmed = path.trim_matches('/');
        let segments: Vec<&str> = trimmed.split('/').collect();

        if trimmed.is_empty()
            || segments.iter().any(|s| s.is_empty())
            || segments.len() % 2 != 0
        {
            return Err(DocumentError::InvalidPath(path));
        }

        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl std::fmt::Display for DocumentPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for DocumentPath {
    type Error = DocumentError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<DocumentPath> for String {
    fn from(path: DocumentPath) -> Self {
        path.0
    }
}

impl std::str::FromStr for DocumentPath {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Literal(String),
    Wildcard(String),
}

/// Document path pattern such as `feedbacks/{id}`.
///
/// A segment wrapped in braces matches any single segment,
/// every other segment must match literally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    raw: String,
    segments: Vec<PatternSegment>,
}

impl PathPattern {
    pub fn parse(pattern: &str) -> Result<Self, DocumentError> {
        let trimmed = pattern.trim_matches('/');
        if trimmed.is_empty() {
            return Err(DocumentError::InvalidPattern(pattern.to_string()));
        }

        let mut segments = Vec::new();
        for segment in trimmed.split('/') {
            let parsed = match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) if !name.is_empty() && !name.contains(['{', '}']) => {
                    PatternSegment::Wildcard(name.to_string())
                }
                Some(_) => return Err(DocumentError::InvalidPattern(pattern.to_string())),
                None if segment.is_empty() || segment.contains(['{', '}']) => {
                    return Err(DocumentError::InvalidPattern(pattern.to_string()));
                }
                None => PatternSegment::Literal(segment.to_string()),
            };
            segments.push(parsed);
        }

        if segments.len() % 2 != 0 {
            return Err(DocumentError::InvalidPattern(pattern.to_string()));
        }

        Ok(Self {
            raw: trimmed.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn matches(&self, path: &DocumentPath) -> bool {
        let mut candidate = path.segments();
        for expected in &self.segments {
            match (expected, candidate.next()) {
                (_, None) => return false,
                (PatternSegment::Wildcard(_), Some(_)) => {}
                (PatternSegment::Literal(literal), Some(actual)) if literal == actual => {}
                (PatternSegment::Literal(_), Some(_)) => return false,
            }
        }
        candidate.next().is_none()
    }
}

impl std::fmt::Display for PathPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl std::str::FromStr for PathPattern {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
