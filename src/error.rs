//! Error types for program loading and pagination.

use core::fmt;

/// Errors raised while loading or paginating a worship program.
///
/// Missing optional content and catalog lookup misses are not errors; the
/// affected slides are simply omitted or fall back to literal text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeckError {
    /// The creed text must contain exactly one page-break marker.
    WrongMarkerCount {
        /// Number of markers actually found.
        found: usize,
    },
    /// A reorder index is outside the sequence.
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Sequence length.
        len: usize,
    },
    /// Program or catalog JSON could not be decoded.
    Json(String),
}

impl DeckError {
    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::WrongMarkerCount { .. } => "CREED_MARKER_COUNT",
            Self::IndexOutOfRange { .. } => "INDEX_OUT_OF_RANGE",
            Self::Json(_) => "JSON_DECODE",
        }
    }
}

impl fmt::Display for DeckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WrongMarkerCount { found } => write!(
                f,
                "creed text must contain exactly one page-break marker (found {})",
                found
            ),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {} out of range for length {}", index, len)
            }
            Self::Json(msg) => write!(f, "invalid JSON input: {}", msg),
        }
    }
}

impl std::error::Error for DeckError {}

impl From<serde_json::Error> for DeckError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable_per_variant() {
        assert_eq!(
            DeckError::WrongMarkerCount { found: 0 }.code(),
            "CREED_MARKER_COUNT"
        );
        assert_eq!(
            DeckError::IndexOutOfRange { index: 3, len: 2 }.code(),
            "INDEX_OUT_OF_RANGE"
        );
        assert_eq!(DeckError::Json("eof".into()).code(), "JSON_DECODE");
    }

    #[test]
    fn display_mentions_marker_count() {
        let msg = DeckError::WrongMarkerCount { found: 2 }.to_string();
        assert!(msg.contains("found 2"), "{msg}");
    }
}
