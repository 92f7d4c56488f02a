//! Content resolution: catalog id or literal text to display text.
//!
//! Values are not tagged on the wire. A non-empty value without a newline is
//! tried as a catalog id; on a miss, or when it contains a newline, it is
//! literal text. A single-line custom entry that happens to equal a catalog
//! id is therefore read as that catalog entry.

use crate::catalog::Catalogs;
use crate::labels::LiturgyLabels;

/// How a raw value should be interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefClass<'a> {
    /// No content at all.
    Empty,
    /// Single-line value to try against the catalog.
    LibraryId(&'a str),
    /// Multi-line value, always literal.
    Literal(&'a str),
}

/// Classify a raw value without consulting any catalog.
pub fn classify(value: &str) -> RefClass<'_> {
    if value.is_empty() {
        RefClass::Empty
    } else if value.contains('\n') {
        RefClass::Literal(value)
    } else {
        RefClass::LibraryId(value)
    }
}

/// Where resolved text came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContentSource {
    Library,
    Custom,
}

/// Scripture ready for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedScripture {
    pub reference: String,
    pub text: String,
    pub source: ContentSource,
}

/// Hymn ready for verse splitting.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedHymn {
    pub title: String,
    pub number: Option<String>,
    pub lyrics: String,
    pub source: ContentSource,
}

/// Resolve a scripture value. `None` means "no content".
pub fn resolve_scripture(
    value: &str,
    catalogs: &Catalogs,
    labels: &LiturgyLabels,
) -> Option<ResolvedScripture> {
    let literal = match classify(value) {
        RefClass::Empty => return None,
        RefClass::LibraryId(id) => match catalogs.scripture(id) {
            Some(entry) => {
                return Some(ResolvedScripture {
                    reference: entry.reference.clone(),
                    text: entry.text.clone(),
                    source: ContentSource::Library,
                })
            }
            None => id,
        },
        RefClass::Literal(text) => text,
    };
    Some(ResolvedScripture {
        reference: labels.custom_scripture_reference.clone(),
        text: literal.to_string(),
        source: ContentSource::Custom,
    })
}

/// Resolve a hymn value. `None` means "no content".
pub fn resolve_hymn(
    value: &str,
    catalogs: &Catalogs,
    labels: &LiturgyLabels,
) -> Option<ResolvedHymn> {
    let literal = match classify(value) {
        RefClass::Empty => return None,
        RefClass::LibraryId(id) => match catalogs.hymn(id) {
            Some(entry) => {
                return Some(ResolvedHymn {
                    title: entry.title.clone(),
                    number: entry.number.clone(),
                    lyrics: entry.lyrics.clone(),
                    source: ContentSource::Library,
                })
            }
            None => id,
        },
        RefClass::Literal(text) => text,
    };
    Some(ResolvedHymn {
        title: labels.custom_hymn_title.clone(),
        number: None,
        lyrics: literal.to_string(),
        source: ContentSource::Custom,
    })
}
