//! Worship program input model.
//!
//! The program is produced by an external form collaborator and arrives as
//! JSON. Field names on the wire are camelCase. Every optional part may be
//! missing; missing parts simply produce no slides.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DeckError;

/// Reader role for one proclamation reading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Read by the worship leader.
    Leader,
    /// Read by the congregation.
    Congregation,
    /// Read by everyone together.
    Unison,
}

/// A scripture or hymn value: either a catalog id or literal custom text.
///
/// The two cases are not tagged on the wire. See
/// [`classify`](crate::resolve::classify) for how they are told apart.
///
/// Accepts either a bare string or an object of the form `{"content": "..."}`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ContentRef(pub String);

impl ContentRef {
    /// Wrap a raw value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Raw wire value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the value carries nothing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for ContentRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ContentRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextEntry {
    Plain(String),
    Wrapped {
        #[serde(default)]
        content: String,
    },
}

impl TextEntry {
    fn into_string(self) -> String {
        match self {
            Self::Plain(text) => text,
            Self::Wrapped { content } => content,
        }
    }
}

impl<'de> Deserialize<'de> for ContentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        TextEntry::deserialize(deserializer).map(|entry| Self(entry.into_string()))
    }
}

fn text_entries<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    let entries = Vec::<TextEntry>::deserialize(deserializer)?;
    Ok(entries.into_iter().map(TextEntry::into_string).collect())
}

/// One proclamation reading.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptureSection {
    /// Who reads this section.
    #[serde(rename = "type")]
    pub kind: SectionKind,
    /// Catalog id or literal text.
    #[serde(default)]
    pub content: ContentRef,
}

impl ScriptureSection {
    /// Build a section from a kind and raw value.
    pub fn new(kind: SectionKind, content: impl Into<ContentRef>) -> Self {
        Self {
            kind,
            content: content.into(),
        }
    }
}

/// Visual template applied uniformly to every rendered page.
///
/// Opaque to pagination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateStyle {
    /// Page background color (`#rrggbb`).
    pub primary_color: String,
    /// Accent color (`#rrggbb`).
    pub secondary_color: String,
    /// Font family applied to every text line.
    pub font_family: String,
    /// Optional background image path; takes precedence over the color.
    pub background_image: Option<String>,
}

impl Default for TemplateStyle {
    fn default() -> Self {
        Self {
            primary_color: "#3b82f6".to_string(),
            secondary_color: "#1e3a8a".to_string(),
            font_family: "Arial".to_string(),
            background_image: None,
        }
    }
}

/// Sermon ("info sharing") title card.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfoSharing {
    pub title: String,
    pub subtitle: Option<String>,
    pub chapter: Option<String>,
}

/// Fixed liturgical text supplied with every program.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FixedContent {
    /// Apostles' Creed, with exactly one page-break marker.
    pub apostles_creed: String,
}

/// Complete structured description of one service.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorshipProgram {
    pub title: String,
    /// ISO calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub template: TemplateStyle,
    pub proclamation: Vec<ScriptureSection>,
    pub linking_scriptures: Vec<ContentRef>,
    pub first_hymn: Option<ContentRef>,
    pub second_hymn: Option<ContentRef>,
    pub third_hymn: Option<ContentRef>,
    pub response_hymn: Option<ContentRef>,
    pub sending_hymn: Option<ContentRef>,
    pub info_sharing: InfoSharing,
    #[serde(deserialize_with = "text_entries")]
    pub family_report_items: Vec<String>,
    pub fixed_content: FixedContent,
}

impl WorshipProgram {
    /// Decode a program from the form collaborator's JSON.
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        Ok(serde_json::from_str(json)?)
    }
}
