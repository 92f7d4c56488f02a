//! Read-only content catalogs (hymns, scripture entries, templates).
//!
//! Catalogs are pre-loaded by the host and looked up by exact id.

use serde::{Deserialize, Serialize};

use crate::error::DeckError;
use crate::program::TemplateStyle;

/// One hymn in the hymn catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HymnEntry {
    pub id: String,
    pub title: String,
    /// Hymnal number, when the hymn has one.
    pub number: Option<String>,
    /// Verses separated by blank lines.
    pub lyrics: String,
}

/// One addressable passage in the scripture catalog.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptureEntry {
    pub id: String,
    pub volume: String,
    pub chapter: String,
    /// Verse label, e.g. `"1-3"`.
    pub verse: String,
    /// Human-readable reference shown on slides.
    pub reference: String,
    pub text: String,
}

/// One visual template.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateEntry {
    pub id: String,
    /// Display name.
    pub name: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: String,
    pub background_image: Option<String>,
}

impl TemplateEntry {
    /// Style carried into a program.
    pub fn style(&self) -> TemplateStyle {
        TemplateStyle {
            primary_color: self.primary_color.clone(),
            secondary_color: self.secondary_color.clone(),
            font_family: self.font_family.clone(),
            background_image: self.background_image.clone(),
        }
    }
}

/// The external catalogs consulted during one pagination pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalogs {
    pub hymns: Vec<HymnEntry>,
    pub scriptures: Vec<ScriptureEntry>,
    pub templates: Vec<TemplateEntry>,
}

impl Catalogs {
    /// Build catalogs from already decoded entries.
    pub fn new(
        hymns: Vec<HymnEntry>,
        scriptures: Vec<ScriptureEntry>,
        templates: Vec<TemplateEntry>,
    ) -> Self {
        Self {
            hymns,
            scriptures,
            templates,
        }
    }

    /// Decode each catalog from its own JSON array.
    pub fn from_json_parts(
        hymns_json: &str,
        scriptures_json: &str,
        templates_json: &str,
    ) -> Result<Self, DeckError> {
        Ok(Self {
            hymns: serde_json::from_str(hymns_json)?,
            scriptures: serde_json::from_str(scriptures_json)?,
            templates: serde_json::from_str(templates_json)?,
        })
    }

    /// Find a hymn by exact id.
    pub fn hymn(&self, id: &str) -> Option<&HymnEntry> {
        self.hymns.iter().find(|h| h.id == id)
    }

    /// Find a scripture passage by exact id.
    pub fn scripture(&self, id: &str) -> Option<&ScriptureEntry> {
        self.scriptures.iter().find(|s| s.id == id)
    }

    /// Find a template by exact id.
    pub fn template(&self, id: &str) -> Option<&TemplateEntry> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// Resolve a template id to its style, falling back to the default style.
    pub fn template_style(&self, id: &str) -> TemplateStyle {
        match self.template(id) {
            Some(entry) => entry.style(),
            None => {
                log::debug!("template '{}' not in catalog; using default style", id);
                TemplateStyle::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogs() -> Catalogs {
        Catalogs::from_json_parts(
            r#"[{ "id": "h-1", "title": "Amazing Grace", "number": "12", "lyrics": "a\n\nb" }]"#,
            r#"[{ "id": "jn-3-16", "volume": "John", "chapter": "3", "verse": "16",
                  "reference": "John 3:16", "text": "For God so loved the world" }]"#,
            r##"[{ "id": "elegant", "name": "Elegant", "primaryColor": "#8b5cf6",
                   "secondaryColor": "#4c1d95", "fontFamily": "SimSun" }]"##,
        )
        .expect("catalogs should decode")
    }

    #[test]
    fn lookups_match_exact_ids_only() {
        let c = catalogs();
        assert_eq!(c.hymn("h-1").map(|h| h.title.as_str()), Some("Amazing Grace"));
        assert!(c.hymn("h-").is_none());
        assert_eq!(
            c.scripture("jn-3-16").map(|s| s.reference.as_str()),
            Some("John 3:16")
        );
    }

    #[test]
    fn template_style_falls_back_to_default() {
        let c = catalogs();
        let style = c.template_style("elegant");
        assert_eq!(style.primary_color, "#8b5cf6");
        assert_eq!(style.font_family, "SimSun");
        assert_eq!(c.template_style("missing"), TemplateStyle::default());
    }
}
