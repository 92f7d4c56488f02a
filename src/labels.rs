//! Fixed liturgical captions and synthetic labels.

use crate::program::SectionKind;
use crate::slide::PageCounter;

/// Marker separating the two creed pages inside the fixed creed text.
pub const CREED_PAGE_BREAK: &str = "===PAGE_BREAK===";

/// Captions used on fixed slides and as fallbacks for custom content.
///
/// `Default` carries the Chinese captions used by the congregation this
/// deck format was built for; [`LiturgyLabels::english`] is an alternative
/// preset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiturgyLabels {
    pub prelude: String,
    pub proclamation: String,
    /// Heading shown on every proclamation group slide.
    pub proclamation_heading: String,
    pub creed_title: String,
    pub family_report_title: String,
    pub benediction: String,
    pub dismissal: String,
    pub leader: String,
    pub congregation: String,
    pub unison: String,
    /// Title given to hymns entered as literal lyrics.
    pub custom_hymn_title: String,
    /// Reference given to scripture entered as literal text.
    pub custom_scripture_reference: String,
    /// Verse counter with `{index}` and `{total}` placeholders.
    pub verse_counter: String,
    /// Page counter with `{index}` and `{total}` placeholders.
    pub page_counter: String,
}

impl Default for LiturgyLabels {
    fn default() -> Self {
        Self {
            prelude: "序乐".to_string(),
            proclamation: "宣告".to_string(),
            proclamation_heading: "宣告经文".to_string(),
            creed_title: "使徒信经".to_string(),
            family_report_title: "家事报告".to_string(),
            benediction: "公祷".to_string(),
            dismissal: "平安散会".to_string(),
            leader: "领诵:".to_string(),
            congregation: "会众:".to_string(),
            unison: "齐诵:".to_string(),
            custom_hymn_title: "自定义诗歌".to_string(),
            custom_scripture_reference: "经文".to_string(),
            verse_counter: "第 {index} 节 / 共 {total} 节".to_string(),
            page_counter: "第 {index} 页 / 共 {total} 页".to_string(),
        }
    }
}

impl LiturgyLabels {
    /// English captions.
    pub fn english() -> Self {
        Self {
            prelude: "Prelude".to_string(),
            proclamation: "Proclamation".to_string(),
            proclamation_heading: "Proclamation Scripture".to_string(),
            creed_title: "The Apostles' Creed".to_string(),
            family_report_title: "Family Report".to_string(),
            benediction: "Benediction".to_string(),
            dismissal: "Dismissal".to_string(),
            leader: "Leader:".to_string(),
            congregation: "Congregation:".to_string(),
            unison: "All:".to_string(),
            custom_hymn_title: "Hymn".to_string(),
            custom_scripture_reference: "Scripture".to_string(),
            verse_counter: "Verse {index} of {total}".to_string(),
            page_counter: "Page {index} of {total}".to_string(),
        }
    }

    /// Reader caption for a proclamation section.
    pub fn section_kind(&self, kind: SectionKind) -> &str {
        match kind {
            SectionKind::Leader => &self.leader,
            SectionKind::Congregation => &self.congregation,
            SectionKind::Unison => &self.unison,
        }
    }

    /// Render a hymn verse counter.
    pub fn format_verse_counter(&self, counter: PageCounter) -> String {
        fill_counter(&self.verse_counter, counter)
    }

    /// Render a page counter.
    pub fn format_page_counter(&self, counter: PageCounter) -> String {
        fill_counter(&self.page_counter, counter)
    }
}

fn fill_counter(template: &str, counter: PageCounter) -> String {
    template
        .replace("{index}", &counter.index.to_string())
        .replace("{total}", &counter.total.to_string())
}
