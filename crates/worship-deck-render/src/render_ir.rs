use serde::{Deserialize, Serialize};
use worship_deck::{Deck, LiturgyLabels, Slide, SlideKind, TemplateStyle};

/// Text color used on every page.
pub const TEXT_COLOR: &str = "#FFFFFF";

/// Transparency of the black overlay drawn over background images.
pub const OVERLAY_TRANSPARENCY_PERCENT: u8 = 40;

/// Consumer of a paginated deck.
///
/// Implementations must not paginate on their own; they only lay out the
/// slides they are given.
pub trait SlideRenderer {
    type Output;
    type Error;

    fn render(&mut self, deck: &Deck) -> Result<Self::Output, Self::Error>;
}

/// Role of one composed text line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "number", rename_all = "camelCase")]
pub enum LineRole {
    /// Large centered caption on fixed section slides.
    Caption,
    Heading,
    Subheading,
    /// Verse or page counter under the heading.
    Counter,
    /// Reader caption ("Leader:", ...).
    Label,
    Body,
    /// Scripture text.
    Scripture,
    /// Numbered family report item.
    Item(usize),
    /// Page counter at the bottom of the page.
    Footer,
}

/// Font emphasis for a line role.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextEmphasis {
    pub bold: bool,
    pub italic: bool,
}

impl LineRole {
    pub fn emphasis(self) -> TextEmphasis {
        match self {
            Self::Caption | Self::Heading | Self::Label => TextEmphasis {
                bold: true,
                italic: false,
            },
            Self::Scripture => TextEmphasis {
                bold: false,
                italic: true,
            },
            _ => TextEmphasis::default(),
        }
    }
}

/// One line of slide text with its role.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlideLine {
    pub role: LineRole,
    pub text: String,
}

impl SlideLine {
    pub fn new(role: LineRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }
}

/// Page background.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Background {
    Color { color: String },
    /// Image covered by a translucent black overlay.
    Image {
        path: String,
        overlay_transparency: u8,
    },
}

/// Template-derived styling applied uniformly to every page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageStyle {
    pub background: Background,
    pub font_family: String,
    pub text_color: String,
}

impl PageStyle {
    pub fn from_template(template: &TemplateStyle) -> Self {
        let background = match template
            .background_image
            .as_deref()
            .filter(|p| !p.is_empty())
        {
            Some(path) => Background::Image {
                path: path.to_string(),
                overlay_transparency: OVERLAY_TRANSPARENCY_PERCENT,
            },
            None => Background::Color {
                color: template.primary_color.clone(),
            },
        };
        Self {
            background,
            font_family: template.font_family.clone(),
            text_color: TEXT_COLOR.to_string(),
        }
    }
}

/// A composed slide as shown by the previewer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlideFrame {
    /// 0-based slide index.
    pub index: usize,
    pub count: usize,
    pub style: PageStyle,
    pub lines: Vec<SlideLine>,
}

/// Lay out the text lines of one slide.
///
/// The single composition path shared by every renderer.
pub fn compose_slide(slide: &Slide, labels: &LiturgyLabels) -> Vec<SlideLine> {
    let mut lines = Vec::with_capacity(4);
    match &slide.kind {
        SlideKind::Title { title, date } => {
            lines.push(SlideLine::new(LineRole::Heading, title.as_str()));
            lines.push(SlideLine::new(LineRole::Subheading, date.as_str()));
        }
        SlideKind::SectionTitle { caption } => {
            lines.push(SlideLine::new(LineRole::Caption, caption.as_str()));
        }
        SlideKind::ProclamationGroup { entries } => {
            lines.push(SlideLine::new(
                LineRole::Heading,
                labels.proclamation_heading.as_str(),
            ));
            for entry in entries {
                lines.push(SlideLine::new(LineRole::Label, labels.section_kind(entry.kind)));
                lines.push(SlideLine::new(LineRole::Scripture, entry.text.as_str()));
            }
        }
        SlideKind::Scripture { reference, text } => {
            lines.push(SlideLine::new(LineRole::Heading, reference.as_str()));
            lines.push(SlideLine::new(LineRole::Scripture, text.as_str()));
        }
        SlideKind::HymnVerse {
            title,
            number,
            verse,
        } => {
            let heading = match number {
                Some(n) if !n.is_empty() => format!("{} {}", n, title),
                _ => title.clone(),
            };
            lines.push(SlideLine::new(LineRole::Heading, heading));
            if let Some(counter) = slide.page {
                lines.push(SlideLine::new(
                    LineRole::Counter,
                    labels.format_verse_counter(counter),
                ));
            }
            lines.push(SlideLine::new(LineRole::Body, verse.as_str()));
        }
        SlideKind::CreedPage { title, text } => {
            lines.push(SlideLine::new(LineRole::Heading, title.as_str()));
            if let Some(counter) = slide.page {
                lines.push(SlideLine::new(
                    LineRole::Counter,
                    labels.format_page_counter(counter),
                ));
            }
            lines.push(SlideLine::new(LineRole::Body, text.as_str()));
        }
        SlideKind::InfoSharing {
            title,
            subtitle,
            chapter,
        } => {
            lines.push(SlideLine::new(LineRole::Heading, title.as_str()));
            for extra in [subtitle, chapter].into_iter().flatten() {
                lines.push(SlideLine::new(LineRole::Subheading, extra.as_str()));
            }
        }
        SlideKind::FamilyReportPage { title, items } => {
            lines.push(SlideLine::new(LineRole::Heading, title.as_str()));
            for item in items {
                lines.push(SlideLine::new(LineRole::Item(item.number), item.text.as_str()));
            }
            if let Some(counter) = slide.page {
                lines.push(SlideLine::new(
                    LineRole::Footer,
                    labels.format_page_counter(counter),
                ));
            }
        }
    }
    lines
}
