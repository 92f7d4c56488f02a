//! Slide IR produced by the pagination engine.
//!
//! Slides are medium-independent records. Renderers decide how fields are
//! laid out; pagination decides how many slides exist and what each holds.

use core::fmt;
use core::ops::Range;

use serde::{Deserialize, Serialize};

use crate::program::{SectionKind, TemplateStyle};
use crate::segment::char_len;

/// Part of the service a slide belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiturgySection {
    Title,
    Prelude,
    /// The "Proclamation" caption slide.
    ProclamationCaption,
    /// Proclamation group slides.
    Proclamation,
    FirstHymn,
    /// Linking scripture by its position in the program (0-based).
    LinkingScripture(usize),
    SecondHymn,
    ThirdHymn,
    Creed,
    InfoSharing,
    ResponseHymn,
    FamilyReport,
    SendingHymn,
    Benediction,
    Dismissal,
}

/// 1-based position within a group of related slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageCounter {
    pub index: usize,
    pub total: usize,
}

impl PageCounter {
    pub fn new(index: usize, total: usize) -> Self {
        Self { index, total }
    }

    /// Whether this is the final slide of its group.
    pub fn is_last(&self) -> bool {
        self.index == self.total
    }
}

/// One reading placed on a proclamation group slide.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProclamationEntry {
    pub kind: SectionKind,
    pub text: String,
}

impl ProclamationEntry {
    pub fn new(kind: SectionKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Budget weight of this entry.
    pub fn char_len(&self) -> usize {
        char_len(&self.text)
    }
}

/// A family report item with its display number.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NumberedItem {
    pub number: usize,
    pub text: String,
}

/// Kind-specific slide payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SlideKind {
    Title {
        title: String,
        date: String,
    },
    SectionTitle {
        caption: String,
    },
    ProclamationGroup {
        entries: Vec<ProclamationEntry>,
    },
    Scripture {
        reference: String,
        text: String,
    },
    HymnVerse {
        title: String,
        number: Option<String>,
        verse: String,
    },
    CreedPage {
        title: String,
        text: String,
    },
    InfoSharing {
        title: String,
        subtitle: Option<String>,
        chapter: Option<String>,
    },
    FamilyReportPage {
        title: String,
        items: Vec<NumberedItem>,
    },
}

/// One abstract presentation page.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slide {
    pub section: LiturgySection,
    pub kind: SlideKind,
    /// Position within the slide's group, when the group shows one.
    pub page: Option<PageCounter>,
}

impl Slide {
    pub fn new(section: LiturgySection, kind: SlideKind) -> Self {
        Self {
            section,
            kind,
            page: None,
        }
    }

    pub fn with_page(mut self, index: usize, total: usize) -> Self {
        self.page = Some(PageCounter::new(index, total));
        self
    }

    /// Accumulated reading length for proclamation group slides.
    pub fn proclamation_chars(&self) -> Option<usize> {
        match &self.kind {
            SlideKind::ProclamationGroup { entries } => {
                Some(entries.iter().map(ProclamationEntry::char_len).sum())
            }
            _ => None,
        }
    }
}

/// Stable digest of a slide sequence.
///
/// Two consumers holding decks with equal digests saw identical slides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DeckDigest(pub [u8; 16]);

const FNV_PRIME: u64 = 0x100000001b3;
const DIGEST_SEEDS: [u64; 2] = [0xcbf29ce484222325, 0x9e3779b97f4a7c15];

impl DeckDigest {
    /// Build a digest from arbitrary payload bytes.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut hasher = DigestWriter::new();
        hasher.update(bytes);
        hasher.finish()
    }
}

/// Streaming FNV-64 pair fed by a serializer.
struct DigestWriter {
    state: [u64; 2],
}

impl DigestWriter {
    fn new() -> Self {
        Self {
            state: DIGEST_SEEDS,
        }
    }

    fn update(&mut self, bytes: &[u8]) {
        for hash in &mut self.state {
            for b in bytes {
                *hash ^= *b as u64;
                *hash = hash.wrapping_mul(FNV_PRIME);
            }
        }
    }

    fn finish(&self) -> DeckDigest {
        let mut out = [0u8; 16];
        out[0..8].copy_from_slice(&self.state[0].to_le_bytes());
        out[8..16].copy_from_slice(&self.state[1].to_le_bytes());
        DeckDigest(out)
    }
}

impl std::io::Write for DigestWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl fmt::Display for DeckDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

/// Ordered slides for one program, plus what renderers need around them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub title: String,
    pub date: String,
    pub template: TemplateStyle,
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Slide> {
        self.slides.iter()
    }

    /// Index of the first slide belonging to `section`.
    pub fn first_index_of(&self, section: LiturgySection) -> Option<usize> {
        self.slides.iter().position(|s| s.section == section)
    }

    /// Contiguous index range covered by `section` (empty when absent).
    pub fn section_range(&self, section: LiturgySection) -> Range<usize> {
        let Some(start) = self.first_index_of(section) else {
            return 0..0;
        };
        let len = self.slides[start..]
            .iter()
            .take_while(|s| s.section == section)
            .count();
        start..start + len
    }

    /// Digest over the JSON encoding of the slides; title, date and
    /// template are excluded.
    pub fn digest(&self) -> DeckDigest {
        let mut hasher = DigestWriter::new();
        if let Err(err) = serde_json::to_writer(&mut hasher, &self.slides) {
            log::warn!("slide encoding failed while digesting: {}", err);
        }
        hasher.finish()
    }
}

impl<'a> IntoIterator for &'a Deck {
    type Item = &'a Slide;
    type IntoIter = core::slice::Iter<'a, Slide>;

    fn into_iter(self) -> Self::IntoIter {
        self.slides.iter()
    }
}
