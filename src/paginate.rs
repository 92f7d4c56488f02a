//! Content-to-slide pagination engine.
//!
//! One pass turns a [`WorshipProgram`] into a [`Deck`]. The pass is pure:
//! the same program, catalogs and options always produce the same deck, and
//! both renderers consume that deck instead of paginating on their own.
//!
//! Slide order:
//!
//! 1. title, "Prelude" caption, "Proclamation" caption
//! 2. proclamation groups (character budget, leader/congregation pairing)
//! 3. first hymn, every linking scripture, second hymn, third hymn
//! 4. creed (always two pages), info sharing
//! 5. response hymn, family report pages (item budget), sending hymn
//! 6. "Benediction" caption, "Dismissal" caption

use smallvec::SmallVec;

use crate::catalog::Catalogs;
use crate::error::DeckError;
use crate::labels::{LiturgyLabels, CREED_PAGE_BREAK};
use crate::program::{ContentRef, SectionKind, WorshipProgram};
use crate::resolve::{resolve_hymn, resolve_scripture};
use crate::segment::{chunk_chars, split_verses};
use crate::slide::{Deck, LiturgySection, NumberedItem, ProclamationEntry, Slide, SlideKind};

/// Per-slide budgets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationLimits {
    /// Maximum accumulated reading characters on one proclamation slide.
    pub max_proclamation_chars: usize,
    /// Maximum items on one family report slide.
    pub max_family_items: usize,
}

impl Default for PaginationLimits {
    fn default() -> Self {
        Self {
            max_proclamation_chars: 200,
            max_family_items: 5,
        }
    }
}

impl PaginationLimits {
    /// Copy with zero budgets raised to one.
    pub fn normalized(self) -> Self {
        Self {
            max_proclamation_chars: self.max_proclamation_chars.max(1),
            max_family_items: self.max_family_items.max(1),
        }
    }
}

/// Pagination options.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PaginationOptions {
    pub limits: PaginationLimits,
    pub labels: LiturgyLabels,
}

impl PaginationOptions {
    /// Default budgets with the given captions.
    pub fn with_labels(labels: LiturgyLabels) -> Self {
        Self {
            limits: PaginationLimits::default(),
            labels,
        }
    }
}

/// Paginate with default options.
pub fn paginate(program: &WorshipProgram, catalogs: &Catalogs) -> Result<Deck, DeckError> {
    PaginationEngine::default().paginate(program, catalogs)
}

/// Pagination engine.
#[derive(Clone, Debug, Default)]
pub struct PaginationEngine {
    limits: PaginationLimits,
    labels: LiturgyLabels,
}

impl PaginationEngine {
    pub fn new(opts: PaginationOptions) -> Self {
        Self {
            limits: opts.limits.normalized(),
            labels: opts.labels,
        }
    }

    pub fn limits(&self) -> PaginationLimits {
        self.limits
    }

    pub fn labels(&self) -> &LiturgyLabels {
        &self.labels
    }

    /// Produce the full deck for `program`.
    ///
    /// Fails only when the creed text does not hold exactly one page-break
    /// marker.
    pub fn paginate(
        &self,
        program: &WorshipProgram,
        catalogs: &Catalogs,
    ) -> Result<Deck, DeckError> {
        let creed = split_creed(&program.fixed_content.apostles_creed)?;
        let labels = &self.labels;
        let mut slides = Vec::with_capacity(32);

        slides.push(Slide::new(
            LiturgySection::Title,
            SlideKind::Title {
                title: program.title.clone(),
                date: program.date.clone(),
            },
        ));
        slides.push(caption_slide(LiturgySection::Prelude, &labels.prelude));
        slides.push(caption_slide(
            LiturgySection::ProclamationCaption,
            &labels.proclamation,
        ));

        let entries = self.resolve_proclamation(program, catalogs);
        slides.extend(
            paginate_proclamation(&entries, self.limits.max_proclamation_chars)
                .into_iter()
                .map(|entries| {
                    Slide::new(
                        LiturgySection::Proclamation,
                        SlideKind::ProclamationGroup { entries },
                    )
                }),
        );

        self.push_hymn(
            &mut slides,
            LiturgySection::FirstHymn,
            program.first_hymn.as_ref(),
            catalogs,
        );
        for (idx, value) in program.linking_scriptures.iter().enumerate() {
            if let Some(scripture) = resolve_scripture(value.as_str(), catalogs, labels) {
                if scripture.text.is_empty() {
                    continue;
                }
                slides.push(Slide::new(
                    LiturgySection::LinkingScripture(idx),
                    SlideKind::Scripture {
                        reference: scripture.reference,
                        text: scripture.text,
                    },
                ));
            }
        }
        self.push_hymn(
            &mut slides,
            LiturgySection::SecondHymn,
            program.second_hymn.as_ref(),
            catalogs,
        );
        self.push_hymn(
            &mut slides,
            LiturgySection::ThirdHymn,
            program.third_hymn.as_ref(),
            catalogs,
        );

        for (idx, part) in creed.iter().enumerate() {
            slides.push(
                Slide::new(
                    LiturgySection::Creed,
                    SlideKind::CreedPage {
                        title: labels.creed_title.clone(),
                        text: (*part).to_string(),
                    },
                )
                .with_page(idx + 1, creed.len()),
            );
        }

        let info = &program.info_sharing;
        slides.push(Slide::new(
            LiturgySection::InfoSharing,
            SlideKind::InfoSharing {
                title: info.title.clone(),
                subtitle: non_empty(info.subtitle.as_deref()),
                chapter: non_empty(info.chapter.as_deref()),
            },
        ));

        self.push_hymn(
            &mut slides,
            LiturgySection::ResponseHymn,
            program.response_hymn.as_ref(),
            catalogs,
        );
        self.push_family_report(&mut slides, &program.family_report_items);
        self.push_hymn(
            &mut slides,
            LiturgySection::SendingHymn,
            program.sending_hymn.as_ref(),
            catalogs,
        );

        slides.push(caption_slide(LiturgySection::Benediction, &labels.benediction));
        slides.push(caption_slide(LiturgySection::Dismissal, &labels.dismissal));

        log::debug!(
            "paginated '{}' ({}): {} slides",
            program.title,
            program.date,
            slides.len()
        );

        Ok(Deck {
            title: program.title.clone(),
            date: program.date.clone(),
            template: program.template.clone(),
            slides,
        })
    }

    fn resolve_proclamation(
        &self,
        program: &WorshipProgram,
        catalogs: &Catalogs,
    ) -> Vec<ProclamationEntry> {
        program
            .proclamation
            .iter()
            .filter_map(|section| {
                let resolved = resolve_scripture(section.content.as_str(), catalogs, &self.labels)?;
                if resolved.text.is_empty() {
                    return None;
                }
                Some(ProclamationEntry::new(section.kind, resolved.text))
            })
            .collect()
    }

    fn push_hymn(
        &self,
        slides: &mut Vec<Slide>,
        section: LiturgySection,
        value: Option<&ContentRef>,
        catalogs: &Catalogs,
    ) {
        let Some(hymn) = value.and_then(|v| resolve_hymn(v.as_str(), catalogs, &self.labels))
        else {
            return;
        };
        let verses = split_verses(&hymn.lyrics);
        let total = verses.len();
        for (idx, verse) in verses.into_iter().enumerate() {
            slides.push(
                Slide::new(
                    section,
                    SlideKind::HymnVerse {
                        title: hymn.title.clone(),
                        number: hymn.number.clone(),
                        verse: verse.to_string(),
                    },
                )
                .with_page(idx + 1, total),
            );
        }
    }

    fn push_family_report(&self, slides: &mut Vec<Slide>, items: &[String]) {
        let numbered: Vec<NumberedItem> = items
            .iter()
            .filter(|item| !item.is_empty())
            .enumerate()
            .map(|(idx, text)| NumberedItem {
                number: idx + 1,
                text: text.clone(),
            })
            .collect();
        if numbered.is_empty() {
            return;
        }

        let batches: Vec<&[NumberedItem]> =
            numbered.chunks(self.limits.max_family_items).collect();
        let total = batches.len();
        for (idx, batch) in batches.into_iter().enumerate() {
            let slide = Slide::new(
                LiturgySection::FamilyReport,
                SlideKind::FamilyReportPage {
                    title: self.labels.family_report_title.clone(),
                    items: batch.to_vec(),
                },
            );
            slides.push(if total > 1 {
                slide.with_page(idx + 1, total)
            } else {
                slide
            });
        }
    }
}

/// Group resolved proclamation readings into slides.
///
/// Walks `entries` in order with one accumulator:
///
/// - a leader reading immediately followed by a congregation reading is an
///   atomic pair; the accumulator is flushed first when it already holds
///   content and the pair would push it past `max_chars`;
/// - any other reading longer than `max_chars` flushes the accumulator and is
///   cut into `max_chars` chunks, one slide each;
/// - a reading that does not fit the remaining room flushes first.
///
/// A pair longer than `max_chars` on its own still shares one slide.
pub fn paginate_proclamation(
    entries: &[ProclamationEntry],
    max_chars: usize,
) -> Vec<Vec<ProclamationEntry>> {
    let max_chars = max_chars.max(1);
    let mut acc = Accumulator::default();
    let mut out = Vec::with_capacity(entries.len());
    let mut i = 0;

    while i < entries.len() {
        let entry = &entries[i];
        let len = entry.char_len();
        let paired = entry.kind == SectionKind::Leader
            && entries
                .get(i + 1)
                .is_some_and(|next| next.kind == SectionKind::Congregation);

        if paired {
            let next = &entries[i + 1];
            let pair_len = len + next.char_len();
            if !acc.is_empty() && acc.len + pair_len > max_chars {
                acc.flush_into(&mut out);
            }
            if pair_len > max_chars {
                log::warn!(
                    "leader/congregation pair of {} chars exceeds slide budget {}",
                    pair_len,
                    max_chars
                );
            }
            acc.push(entry.clone(), len);
            acc.push(next.clone(), next.char_len());
            i += 2;
            continue;
        }

        if len > max_chars {
            acc.flush_into(&mut out);
            for chunk in chunk_chars(&entry.text, max_chars) {
                out.push(vec![ProclamationEntry::new(entry.kind, chunk)]);
            }
        } else {
            if !acc.is_empty() && acc.len + len > max_chars {
                acc.flush_into(&mut out);
            }
            acc.push(entry.clone(), len);
        }
        i += 1;
    }
    acc.flush_into(&mut out);
    out
}

#[derive(Default)]
struct Accumulator {
    entries: SmallVec<[ProclamationEntry; 4]>,
    len: usize,
}

impl Accumulator {
    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn push(&mut self, entry: ProclamationEntry, len: usize) {
        self.entries.push(entry);
        self.len += len;
    }

    fn flush_into(&mut self, out: &mut Vec<Vec<ProclamationEntry>>) {
        if self.entries.is_empty() {
            return;
        }
        log::trace!(
            "proclamation slide {}: {} entries, {} chars",
            out.len() + 1,
            self.entries.len(),
            self.len
        );
        out.push(core::mem::take(&mut self.entries).into_vec());
        self.len = 0;
    }
}

fn split_creed(text: &str) -> Result<[&str; 2], DeckError> {
    let found = text.matches(CREED_PAGE_BREAK).count();
    match text.split_once(CREED_PAGE_BREAK) {
        Some((first, second)) if found == 1 => Ok([first, second]),
        _ => Err(DeckError::WrongMarkerCount { found }),
    }
}

fn caption_slide(section: LiturgySection, caption: &str) -> Slide {
    Slide::new(
        section,
        SlideKind::SectionTitle {
            caption: caption.to_string(),
        },
    )
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
