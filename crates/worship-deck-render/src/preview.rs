use core::convert::Infallible;

use worship_deck::{Deck, LiturgyLabels, LiturgySection, Slide};

use crate::render_ir::{compose_slide, PageStyle, SlideFrame, SlideRenderer};

/// Interactive slide previewer.
///
/// Holds the current deck and a cursor. Navigation clamps at both ends and
/// never wraps. Loading a new deck (after any content edit) keeps the cursor
/// where it was when possible and clamps it otherwise.
#[derive(Clone, Debug)]
pub struct PreviewSession {
    deck: Option<Deck>,
    style: Option<PageStyle>,
    labels: LiturgyLabels,
    cursor: usize,
}

impl Default for PreviewSession {
    fn default() -> Self {
        Self::new(LiturgyLabels::default())
    }
}

impl PreviewSession {
    pub fn new(labels: LiturgyLabels) -> Self {
        Self {
            deck: None,
            style: None,
            labels,
            cursor: 0,
        }
    }

    /// Replace the slide list, re-clamping the cursor.
    pub fn load(&mut self, deck: Deck) {
        self.style = Some(PageStyle::from_template(&deck.template));
        let len = deck.len();
        if self.cursor >= len {
            let clamped = len.saturating_sub(1);
            log::debug!(
                "preview cursor {} clamped to {} after deck shrank to {} slides",
                self.cursor,
                clamped,
                len
            );
            self.cursor = clamped;
        }
        self.deck = Some(deck);
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    /// Number of slides in the loaded deck.
    pub fn len(&self) -> usize {
        self.deck.as_ref().map_or(0, Deck::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 0-based index of the current slide.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> Option<&Slide> {
        self.deck.as_ref()?.get(self.cursor)
    }

    /// Advance one slide. Returns `false` at the last slide.
    pub fn next_slide(&mut self) -> bool {
        if self.cursor + 1 < self.len() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Go back one slide. Returns `false` at the first slide.
    pub fn prev_slide(&mut self) -> bool {
        if self.cursor > 0 && !self.is_empty() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    pub fn is_first(&self) -> bool {
        self.cursor == 0
    }

    pub fn is_last(&self) -> bool {
        self.cursor + 1 >= self.len()
    }

    /// Jump to `index`. Out-of-range indices leave the cursor unchanged.
    pub fn jump_to(&mut self, index: usize) -> bool {
        if index < self.len() {
            self.cursor = index;
            true
        } else {
            false
        }
    }

    /// Jump to the first slide of `section`, if the deck has one.
    pub fn jump_to_section(&mut self, section: LiturgySection) -> bool {
        match self.deck.as_ref().and_then(|d| d.first_index_of(section)) {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }

    /// Compose the slide under the cursor.
    pub fn current_frame(&self) -> Option<SlideFrame> {
        self.frame_at(self.cursor)
    }

    /// Compose any slide of the loaded deck.
    pub fn frame_at(&self, index: usize) -> Option<SlideFrame> {
        let deck = self.deck.as_ref()?;
        let slide = deck.get(index)?;
        Some(SlideFrame {
            index,
            count: deck.len(),
            style: self.style.clone()?,
            lines: compose_slide(slide, &self.labels),
        })
    }

    /// Position indicator, e.g. `"3 / 17"`; `"0 / 0"` when nothing is loaded.
    pub fn status_line(&self) -> String {
        if self.is_empty() {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.cursor + 1, self.len())
    }
}

impl SlideRenderer for PreviewSession {
    type Output = Option<SlideFrame>;
    type Error = Infallible;

    /// Load `deck` and return the frame under the (re-clamped) cursor.
    fn render(&mut self, deck: &Deck) -> Result<Self::Output, Self::Error> {
        self.load(deck.clone());
        Ok(self.current_frame())
    }
}
