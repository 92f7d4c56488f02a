//! Deterministic slide pagination for worship service programs.
//!
//! A [`WorshipProgram`] (title, date, scripture readings, hymns,
//! announcements) is turned into an ordered [`Deck`] of abstract [`Slide`]
//! records. The deck is medium-independent: the interactive previewer and the
//! file exporter in `worship-deck-render` both consume the same deck, so they
//! can never disagree about slide count or content.
//!
//! # Usage
//!
//! ```rust
//! use worship_deck::{paginate, Catalogs, WorshipProgram};
//!
//! # fn example() -> Result<(), worship_deck::DeckError> {
//! let program = WorshipProgram::from_json(
//!     r#"{
//!         "title": "Sunday Worship",
//!         "date": "2024-03-03",
//!         "fixedContent": { "apostlesCreed": "I believe===PAGE_BREAK===Amen" }
//!     }"#,
//! )?;
//! let deck = paginate(&program, &Catalogs::default())?;
//! assert_eq!(deck.len(), 8);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(
    not(test),
    deny(
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

pub mod catalog;
pub mod error;
pub mod labels;
pub mod paginate;
pub mod program;
pub mod reorder;
pub mod resolve;
pub mod segment;
pub mod slide;

pub use catalog::{Catalogs, HymnEntry, ScriptureEntry, TemplateEntry};
pub use error::DeckError;
pub use labels::{LiturgyLabels, CREED_PAGE_BREAK};
pub use paginate::{paginate, PaginationEngine, PaginationLimits, PaginationOptions};
pub use program::{
    ContentRef, FixedContent, InfoSharing, ScriptureSection, SectionKind, TemplateStyle,
    WorshipProgram,
};
pub use reorder::move_item;
pub use resolve::{
    classify, resolve_hymn, resolve_scripture, ContentSource, RefClass, ResolvedHymn,
    ResolvedScripture,
};
pub use segment::{char_len, chunk_chars, split_verses};
pub use slide::{
    Deck, DeckDigest, LiturgySection, NumberedItem, PageCounter, ProclamationEntry, Slide,
    SlideKind,
};
