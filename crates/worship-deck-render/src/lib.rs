//! Slide composition, interactive preview, and file export for `worship-deck`.
//!
//! Both renderers consume a [`worship_deck::Deck`] and lay every slide out
//! through [`compose_slide`], so the preview and the exported file always
//! agree on slide count and per-slide text.

#![cfg_attr(
    not(test),
    deny(
        clippy::disallowed_methods,
        clippy::expect_used,
        clippy::unwrap_used,
        clippy::panic,
        clippy::panic_in_result_fn,
        clippy::todo,
        clippy::unimplemented
    )
)]

mod export;
mod preview;
mod render_ir;

pub use export::{
    artifact_base_name, ArtifactWriter, ExportError, ExportPage, ExportRenderer, ExportReport,
    FileArtifactWriter,
};
pub use preview::PreviewSession;
pub use render_ir::{
    compose_slide, Background, LineRole, PageStyle, SlideFrame, SlideLine, SlideRenderer,
    TextEmphasis, OVERLAY_TRANSPARENCY_PERCENT, TEXT_COLOR,
};
pub use worship_deck::{Deck, LiturgyLabels, LiturgySection, Slide};
