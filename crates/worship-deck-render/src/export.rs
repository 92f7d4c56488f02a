use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use worship_deck::{Deck, DeckDigest, LiturgyLabels, LiturgySection};

use crate::render_ir::{compose_slide, PageStyle, SlideLine, SlideRenderer};

const ARTIFACT_SCHEMA_VERSION: u8 = 1;
const ARTIFACT_EXTENSION: &str = "deck.json";
const DEFAULT_MAX_FILE_BYTES: usize = 16 * 1024 * 1024;
static ARTIFACT_WRITE_NONCE: AtomicUsize = AtomicUsize::new(0);

/// Base file name for an exported deck: `"{title}-{date}"` with every run of
/// whitespace in the title replaced by a single `-`.
pub fn artifact_base_name(title: &str, date: &str) -> String {
    let dashed = title.split_whitespace().collect::<Vec<_>>().join("-");
    let leading = if title.starts_with(char::is_whitespace) {
        "-"
    } else {
        ""
    };
    let trailing = if title.ends_with(char::is_whitespace) && !dashed.is_empty() {
        "-"
    } else {
        ""
    };
    format!("{leading}{dashed}{trailing}-{date}")
}

/// One static output page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPage {
    /// 1-based page number.
    pub page_number: usize,
    pub section: LiturgySection,
    pub style: PageStyle,
    pub lines: Vec<SlideLine>,
}

/// Sink that turns finished pages into a named artifact.
///
/// Implementations must not leave a partial artifact behind on failure.
pub trait ArtifactWriter {
    /// Write `pages` as the artifact `name`, returning where it landed.
    fn write_artifact(&mut self, name: &str, pages: &[ExportPage]) -> io::Result<PathBuf>;
}

/// Result of a successful export.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportReport {
    pub name: String,
    pub path: PathBuf,
    pub page_count: usize,
    /// Digest of the deck the pages were built from.
    pub digest: DeckDigest,
}

/// Export failure. The only failure point is the artifact write.
#[derive(Debug)]
pub enum ExportError {
    ExportFailed { artifact: String, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExportFailed { artifact, source } => {
                write!(f, "export of '{}' failed: {}", artifact, source)
            }
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ExportFailed { source, .. } => Some(source),
        }
    }
}

/// Stateless single-pass exporter.
#[derive(Clone, Debug)]
pub struct ExportRenderer<W> {
    writer: W,
    labels: LiturgyLabels,
}

impl<W: ArtifactWriter> ExportRenderer<W> {
    pub fn new(writer: W) -> Self {
        Self::with_labels(writer, LiturgyLabels::default())
    }

    pub fn with_labels(writer: W, labels: LiturgyLabels) -> Self {
        Self { writer, labels }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Build one page per slide, in deck order.
    pub fn pages(&self, deck: &Deck) -> Vec<ExportPage> {
        let style = PageStyle::from_template(&deck.template);
        deck.iter()
            .enumerate()
            .map(|(idx, slide)| ExportPage {
                page_number: idx + 1,
                section: slide.section,
                style: style.clone(),
                lines: compose_slide(slide, &self.labels),
            })
            .collect()
    }

    /// Build every page and finalize the artifact.
    pub fn export(&mut self, deck: &Deck) -> Result<ExportReport, ExportError> {
        let name = artifact_base_name(&deck.title, &deck.date);
        let pages = self.pages(deck);
        match self.writer.write_artifact(&name, &pages) {
            Ok(path) => {
                log::info!("exported {} pages to {}", pages.len(), path.display());
                Ok(ExportReport {
                    name,
                    path,
                    page_count: pages.len(),
                    digest: deck.digest(),
                })
            }
            Err(source) => {
                log::warn!("export of '{}' failed: {}", name, source);
                Err(ExportError::ExportFailed {
                    artifact: name,
                    source,
                })
            }
        }
    }
}

impl<W: ArtifactWriter> SlideRenderer for ExportRenderer<W> {
    type Output = ExportReport;
    type Error = ExportError;

    fn render(&mut self, deck: &Deck) -> Result<Self::Output, Self::Error> {
        self.export(deck)
    }
}

/// File-backed artifact writer.
///
/// Artifacts land at `<dir>/<name>.deck.json` as a versioned JSON envelope.
/// Writes go to a uniquely named temp file that is synced and then renamed
/// into place, so readers only ever see a complete artifact. Any failure
/// removes the temp file.
#[derive(Clone, Debug)]
pub struct FileArtifactWriter {
    dir: PathBuf,
    max_file_bytes: usize,
}

impl FileArtifactWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_file_bytes: DEFAULT_MAX_FILE_BYTES,
        }
    }

    /// Set the maximum artifact size in bytes.
    ///
    /// Values of `0` are treated as `1` to keep the cap explicit.
    pub fn with_max_file_bytes(mut self, max_file_bytes: usize) -> Self {
        self.max_file_bytes = max_file_bytes.max(1);
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn max_file_bytes(&self) -> usize {
        self.max_file_bytes
    }

    /// Final path for artifact `name`.
    ///
    /// Path separators and characters that are not valid in file names are
    /// replaced with `-`, so the artifact always lands directly in `dir`.
    pub fn artifact_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", file_stem(name), ARTIFACT_EXTENSION))
    }

    /// Decode an artifact previously written by this writer.
    pub fn read_artifact(path: &Path) -> io::Result<Vec<ExportPage>> {
        let payload = fs::read(path)?;
        let envelope: ArtifactEnvelope = serde_json::from_slice(&payload)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        if envelope.version != ARTIFACT_SCHEMA_VERSION {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("unsupported artifact version {}", envelope.version),
            ));
        }
        Ok(envelope.pages)
    }

    fn write_temp(&self, temp_path: &Path, envelope: &ArtifactEnvelopeRef<'_>) -> io::Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)?;
        let mut writer = CappedWriter::new(BufWriter::new(file), self.max_file_bytes);
        serde_json::to_writer(&mut writer, envelope).map_err(io::Error::from)?;
        writer.flush()?;
        let file = writer.into_inner().into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    }
}

impl ArtifactWriter for FileArtifactWriter {
    fn write_artifact(&mut self, name: &str, pages: &[ExportPage]) -> io::Result<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let final_path = self.artifact_path(name);
        let nonce = ARTIFACT_WRITE_NONCE.fetch_add(1, Ordering::Relaxed);
        let temp_path = self.dir.join(format!(
            ".{}.{}.tmp-{}-{}",
            file_stem(name),
            ARTIFACT_EXTENSION,
            std::process::id(),
            nonce
        ));

        let envelope = ArtifactEnvelopeRef {
            version: ARTIFACT_SCHEMA_VERSION,
            name,
            pages,
        };
        if let Err(err) = self.write_temp(&temp_path, &envelope) {
            remove_file_quiet(&temp_path);
            return Err(err);
        }
        if let Err(err) = fs::rename(&temp_path, &final_path) {
            remove_file_quiet(&temp_path);
            return Err(err);
        }
        sync_directory(&self.dir);
        Ok(final_path)
    }
}

#[derive(Serialize)]
struct ArtifactEnvelopeRef<'a> {
    version: u8,
    name: &'a str,
    pages: &'a [ExportPage],
}

#[derive(Deserialize)]
struct ArtifactEnvelope {
    version: u8,
    pages: Vec<ExportPage>,
}

fn file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect()
}

fn remove_file_quiet(path: &Path) {
    let _ = fs::remove_file(path);
}

fn sync_directory(path: &Path) {
    if let Ok(dir) = File::open(path) {
        let _ = dir.sync_all();
    }
}

struct CappedWriter<W> {
    inner: W,
    max_bytes: usize,
    written: usize,
}

impl<W> CappedWriter<W> {
    fn new(inner: W, max_bytes: usize) -> Self {
        Self {
            inner,
            max_bytes: max_bytes.max(1),
            written: 0,
        }
    }

    fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CappedWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let remaining = self.max_bytes.saturating_sub(self.written);
        if buf.len() > remaining {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "artifact exceeds max_file_bytes",
            ));
        }
        self.inner.write_all(buf)?;
        self.written = self.written.saturating_add(buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use worship_deck::{Slide, SlideKind, TemplateStyle};

    fn temp_dir(label: &str) -> PathBuf {
        static NONCE: AtomicUsize = AtomicUsize::new(0);
        let nonce = NONCE.fetch_add(1, Ordering::Relaxed);
        std::env::temp_dir().join(format!(
            "worship-deck-export-{}-{}-{}",
            label,
            std::process::id(),
            nonce
        ))
    }

    fn sample_deck() -> Deck {
        Deck {
            title: "Sunday  Service".into(),
            date: "2024-05-05".into(),
            template: TemplateStyle::default(),
            slides: vec![
                Slide::new(
                    LiturgySection::Title,
                    SlideKind::Title {
                        title: "Sunday  Service".into(),
                        date: "2024-05-05".into(),
                    },
                ),
                Slide::new(
                    LiturgySection::Benediction,
                    SlideKind::SectionTitle {
                        caption: "Benediction".into(),
                    },
                ),
            ],
        }
    }

    struct FailingWriter;

    impl ArtifactWriter for FailingWriter {
        fn write_artifact(&mut self, _name: &str, _pages: &[ExportPage]) -> io::Result<PathBuf> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn dir_entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .map(|rd| {
                rd.filter_map(Result::ok)
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }

    #[test]
    fn artifact_name_collapses_whitespace_runs() {
        assert_eq!(
            artifact_base_name("Sunday  Morning\tService", "2024-05-05"),
            "Sunday-Morning-Service-2024-05-05"
        );
        assert_eq!(artifact_base_name(" Lord's Day ", "d"), "-Lord's-Day--d");
        assert_eq!(artifact_base_name("主日 崇拜", "2024-01-07"), "主日-崇拜-2024-01-07");
    }

    #[test]
    fn pages_are_numbered_in_deck_order() {
        let renderer = ExportRenderer::new(FailingWriter);
        let pages = renderer.pages(&sample_deck());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].page_number, 1);
        assert_eq!(pages[1].page_number, 2);
        assert_eq!(pages[1].section, LiturgySection::Benediction);
        assert_eq!(pages[0].style, pages[1].style);
    }

    #[test]
    fn file_writer_round_trips_pages() {
        let dir = temp_dir("round-trip");
        let mut renderer = ExportRenderer::new(FileArtifactWriter::new(&dir));
        let deck = sample_deck();
        let report = renderer.render(&deck).expect("export should succeed");
        assert_eq!(report.name, "Sunday-Service-2024-05-05");
        assert_eq!(report.page_count, 2);
        assert_eq!(report.digest, deck.digest());
        assert_eq!(
            report.path,
            dir.join("Sunday-Service-2024-05-05.deck.json")
        );

        let pages = FileArtifactWriter::read_artifact(&report.path).expect("artifact decodes");
        assert_eq!(pages, renderer.pages(&deck));
        assert_eq!(dir_entries(&dir), vec!["Sunday-Service-2024-05-05.deck.json"]);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn title_with_separators_stays_inside_dir() {
        let dir = temp_dir("separators");
        let mut renderer = ExportRenderer::new(FileArtifactWriter::new(&dir));
        let mut deck = sample_deck();
        deck.title = "Advent 1/2".into();
        deck.date = "2024-12-01".into();
        let report = renderer.export(&deck).expect("slash in title exports");
        assert_eq!(report.name, "Advent-1/2-2024-12-01");
        assert_eq!(report.path, dir.join("Advent-1-2-2024-12-01.deck.json"));
        assert_eq!(
            FileArtifactWriter::read_artifact(&report.path).expect("artifact decodes"),
            renderer.pages(&deck)
        );

        deck.title = "../..\\escape: a|b".into();
        let report = renderer.export(&deck).expect("dotted title exports");
        assert_eq!(report.path.parent(), Some(dir.as_path()));
        assert_eq!(
            dir_entries(&dir),
            vec![
                "..-..-escape--a-b-2024-12-01.deck.json",
                "Advent-1-2-2024-12-01.deck.json"
            ]
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn byte_cap_failure_leaves_no_artifact() {
        let dir = temp_dir("capped");
        let writer = FileArtifactWriter::new(&dir).with_max_file_bytes(16);
        let mut renderer = ExportRenderer::new(writer);
        let err = renderer.export(&sample_deck()).expect_err("cap should trip");
        match &err {
            ExportError::ExportFailed { artifact, source } => {
                assert_eq!(artifact, "Sunday-Service-2024-05-05");
                assert_eq!(source.kind(), io::ErrorKind::InvalidData);
            }
        }
        assert!(std::error::Error::source(&err).is_some());
        assert!(dir_entries(&dir).is_empty());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn writer_failure_maps_to_export_failed() {
        let mut renderer = ExportRenderer::new(FailingWriter);
        let err = renderer.export(&sample_deck()).expect_err("writer fails");
        assert!(err.to_string().contains("read-only"));
        assert!(err.to_string().contains("Sunday-Service-2024-05-05"));
    }

    #[test]
    fn zero_byte_cap_is_clamped() {
        let writer = FileArtifactWriter::new(temp_dir("clamp")).with_max_file_bytes(0);
        assert_eq!(writer.max_file_bytes(), 1);
    }

    #[test]
    fn rejects_unknown_envelope_version() {
        let dir = temp_dir("version");
        fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("old.deck.json");
        fs::write(&path, br#"{"version":99,"name":"old","pages":[]}"#).expect("write");
        let err = FileArtifactWriter::read_artifact(&path).expect_err("version mismatch");
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        let _ = fs::remove_dir_all(&dir);
    }
}
