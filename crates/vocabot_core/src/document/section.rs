//! Vocabulary section renderer and marker parser.

use crate::model::record::ArchiveRecord;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub const START_MARKER: &str = "<!-- VOCAB_START -->";
pub const END_MARKER: &str = "<!-- VOCAB_END -->";
pub const DEFAULT_STATUS_LINE: &str = "Learning for Japan 2027 🇯🇵";

/// Separator between a marker and the rendered block, on both sides.
const REGION_PADDING: &str = "\n\n";

/// Marker layouts that cannot be spliced safely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedDocument {
    MissingStartMarker,
    MissingEndMarker,
    MarkersOutOfOrder,
    DuplicateMarkers {
        start_markers: usize,
        end_markers: usize,
    },
}

impl Display for MalformedDocument {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingStartMarker => {
                write!(f, "found `{END_MARKER}` without `{START_MARKER}`")
            }
            Self::MissingEndMarker => {
                write!(f, "found `{START_MARKER}` without `{END_MARKER}`")
            }
            Self::MarkersOutOfOrder => {
                write!(f, "`{END_MARKER}` appears before `{START_MARKER}`")
            }
            Self::DuplicateMarkers {
                start_markers,
                end_markers,
            } => write!(
                f,
                "expected one marker pair, found {start_markers} start and {end_markers} end markers"
            ),
        }
    }
}

impl Error for MalformedDocument {}

/// Machine-owned block placed between the markers.
#[derive(Debug, Clone, Copy)]
pub struct StatusSection<'a> {
    pub status_line: &'a str,
    pub total: usize,
    pub record: &'a ArchiveRecord,
}

impl StatusSection<'_> {
    /// Renders the block without surrounding blank lines.
    pub fn render(&self) -> String {
        format!(
            "**Current Status:** {status}\n\
             **Total Words Archived:** {total}\n\
             \n\
             ## 📅 Word of the Day: {date}\n\
             \n\
             | Kanji | Reading | Meaning |\n\
             |-------|---------|---------|\n\
             | **{word}** | {reading} | {meaning} |",
            status = inline_text(self.status_line),
            total = self.total,
            date = self.record.date,
            word = table_cell(&self.record.word),
            reading = table_cell(&self.record.reading),
            meaning = table_cell(&self.record.meaning),
        )
    }
}

/// Byte offsets of the text strictly between the two markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MarkerRegion {
    inner_start: usize,
    inner_end: usize,
}

fn locate_region(text: &str) -> Result<Option<MarkerRegion>, MalformedDocument> {
    let starts: Vec<usize> = text.match_indices(START_MARKER).map(|(at, _)| at).collect();
    let ends: Vec<usize> = text.match_indices(END_MARKER).map(|(at, _)| at).collect();

    match (starts.as_slice(), ends.as_slice()) {
        ([], []) => Ok(None),
        ([start], [end]) => {
            let inner_start = start + START_MARKER.len();
            if *end < inner_start {
                return Err(MalformedDocument::MarkersOutOfOrder);
            }
            Ok(Some(MarkerRegion {
                inner_start,
                inner_end: *end,
            }))
        }
        ([], [_]) => Err(MalformedDocument::MissingStartMarker),
        ([_], []) => Err(MalformedDocument::MissingEndMarker),
        (starts, ends) => Err(MalformedDocument::DuplicateMarkers {
            start_markers: starts.len(),
            end_markers: ends.len(),
        }),
    }
}

/// Places `rendered` into the marker region of `existing`.
///
/// # Contract
/// - `None` yields a document holding only the marker pair and block.
/// - A document with no markers gets the pair appended after its content.
/// - A document with one well-ordered pair has only its region replaced.
///
/// # Errors
/// - `MalformedDocument` for any other marker layout.
pub fn splice_section(
    existing: Option<&str>,
    rendered: &str,
) -> Result<String, MalformedDocument> {
    let region = format!("{REGION_PADDING}{rendered}{REGION_PADDING}");

    let Some(text) = existing else {
        return Ok(format!("{START_MARKER}{region}{END_MARKER}"));
    };

    match locate_region(text)? {
        Some(found) => {
            let mut out = String::with_capacity(text.len() + region.len());
            out.push_str(&text[..found.inner_start]);
            out.push_str(&region);
            out.push_str(&text[found.inner_end..]);
            Ok(out)
        }
        None => Ok(format!(
            "{text}{REGION_PADDING}{START_MARKER}{region}{END_MARKER}"
        )),
    }
}

/// Renders the section for `record` and splices it into `existing`.
pub fn update_document(
    existing: Option<&str>,
    record: &ArchiveRecord,
    total: usize,
    status_line: &str,
) -> Result<String, MalformedDocument> {
    let rendered = StatusSection {
        status_line,
        total,
        record,
    }
    .render();
    splice_section(existing, &rendered)
}

/// Keeps inserted text from opening an HTML comment, so it can never
/// introduce a second marker into the region.
fn inline_text(value: &str) -> String {
    value.replace("<!--", "&lt;!--")
}

fn table_cell(value: &str) -> String {
    inline_text(value)
        .replace(['\r', '\n'], " ")
        .replace('|', "\\|")
}
