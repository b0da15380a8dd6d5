use serde::Serialize;

/// Inline constructs the completion engine tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InlineKind {
    Emphasis,
    Strong,
    /// `***`: strong emphasis closed by a single marker run.
    StrongEmphasis,
    Strikethrough,
    InlineCode,
    Link,
    Image,
    Autolink,
}

/// An inline construct found in a block's content.
///
/// `close_marker` is the text that closes the construct. For a construct
/// that was open at the end of the content it is the synthesized closer, and
/// `None` means the construct renders literally until more text arrives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineSpan {
    pub kind: InlineKind,
    /// Absolute byte offset of the opening marker.
    pub start: usize,
    pub open_marker: String,
    pub close_marker: Option<String>,
    pub complete: bool,
}

impl InlineSpan {
    pub(crate) fn closed(kind: InlineKind, start: usize, open: &str, close: &str) -> Self {
        Self {
            kind,
            start,
            open_marker: open.to_string(),
            close_marker: Some(close.to_string()),
            complete: true,
        }
    }

    pub(crate) fn open(kind: InlineKind, start: usize, open: &str, close: Option<String>) -> Self {
        Self {
            kind,
            start,
            open_marker: open.to_string(),
            close_marker: close,
            complete: false,
        }
    }

    /// Open at the end of the content with a closer available.
    pub fn is_completable(&self) -> bool {
        !self.complete && self.close_marker.is_some()
    }
}

/// A closer the content still needs, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingClose {
    pub kind: InlineKind,
    /// Absolute offset of the opener being closed.
    pub opener: usize,
    pub closer: String,
}

/// Result of analysing one run of inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineScan {
    /// Every construct seen, ordered by start offset.
    pub spans: Vec<InlineSpan>,
    /// Closers to append, in the order they must be written.
    pub pending: Vec<PendingClose>,
    /// Absolute offset where closers go: the end of the content with
    /// trailing whitespace excluded.
    pub insert_at: usize,
}

impl InlineScan {
    /// Constructs left open that cannot be closed yet.
    pub fn literal(&self) -> impl Iterator<Item = &InlineSpan> {
        self.spans
            .iter()
            .filter(|s| !s.complete && s.close_marker.is_none())
    }
}
