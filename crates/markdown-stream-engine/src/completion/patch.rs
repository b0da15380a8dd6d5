use std::fmt;

use serde::Serialize;

use crate::parsing::inline::InlineKind;

/// Why a closer was synthesized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PatchReason {
    Unclosed(InlineKind),
    UnclosedFence,
    /// The last line was part of a closing fence; it was topped up.
    PartialClosingFence,
    UnclosedMathFence,
}

impl fmt::Display for PatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatchReason::Unclosed(kind) => {
                let name = match kind {
                    InlineKind::Emphasis => "emphasis",
                    InlineKind::Strong => "strong",
                    InlineKind::StrongEmphasis => "strong emphasis",
                    InlineKind::Strikethrough => "strikethrough",
                    InlineKind::InlineCode => "inline code",
                    InlineKind::Link => "link",
                    InlineKind::Image => "image",
                    InlineKind::Autolink => "autolink",
                };
                write!(f, "unclosed {name}")
            }
            PatchReason::UnclosedFence => f.write_str("unclosed code fence"),
            PatchReason::PartialClosingFence => f.write_str("partial closing fence"),
            PatchReason::UnclosedMathFence => f.write_str("unclosed math fence"),
        }
    }
}

/// Text to insert at `offset` of the source. Patches only ever add text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionPatch {
    pub offset: usize,
    pub inserted_text: String,
    pub reason: PatchReason,
}

impl CompletionPatch {
    pub fn new(offset: usize, inserted_text: impl Into<String>, reason: PatchReason) -> Self {
        Self {
            offset,
            inserted_text: inserted_text.into(),
            reason,
        }
    }
}

/// Inserts `patches` into `text` in offset order.
///
/// Patches at the same offset keep their relative order, so an innermost
/// closer listed first is written first. A patch whose offset is past the
/// end or not on a char boundary is dropped.
pub fn apply_patches(text: &str, patches: &[CompletionPatch]) -> String {
    let mut ordered: Vec<&CompletionPatch> = patches.iter().collect();
    ordered.sort_by_key(|p| p.offset);

    let extra: usize = patches.iter().map(|p| p.inserted_text.len()).sum();
    let mut out = String::with_capacity(text.len() + extra);
    let mut at = 0;
    for p in ordered {
        if p.offset > text.len() || !text.is_char_boundary(p.offset) {
            log::debug!("dropping patch at {} ({}): outside text", p.offset, p.reason);
            continue;
        }
        out.push_str(&text[at..p.offset]);
        out.push_str(&p.inserted_text);
        at = p.offset;
    }
    out.push_str(&text[at..]);
    out
}
