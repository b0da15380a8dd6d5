use crate::{
    error::Degradation,
    parsing::inline::{InlineKind, InlineSpan, scan_inline},
};

use super::patch::{CompletionPatch, PatchReason};

/// Closers for one run of inline content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineCompletion {
    pub spans: Vec<InlineSpan>,
    pub patches: Vec<CompletionPatch>,
    pub diagnostics: Vec<Degradation>,
}

/// Completes the inline content `text`, which starts at `base` in the source.
///
/// Every patch lands on the same offset: the end of `text` with trailing
/// whitespace excluded. Patches are listed innermost first.
pub fn complete_inline(text: &str, base: usize) -> InlineCompletion {
    let scan = scan_inline(base, text);

    let patches: Vec<CompletionPatch> = scan
        .pending
        .iter()
        .map(|p| {
            log::trace!("closing {:?} opened at {} with {:?}", p.kind, p.opener, p.closer);
            CompletionPatch::new(scan.insert_at, p.closer.clone(), PatchReason::Unclosed(p.kind))
        })
        .collect();

    let diagnostics = scan
        .literal()
        .filter_map(|s| {
            let construct = match s.kind {
                InlineKind::Link | InlineKind::Image => label_or_destination(text, base, s),
                _ => return None,
            };
            Some(Degradation::MalformedConstruct {
                construct,
                offset: s.start,
            })
        })
        .collect();

    InlineCompletion {
        spans: scan.spans,
        patches,
        diagnostics,
    }
}

/// An open link either never saw its `]`, or saw `](` with nothing usable after.
fn label_or_destination(text: &str, base: usize, span: &InlineSpan) -> &'static str {
    let rest = text.get(span.start - base..).unwrap_or_default();
    if rest.contains("](") {
        "link destination"
    } else {
        "link label"
    }
}
