use crate::parsing::blocks::{
    Block,
    kinds::{CodeFence, Fence, MathFence},
};

use super::{
    BlockCompletion,
    patch::{CompletionPatch, PatchReason},
};

/// The content's last line when it is unterminated and not the opener.
fn open_last_line(body: &str) -> Option<&str> {
    if body.ends_with('\n') {
        return None;
    }
    body.rfind('\n').map(|i| &body[i + 1..])
}

fn newline_before(body: &str) -> &'static str {
    if body.ends_with('\n') { "" } else { "\n" }
}

/// Closes a code fence that has not seen its closing line.
pub fn complete_code_fence(text: &str, block: &Block, fence: Fence) -> BlockCompletion {
    let body = block.content.slice(text);
    let end = block.span.end;

    let patch = match open_last_line(body).and_then(|l| CodeFence::partial_closer(fence, l)) {
        Some(have) => {
            let missing = (fence.kind.as_byte() as char)
                .to_string()
                .repeat(fence.len - have);
            CompletionPatch::new(end, missing, PatchReason::PartialClosingFence)
        }
        None => CompletionPatch::new(
            end,
            format!("{}{}", newline_before(body), fence.closer()),
            PatchReason::UnclosedFence,
        ),
    };
    BlockCompletion::patched(vec![patch])
}

/// Closes a `$$` block.
pub fn complete_math_fence(text: &str, block: &Block) -> BlockCompletion {
    let body = block.content.slice(text);
    let end = block.span.end;

    let inserted = if open_last_line(body).is_some_and(MathFence::partial_closer) {
        "$".to_string()
    } else {
        format!("{}{}", newline_before(body), MathFence::DELIM)
    };
    BlockCompletion::patched(vec![CompletionPatch::new(
        end,
        inserted,
        PatchReason::UnclosedMathFence,
    )])
}
