use std::fmt::Write;

use crate::{
    sanitize::{Outcome, SanitizationDecision},
    tree::{Node, RenderBlock, RenderTree},
};

/// A stable, line-per-item text outline of a render tree.
///
/// Blocks with their patches and nodes come first, then sanitization
/// decisions, placements and diagnostics.
pub fn outline(tree: &RenderTree) -> String {
    let mut out = String::new();
    for (i, block) in tree.blocks.iter().enumerate() {
        block_line(&mut out, i, block);
        for p in &block.patches {
            let _ = writeln!(out, "  + {:?} at {} ({})", p.inserted_text, p.offset, p.reason);
        }
        for n in &block.nodes {
            node_lines(&mut out, n, 1);
        }
    }
    for d in &tree.decisions {
        decision_line(&mut out, d);
    }
    for p in &tree.placements {
        let _ = writeln!(
            out,
            "placement {} {:?} {:?}",
            path(p.node.block, &p.node.path),
            p.kind,
            p.rendering
        );
    }
    for d in &tree.diagnostics {
        let _ = writeln!(out, "! {d}");
    }
    out
}

fn block_line(out: &mut String, i: usize, block: &RenderBlock) {
    let _ = write!(
        out,
        "#{i} {} {}..{}",
        block.kind.name(),
        block.span.start,
        block.span.end
    );
    out.push_str(if block.stable { " stable" } else { " open" });
    if block.literal {
        out.push_str(" literal");
    }
    out.push('\n');
}

fn node_lines(out: &mut String, node: &Node, depth: usize) {
    out.push_str(&"  ".repeat(depth));
    out.push_str(node.name());
    match node {
        Node::Heading { level, .. } => {
            let _ = write!(out, " h{level}");
        }
        Node::List { start: Some(n), .. } => {
            let _ = write!(out, " from {n}");
        }
        Node::CodeBlock { language, code } => {
            if let Some(lang) = language {
                let _ = write!(out, " {lang}");
            }
            let _ = write!(out, " {code:?}");
        }
        Node::Text { text } => {
            let _ = write!(out, " {text:?}");
        }
        Node::Code { code } => {
            let _ = write!(out, " {code:?}");
        }
        Node::MathBlock { source } | Node::InlineMath { source } | Node::DisplayMath { source } => {
            let _ = write!(out, " {source:?}");
        }
        Node::HtmlBlock { html } | Node::InlineHtml { html } => {
            let _ = write!(out, " {html:?}");
        }
        Node::Link { destination, .. } => {
            let _ = write!(out, " -> {destination}");
        }
        Node::Image {
            destination, alt, ..
        } => {
            let _ = write!(out, " -> {destination} {alt:?}");
        }
        Node::TableRow { header: true, .. } => out.push_str(" header"),
        Node::TaskMarker { checked } => out.push_str(if *checked { " [x]" } else { " [ ]" }),
        _ => {}
    }
    out.push('\n');
    for c in node.children() {
        node_lines(out, c, depth + 1);
    }
}

fn decision_line(out: &mut String, d: &SanitizationDecision) {
    let outcome = match &d.outcome {
        Outcome::Allowed => "allowed".to_string(),
        Outcome::Rewritten(to) => format!("rewritten to {to}"),
        Outcome::Escaped => "escaped".to_string(),
        Outcome::Stripped => "stripped".to_string(),
    };
    let _ = writeln!(
        out,
        "decision {} {:?} {outcome}",
        path(d.node.block, &d.node.path),
        d.subject.value(),
    );
}

fn path(block: usize, path: &[usize]) -> String {
    let mut s = format!("#{block}");
    for i in path {
        let _ = write!(s, ".{i}");
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sanitize::tree_of;

    #[test]
    fn outline_indents_children() {
        let tree = tree_of(vec![vec![Node::Heading {
            level: 2,
            children: vec![
                Node::text("a "),
                Node::Emphasis {
                    children: vec![Node::text("b")],
                },
            ],
        }]]);
        insta::assert_snapshot!(outline(&tree), @r#"
        #0 paragraph 0..0 stable
          heading h2
            text "a "
            em
              text "b"
        "#);
    }
}
