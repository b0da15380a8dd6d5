use std::sync::OnceLock;

use html_escape::decode_html_entities;
use regex::Regex;

use crate::{
    error::Violation,
    tree::{Node, RenderTree},
};

use super::{
    decision::{DecisionReason, Outcome, SCRIPT_SCHEMES, Subject, Verdict},
    guard::{Guard, push_text},
    policy::SanitizationPolicy,
};

/// True for markup that can run script: script-bearing elements, event
/// handler attributes, and script URLs inside attributes.
///
/// Entities are decoded first, so `&#106;avascript:` is caught as well.
pub fn can_run_script(html: &str) -> bool {
    static SCRIPT_REGEX: OnceLock<Regex> = OnceLock::new();
    let script_regex = SCRIPT_REGEX.get_or_init(|| {
        Regex::new(r#"(?i)<\s*/?\s*(?:script|iframe|object|embed)\b|[\s/"']on[a-z]+\s*="#)
            .expect("Invalid script markup regex")
    });
    let decoded = decode_html_entities(html);
    script_regex.is_match(&decoded) || has_script_url(&decoded)
}

/// Looks for a script scheme with the whitespace and control characters
/// browsers skip inside a scheme removed.
fn has_script_url(html: &str) -> bool {
    let compact: String = html
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .flat_map(char::to_lowercase)
        .collect();
    SCRIPT_SCHEMES
        .iter()
        .any(|scheme| compact.contains(&format!("{scheme}:")))
}

/// Decides what happens to one piece of raw markup.
pub fn judge_markup(html: &str, policy: &SanitizationPolicy) -> Verdict {
    if can_run_script(html) {
        Verdict::stripped(DecisionReason::Violation(Violation::ScriptMarkup {
            markup: html.trim_end().to_string(),
        }))
    } else if policy.allow_raw_markup {
        Verdict {
            outcome: Outcome::Allowed,
            reason: DecisionReason::RawMarkupAllowed,
        }
    } else {
        Verdict {
            outcome: Outcome::Escaped,
            reason: DecisionReason::RawMarkupDisallowed,
        }
    }
}

/// Removes raw markup that can run script, and turns the rest into text
/// unless the policy keeps markup.
pub fn guard_raw_markup(tree: RenderTree, policy: &SanitizationPolicy) -> RenderTree {
    Guard::run(
        tree,
        policy,
        |n| matches!(n, Node::HtmlBlock { .. } | Node::InlineHtml { .. }),
        visit_markup,
    )
}

fn visit_markup(g: &mut Guard<'_>, node: Node, out: &mut Vec<Node>) {
    match node {
        Node::HtmlBlock { html } => {
            let verdict = judge_markup(&html, g.policy);
            let subject = Subject::Markup { html: html.clone() };
            match g.record(subject, verdict) {
                Outcome::Stripped => {}
                Outcome::Escaped => out.push(Node::Paragraph {
                    children: vec![Node::text(html.trim_end())],
                }),
                _ => out.push(Node::HtmlBlock { html }),
            }
        }
        Node::InlineHtml { html } => {
            let verdict = judge_markup(&html, g.policy);
            let subject = Subject::Markup { html: html.clone() };
            match g.record(subject, verdict) {
                Outcome::Stripped => {}
                Outcome::Escaped => push_text(out, html),
                _ => out.push(Node::InlineHtml { html }),
            }
        }
        Node::Text { text } => push_text(out, text),
        other => out.push(g.descend(other, visit_markup)),
    }
}
