use std::fmt;

use serde::{Deserialize, Serialize};
use url::{ParseError, Url};

use crate::{error::Violation, tree::NodeRef};

use super::policy::SanitizationPolicy;

/// Schemes stripped whatever the allow-lists say.
pub(super) const SCRIPT_SCHEMES: [&str; 2] = ["javascript", "vbscript"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DestinationKind {
    Link,
    Image,
}

impl fmt::Display for DestinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DestinationKind::Link => "link",
            DestinationKind::Image => "image",
        })
    }
}

/// What a decision was about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Subject {
    Link { destination: String },
    Image { destination: String },
    Markup { html: String },
}

impl Subject {
    /// The destination or markup the decision was about.
    pub fn value(&self) -> &str {
        match self {
            Subject::Link { destination } | Subject::Image { destination } => destination,
            Subject::Markup { html } => html,
        }
    }

    pub fn destination(kind: DestinationKind, destination: impl Into<String>) -> Self {
        let destination = destination.into();
        match kind {
            DestinationKind::Link => Subject::Link { destination },
            DestinationKind::Image => Subject::Image { destination },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "to", rename_all = "kebab-case")]
pub enum Outcome {
    Allowed,
    /// Kept, with its destination replaced by this one.
    Rewritten(String),
    /// Raw markup kept, but shown as text.
    Escaped,
    Stripped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "kebab-case")]
pub enum DecisionReason {
    /// The allow-list admits everything.
    Wildcard,
    MatchedPrefix { prefix: String },
    /// A relative destination with no origin to resolve it against.
    Unresolvable,
    RawMarkupAllowed,
    RawMarkupDisallowed,
    Violation(Violation),
}

/// One guard decision. `node` addresses the tree the guard received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SanitizationDecision {
    pub node: NodeRef,
    pub subject: Subject,
    pub outcome: Outcome,
    pub reason: DecisionReason,
}

/// A decision before it is attached to a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub outcome: Outcome,
    pub reason: DecisionReason,
}

impl Verdict {
    pub(super) fn stripped(reason: DecisionReason) -> Self {
        Self {
            outcome: Outcome::Stripped,
            reason,
        }
    }
}

/// Decides what happens to one link or image destination.
///
/// Script schemes are stripped first. Otherwise the destination is resolved
/// (relative ones against the policy's default origin) and the resolved URL
/// is checked against the allow-list for `kind`.
pub fn decide(kind: DestinationKind, destination: &str, policy: &SanitizationPolicy) -> Verdict {
    let trimmed = destination.trim();
    let script = || {
        Verdict::stripped(DecisionReason::Violation(Violation::ScriptScheme {
            kind,
            destination: destination.to_string(),
        }))
    };
    if has_script_scheme(trimmed) {
        return script();
    }

    let (resolved, rewritten) = match Url::parse(trimmed) {
        Ok(url) => (url, false),
        Err(ParseError::RelativeUrlWithoutBase) => match &policy.default_origin {
            Some(origin) => match origin.join(trimmed) {
                Ok(url) => (url, true),
                Err(_) => return malformed(kind, destination),
            },
            None => return Verdict::stripped(DecisionReason::Unresolvable),
        },
        Err(_) => return malformed(kind, destination),
    };
    if SCRIPT_SCHEMES.contains(&resolved.scheme()) {
        return script();
    }

    match policy.rule_for(kind).matching(&resolved) {
        Some(prefix) => Verdict {
            outcome: if rewritten {
                Outcome::Rewritten(resolved.to_string())
            } else {
                Outcome::Allowed
            },
            reason: if prefix == super::PrefixRule::WILDCARD {
                DecisionReason::Wildcard
            } else {
                DecisionReason::MatchedPrefix {
                    prefix: prefix.to_string(),
                }
            },
        },
        None => Verdict::stripped(DecisionReason::Violation(Violation::NotAllowListed {
            kind,
            destination: resolved.to_string(),
        })),
    }
}

fn malformed(kind: DestinationKind, destination: &str) -> Verdict {
    Verdict::stripped(DecisionReason::Violation(Violation::MalformedDestination {
        kind,
        destination: destination.to_string(),
    }))
}

/// Scheme check on the raw text, ignoring the whitespace and control
/// characters browsers skip inside a scheme.
fn has_script_scheme(destination: &str) -> bool {
    let scheme: String = destination
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .take_while(|&c| c != ':')
        .flat_map(char::to_lowercase)
        .collect();
    destination.contains(':') && SCRIPT_SCHEMES.contains(&scheme.as_str())
}
