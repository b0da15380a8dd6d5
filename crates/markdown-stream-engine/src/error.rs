use serde::Serialize;
use thiserror::Error;

use crate::sanitize::DestinationKind;

/// Something the engine recovered from while rendering.
///
/// None of these stop a render pass. They are collected in
/// [`RenderTree::diagnostics`](crate::RenderTree::diagnostics).
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Degradation {
    #[error("Malformed {construct} at byte {offset}, rendered as text")]
    MalformedConstruct {
        construct: &'static str,
        offset: usize,
    },

    #[error("Relative destination {destination:?} has no origin to resolve against")]
    UnresolvableReference { destination: String },

    #[error("Policy violation: {0}")]
    PolicyViolation(#[from] Violation),

    #[error("Cached prefix no longer matches at byte {at}, rescanning from the start")]
    CacheInvalidation { at: usize },
}

/// Why the sanitization guard removed something.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "violation", rename_all = "kebab-case")]
pub enum Violation {
    #[error("{kind} destination {destination:?} is not allow-listed")]
    NotAllowListed {
        kind: DestinationKind,
        destination: String,
    },

    #[error("{kind} destination {destination:?} uses a script scheme")]
    ScriptScheme {
        kind: DestinationKind,
        destination: String,
    },

    #[error("Raw markup can run script: {markup:?}")]
    ScriptMarkup { markup: String },

    #[error("{kind} destination {destination:?} is not a valid URL")]
    MalformedDestination {
        kind: DestinationKind,
        destination: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violations_convert_into_degradations() {
        let d: Degradation = Violation::ScriptMarkup {
            markup: "<script>".into(),
        }
        .into();
        assert!(matches!(d, Degradation::PolicyViolation(_)));
        assert_eq!(
            d.to_string(),
            "Policy violation: Raw markup can run script: \"<script>\""
        );
    }

    #[test]
    fn messages_name_the_destination() {
        let v = Violation::NotAllowListed {
            kind: DestinationKind::Image,
            destination: "https://evil.example/x.png".into(),
        };
        assert_eq!(
            v.to_string(),
            "image destination \"https://evil.example/x.png\" is not allow-listed"
        );
    }
}
