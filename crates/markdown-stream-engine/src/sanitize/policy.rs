use serde::{Deserialize, Serialize};
use url::Url;

use super::decision::DestinationKind;

/// Which resolved destinations an allow-list admits.
///
/// Written as a list of prefixes in configuration; a list containing `"*"`
/// admits everything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub enum PrefixRule {
    Wildcard,
    List(Vec<String>),
}

impl PrefixRule {
    pub const WILDCARD: &'static str = "*";

    pub fn list<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Vec::from_iter(prefixes.into_iter().map(Into::into)).into()
    }

    /// The first prefix `url` matches, or `None`.
    ///
    /// A prefix that is itself an absolute URL with a host must share `url`'s
    /// origin as well as prefix its serialization, so `https://a.example`
    /// does not admit `https://a.example.evil.org`. Anything else is a plain
    /// string prefix.
    pub fn matching<'p>(&'p self, url: &Url) -> Option<&'p str> {
        match self {
            PrefixRule::Wildcard => Some(Self::WILDCARD),
            PrefixRule::List(prefixes) => prefixes
                .iter()
                .find(|p| prefix_matches(p, url))
                .map(String::as_str),
        }
    }
}

fn prefix_matches(prefix: &str, url: &Url) -> bool {
    match Url::parse(prefix) {
        Ok(p) if p.origin().is_tuple() => {
            p.origin() == url.origin() && url.as_str().starts_with(p.as_str())
        }
        _ => url.as_str().starts_with(prefix),
    }
}

impl From<Vec<String>> for PrefixRule {
    fn from(prefixes: Vec<String>) -> Self {
        if prefixes.iter().any(|p| p == Self::WILDCARD) {
            PrefixRule::Wildcard
        } else {
            PrefixRule::List(prefixes)
        }
    }
}

impl From<PrefixRule> for Vec<String> {
    fn from(rule: PrefixRule) -> Self {
        match rule {
            PrefixRule::Wildcard => vec![PrefixRule::WILDCARD.to_string()],
            PrefixRule::List(prefixes) => prefixes,
        }
    }
}

/// What the sanitization guard lets through.
///
/// The default admits every well-formed absolute destination, resolves no
/// relative ones, and shows raw markup as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SanitizationPolicy {
    pub allowed_link_prefixes: PrefixRule,
    pub allowed_image_prefixes: PrefixRule,
    /// Base for relative destinations.
    pub default_origin: Option<Url>,
    /// Keep raw HTML as markup instead of showing it as text. Markup that
    /// can run script is removed either way.
    pub allow_raw_markup: bool,
}

impl Default for SanitizationPolicy {
    fn default() -> Self {
        Self {
            allowed_link_prefixes: PrefixRule::Wildcard,
            allowed_image_prefixes: PrefixRule::Wildcard,
            default_origin: None,
            allow_raw_markup: false,
        }
    }
}

impl SanitizationPolicy {
    /// Admits nothing: every link and image is stripped.
    pub fn deny_all() -> Self {
        Self {
            allowed_link_prefixes: PrefixRule::List(vec![]),
            allowed_image_prefixes: PrefixRule::List(vec![]),
            ..Self::default()
        }
    }

    pub fn rule_for(&self, kind: DestinationKind) -> &PrefixRule {
        match kind {
            DestinationKind::Link => &self.allowed_link_prefixes,
            DestinationKind::Image => &self.allowed_image_prefixes,
        }
    }
}
