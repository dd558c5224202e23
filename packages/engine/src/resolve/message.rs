//! Message resolution and post-processing
//!
//! A result's message is its literal text when present, else the rule's
//! message template named by the message id. The obtained text then goes
//! through two passes, in this order: positional argument substitution,
//! then inline link stripping.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::rundata::non_blank;
use crate::sarif::MultiformatMessageString;

use super::ResultResolution;

/// Positional argument tokens: `{0}`, `{1}`, ... and nothing else. This is
/// deliberately not a general format-string interpreter; tool output is
/// untrusted and brace syntax beyond numeric placeholders passes through
/// verbatim.
static ARG_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\d+)\}").expect("valid pattern"));

/// Inline links `[text](destination)`, with `\[`, `\]` as literal
/// brackets and `\\` as a literal backslash inside the text part.
static LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[((?:\\.|[^\\\]])*)\]\(([^)]+)\)").expect("valid pattern"));

static ESCAPED: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\(.)").expect("valid pattern"));

impl ResultResolution<'_> {
    /// The result's resolved, post-processed message text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        let message = self.result.message.as_ref()?;
        let text = non_blank(message.text.as_deref())
            .map(str::to_string)
            .or_else(|| {
                let id = message.id.as_deref()?;
                let rule = self.rule()?;
                non_blank(rule.message_string(id)?.text.as_deref()).map(str::to_string)
            })?;
        let args: &[String] = message.arguments.as_deref().unwrap_or(&[]);
        Some(strip_links(&resolve_args(&text, args)))
    }

    /// Resolve a descriptor-side message string (no positional
    /// arguments apply), used for rule descriptions.
    #[must_use]
    pub fn template_text(&self, template: &MultiformatMessageString) -> Option<String> {
        non_blank(template.text.as_deref()).map(strip_links)
    }
}

/// Substitute `{0}`, `{1}`, ... with the corresponding argument. Tokens
/// beyond the argument list are left verbatim.
#[must_use]
pub fn resolve_args(text: &str, args: &[String]) -> String {
    if args.is_empty() {
        return text.to_string();
    }
    ARG_TOKEN
        .replace_all(text, |caps: &Captures<'_>| {
            match caps[1].parse::<usize>().ok().and_then(|i| args.get(i)) {
                Some(arg) => arg.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

/// Replace `[text](destination)` with `text`, unescaping `\[`, `\]` and
/// `\\`, and discarding the destination. The input format allows
/// lightweight markup in messages that has no meaning outside a rich
/// viewer.
#[must_use]
pub fn strip_links(text: &str) -> String {
    LINK.replace_all(text, |caps: &Captures<'_>| {
        ESCAPED.replace_all(&caps[1], "$1").into_owned()
    })
    .into_owned()
}
