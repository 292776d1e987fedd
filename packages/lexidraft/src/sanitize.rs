//! Cleanup of raw model output.
//!
//! Strips bold markup and a fixed catalogue of disclaimer/meta sentences,
//! then normalizes blank-line runs. This is a cosmetic filter: boilerplate
//! phrased outside the catalogue survives, and a partial removal may leave
//! dangling punctuation behind.

use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Disclaimer catalogue, applied in this order. Each pattern runs from its
/// anchor phrase to the end of the line.
pub const DISCLAIMER_PATTERNS: &[&str] = &[
    r"This is not (a substitute for|legal) advice.*",
    r"I am not a lawyer.*",
    r"As an AI language model.*",
    r"The model's responses.*",
    r"Please consult.*(a licensed attorney|legal professional).*",
    r"The information provided.*(general informational|not constitute).*",
    r"Always seek professional legal advice.*",
    r"Note:.*legal.*",
    r"This response is for informational purposes.*",
    r"Disclaimer.*",
    r"Recommendation.*",
    r"This analysis is based on my understanding.*",
    r"Okay, let's provide a legal opinion.*",
    r"Important Notes.*",
];

/// `**text**` → `text`, shortest match per pair.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BOLD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid regex"));

/// Two or more newlines.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static BLANK_RUN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{2,}").expect("valid regex"));

#[allow(clippy::expect_used)] // Static regexes that are guaranteed to be valid
static DISCLAIMERS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DISCLAIMER_PATTERNS
        .iter()
        .map(|pattern| {
            RegexBuilder::new(pattern)
                .case_insensitive(true)
                .build()
                .expect("valid regex")
        })
        .collect()
});

/// Clean model output for display and export.
///
/// Never fails, and `clean(&clean(x)) == clean(x)` for every input.
///
/// # Examples
/// ```
/// use lexidraft::sanitize::clean;
///
/// let raw = "**Affidavit of Fact**\n\n\n\nI, X... This is not legal advice.";
/// assert_eq!(clean(raw), "Affidavit of Fact\n\nI, X...");
/// ```
#[must_use]
pub fn clean(text: &str) -> String {
    let mut current = text.to_string();

    // Repeat until stable so that cleaning is idempotent.
    loop {
        let next = strip_once(&current);
        if next == current {
            break;
        }
        current = next;
    }

    BLANK_RUN_PATTERN
        .replace_all(&current, "\n\n")
        .trim()
        .to_string()
}

fn strip_once(text: &str) -> String {
    let mut out = BOLD_PATTERN.replace_all(text, "$1").into_owned();
    for pattern in DISCLAIMERS.iter() {
        out = pattern.replace_all(&out, "").into_owned();
    }
    out
}

/// Stateless handle over [`clean`], for callers that prefer a value to pass around.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseSanitizer;

impl ResponseSanitizer {
    #[must_use]
    pub fn clean(&self, text: &str) -> String {
        clean(text)
    }
}
