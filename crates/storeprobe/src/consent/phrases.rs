//! Accept/consent phrase matching.

use regex::Regex;

use crate::result::{ProbeError, ProbeResult};

/// Phrases an accept button is expected to carry
pub const DEFAULT_CONSENT_PHRASES: &[&str] = &["consent", "accept", "i agree", "allow all"];

/// Compiled consent phrases.
///
/// The role pattern is anchored: an accessible name must equal one of the
/// phrases, ignoring case and surrounding whitespace. The text pattern is
/// unanchored, so any visible text containing a phrase matches.
#[derive(Debug, Clone)]
pub struct ConsentPhrases {
    phrases: Vec<String>,
    role_name: Regex,
    text: Regex,
}

impl ConsentPhrases {
    /// Compile a phrase list. Blank phrases are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if no usable phrase remains.
    pub fn new<I, S>(phrases: I) -> ProbeResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases: Vec<String> = phrases
            .into_iter()
            .map(|p| p.as_ref().trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        if phrases.is_empty() {
            return Err(ProbeError::config("consent phrase list is empty"));
        }

        let alternation = phrases
            .iter()
            .map(|p| regex::escape(p))
            .collect::<Vec<_>>()
            .join("|");
        let role_name = Regex::new(&format!(r"(?i)^\s*(?:{alternation})\s*$"))
            .map_err(|e| ProbeError::config(format!("consent phrases: {e}")))?;
        let text = Regex::new(&format!("(?i)(?:{alternation})"))
            .map_err(|e| ProbeError::config(format!("consent phrases: {e}")))?;

        Ok(Self {
            phrases,
            role_name,
            text,
        })
    }

    /// Phrases in priority order
    #[must_use]
    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    /// Anchored, case-insensitive pattern for accessible names
    #[must_use]
    pub const fn role_name_pattern(&self) -> &Regex {
        &self.role_name
    }

    /// Unanchored, case-insensitive pattern for visible text
    #[must_use]
    pub const fn text_pattern(&self) -> &Regex {
        &self.text
    }

    /// Whether an accessible name is exactly one of the phrases
    #[must_use]
    pub fn matches_name(&self, name: &str) -> bool {
        self.role_name.is_match(name)
    }

    /// Whether visible text contains one of the phrases
    #[must_use]
    pub fn matches_text(&self, text: &str) -> bool {
        self.text.is_match(text)
    }
}
