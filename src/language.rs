//! Subtitle language tags.
//!
//! Users request languages by 3-letter ISO-639-3 code (`eng`, `spa`, ...).
//! Providers and the on-disk naming convention use the 2-letter ISO-639-1
//! alias where one exists, so a downloaded English subtitle lands as
//! `Movie.en.srt` before normalization renames it to `Movie.srt`.

use crate::error::{Result, SubtidalError};

/// ISO-639-3 to ISO-639-1 aliases for the languages the bundled providers
/// commonly serve. Codes outside this table pass through unchanged.
const ISO_639_ALIASES: &[(&str, &str)] = &[
    ("eng", "en"),
    ("spa", "es"),
    ("fra", "fr"),
    ("fre", "fr"),
    ("deu", "de"),
    ("ger", "de"),
    ("ita", "it"),
    ("por", "pt"),
    ("nld", "nl"),
    ("dut", "nl"),
    ("rus", "ru"),
    ("jpn", "ja"),
    ("kor", "ko"),
    ("zho", "zh"),
    ("chi", "zh"),
    ("ara", "ar"),
    ("hin", "hi"),
    ("pol", "pl"),
    ("tur", "tr"),
    ("swe", "sv"),
    ("dan", "da"),
    ("nor", "no"),
    ("fin", "fi"),
    ("ces", "cs"),
    ("cze", "cs"),
    ("ell", "el"),
    ("gre", "el"),
    ("heb", "he"),
    ("hun", "hu"),
    ("ron", "ro"),
    ("rum", "ro"),
    ("tha", "th"),
    ("vie", "vi"),
    ("ukr", "uk"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Language {
    code: String,
}

impl Language {
    /// Parse a user-supplied language tag. Accepts 2- or 3-letter ASCII
    /// codes; anything else is a configuration error.
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        if !(2..=3).contains(&tag.len()) || !tag.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(SubtidalError::Config(format!(
                "Invalid language tag '{}'. Expected a 2- or 3-letter ISO-639 code (e.g. 'eng')",
                tag
            )));
        }
        Ok(Self { code: tag })
    }

    /// The tag exactly as supplied (lowercased).
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Tag used in provider queries and subtitle file suffixes: the 2-letter
    /// ISO-639-1 alias when known, otherwise the supplied code verbatim.
    pub fn suffix(&self) -> &str {
        ISO_639_ALIASES
            .iter()
            .find(|(iso3, _)| *iso3 == self.code)
            .map(|(_, iso1)| *iso1)
            .unwrap_or(&self.code)
    }
}
