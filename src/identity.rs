//! Video identity resolution.
//!
//! Providers are queried by title/year/episode rather than by file name, so
//! release-style names like `The.Matrix.1999.1080p.BluRay.mkv` or
//! `Show.Name.S02E05.720p.HDTV.x264.mkv` must first be parsed into a
//! structured [`VideoIdentity`]. Names that yield no usable title fail with
//! `IdentityParse` and the file is skipped.

use regex::Regex;
use std::sync::OnceLock;

use crate::error::{Result, SubtidalError};

/// Structured identity derived from a video file name, used to query
/// subtitle providers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoIdentity {
    pub title: String,
    pub year: Option<u16>,
    pub season: Option<u32>,
    pub episode: Option<u32>,
}

impl VideoIdentity {
    pub fn is_episode(&self) -> bool {
        self.season.is_some() || self.episode.is_some()
    }
}

fn episode_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\bS(\d{1,2})[ ._-]?E(\d{1,3})\b|\b(\d{1,2})x(\d{2,3})\b")
            .expect("episode pattern is valid")
    })
}

fn year_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(19\d{2}|20\d{2})\b").expect("year pattern is valid"))
}

/// Resolve a provider-level video identity from a file name.
///
/// The title is everything before the first episode or year marker, with
/// dot/underscore separators folded to spaces. A name with no extractable
/// title (extension only, separators only) cannot be matched against any
/// provider and is rejected.
pub fn resolve(filename: &str) -> Result<VideoIdentity> {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _ext)| stem)
        .unwrap_or(filename);
    let cleaned = stem.replace(['.', '_'], " ");

    let mut season = None;
    let mut episode = None;
    let mut title_end = cleaned.len();

    if let Some(caps) = episode_re().captures(&cleaned) {
        let m = caps.get(0).ok_or_else(|| SubtidalError::IdentityParse(filename.to_string()))?;
        title_end = m.start();
        // Alternation puts SxxEyy in groups 1/2 and NxNN in groups 3/4.
        season = caps
            .get(1)
            .or_else(|| caps.get(3))
            .and_then(|g| g.as_str().parse().ok());
        episode = caps
            .get(2)
            .or_else(|| caps.get(4))
            .and_then(|g| g.as_str().parse().ok());
    }

    let mut year = None;
    if let Some(caps) = year_re().captures(&cleaned[..title_end]) {
        if let Some(m) = caps.get(0) {
            // A year at position 0 is a title ("2012"), not a marker.
            if m.start() > 0 {
                year = m.as_str().parse().ok();
                title_end = m.start();
            }
        }
    }

    let title = cleaned[..title_end]
        .trim_matches(|c: char| c.is_whitespace() || c == '-')
        .to_string();

    if title.is_empty() {
        return Err(SubtidalError::IdentityParse(filename.to_string()));
    }

    Ok(VideoIdentity {
        title,
        year,
        season,
        episode,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_with_year() {
        let id = resolve("The.Matrix.1999.1080p.BluRay.x264.mkv").unwrap();
        assert_eq!(id.title, "The Matrix");
        assert_eq!(id.year, Some(1999));
        assert!(!id.is_episode());
    }

    #[test]
    fn test_episode_sxxeyy() {
        let id = resolve("Breaking.Bad.S02E05.720p.HDTV.mkv").unwrap();
        assert_eq!(id.title, "Breaking Bad");
        assert_eq!(id.season, Some(2));
        assert_eq!(id.episode, Some(5));
        assert!(id.is_episode());
    }

    #[test]
    fn test_episode_nxnn() {
        let id = resolve("firefly_1x11.avi").unwrap();
        assert_eq!(id.title, "firefly");
        assert_eq!(id.season, Some(1));
        assert_eq!(id.episode, Some(11));
    }

    #[test]
    fn test_plain_title_without_markers() {
        let id = resolve("Inception.mp4").unwrap();
        assert_eq!(id.title, "Inception");
        assert_eq!(id.year, None);
        assert!(!id.is_episode());
    }

    #[test]
    fn test_spaces_in_name() {
        let id = resolve("Spirited Away 2001.mkv").unwrap();
        assert_eq!(id.title, "Spirited Away");
        assert_eq!(id.year, Some(2001));
    }

    #[test]
    fn test_year_as_title_is_kept() {
        // A leading year is the title itself, not a year marker.
        let id = resolve("2012.mkv").unwrap();
        assert_eq!(id.title, "2012");
        assert_eq!(id.year, None);
    }

    #[test]
    fn test_unparseable_names_rejected() {
        assert!(resolve(".mkv").is_err());
        assert!(resolve("___.avi").is_err());
    }
}
