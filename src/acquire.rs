//! Subtitle acquisition.
//!
//! For one candidate: resolve its provider-level identity from the file
//! name, ask each configured provider for listings, take the best-ranked
//! one, and persist the downloaded content next to the video. The saved
//! file carries the provider naming convention (`<title>.<lang>.srt`);
//! normalization strips the language tag afterwards.

use std::path::PathBuf;
use tokio::fs;
use tracing::{debug, warn};

use crate::error::{Result, SubtidalError};
use crate::identity;
use crate::language::Language;
use crate::provider::{select_best, SubtitleContent, SubtitleProvider};
use crate::scan::Candidate;

pub struct Acquirer {
    providers: Vec<Box<dyn SubtitleProvider>>,
    language: Language,
}

impl Acquirer {
    pub fn new(providers: Vec<Box<dyn SubtitleProvider>>, language: Language) -> Self {
        Self { providers, language }
    }

    /// Fetch the best subtitle for a candidate and write it into the
    /// candidate's directory. Returns the written path.
    ///
    /// Fails with `IdentityParse` when the file name carries no usable
    /// title, and with `SubtitleNotFound` when every provider comes up
    /// empty. A provider that errors out is skipped in favor of the next
    /// one rather than failing the candidate.
    pub async fn fetch(&self, candidate: &Candidate) -> Result<PathBuf> {
        let filename = candidate
            .video_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                SubtidalError::IdentityParse(candidate.video_path.display().to_string())
            })?;
        let identity = identity::resolve(filename)?;

        debug!(
            "Resolved '{}' as title='{}' year={:?} season={:?} episode={:?}",
            filename, identity.title, identity.year, identity.season, identity.episode
        );

        for provider in &self.providers {
            let listings = match provider.search(&identity, &self.language).await {
                Ok(listings) => listings,
                Err(e) => {
                    warn!("Provider {} search failed: {}", provider.name(), e);
                    continue;
                }
            };

            let Some(best) = select_best(listings) else {
                debug!("Provider {} has no match for '{}'", provider.name(), identity.title);
                continue;
            };

            debug!(
                "Best match from {}: release='{}' downloads={}",
                provider.name(),
                best.release,
                best.download_count
            );

            let content = provider.fetch(&best).await?;
            return save_subtitle(candidate, &self.language, &content).await;
        }

        Err(SubtidalError::SubtitleNotFound(candidate.title.clone()))
    }
}

/// Path a freshly downloaded subtitle is saved under: the video's stem plus
/// the language suffix, e.g. `Movie.en.srt`. The normalizer relies on
/// computing this same name.
pub fn provider_subtitle_path(candidate: &Candidate, language: &Language) -> PathBuf {
    candidate
        .directory
        .join(format!("{}.{}.srt", candidate.title, language.suffix()))
}

async fn save_subtitle(
    candidate: &Candidate,
    language: &Language,
    content: &SubtitleContent,
) -> Result<PathBuf> {
    let path = provider_subtitle_path(candidate, language);
    fs::write(&path, &content.text).await?;
    debug!("Saved subtitle to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockSubtitleProvider, SubtitleListing};
    use std::path::Path;

    fn candidate(dir: &Path, title: &str, ext: &str) -> Candidate {
        Candidate {
            video_path: dir.join(format!("{}.{}", title, ext)),
            directory: dir.to_path_buf(),
            title: title.to_string(),
        }
    }

    fn listing(downloads: u64) -> SubtitleListing {
        SubtitleListing {
            file_id: "1".to_string(),
            release: "rel".to_string(),
            language: "en".to_string(),
            download_count: downloads,
        }
    }

    #[tokio::test]
    async fn test_fetch_saves_provider_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = candidate(dir.path(), "The.Matrix.1999", "mkv");

        let mut provider = MockSubtitleProvider::new();
        provider.expect_name().return_const("mock");
        provider
            .expect_search()
            .returning(|_, _| Ok(vec![listing(42)]));
        provider.expect_fetch().returning(|_| {
            Ok(SubtitleContent {
                text: "1\n00:00:01,000 --> 00:00:02,000\nHello\n\n".to_string(),
            })
        });

        let acquirer = Acquirer::new(
            vec![Box::new(provider)],
            Language::parse("eng").unwrap(),
        );
        let saved = acquirer.fetch(&candidate).await.unwrap();

        assert_eq!(saved, dir.path().join("The.Matrix.1999.en.srt"));
        assert!(saved.is_file());
    }

    #[tokio::test]
    async fn test_fetch_reports_not_found_when_all_providers_empty() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = candidate(dir.path(), "Obscure.Film.2003", "avi");

        let mut provider = MockSubtitleProvider::new();
        provider.expect_name().return_const("mock");
        provider.expect_search().returning(|_, _| Ok(Vec::new()));

        let acquirer = Acquirer::new(
            vec![Box::new(provider)],
            Language::parse("eng").unwrap(),
        );
        let err = acquirer.fetch(&candidate).await.unwrap_err();
        assert!(matches!(err, SubtidalError::SubtitleNotFound(_)));
    }

    #[tokio::test]
    async fn test_failing_provider_falls_through_to_next() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = candidate(dir.path(), "Movie", "mp4");

        let mut broken = MockSubtitleProvider::new();
        broken.expect_name().return_const("broken");
        broken
            .expect_search()
            .returning(|_, _| Err(SubtidalError::Provider("503".to_string())));

        let mut working = MockSubtitleProvider::new();
        working.expect_name().return_const("mock");
        working
            .expect_search()
            .returning(|_, _| Ok(vec![listing(7)]));
        working.expect_fetch().returning(|_| {
            Ok(SubtitleContent {
                text: "subtitle".to_string(),
            })
        });

        let acquirer = Acquirer::new(
            vec![Box::new(broken), Box::new(working)],
            Language::parse("eng").unwrap(),
        );
        let saved = acquirer.fetch(&candidate).await.unwrap();
        assert!(saved.ends_with("Movie.en.srt"));
    }

    #[tokio::test]
    async fn test_unparseable_name_skips_without_provider_call() {
        let dir = tempfile::tempdir().unwrap();
        let candidate = candidate(dir.path(), "___", "mkv");

        // No expectations set: any search call would panic the mock.
        let provider = MockSubtitleProvider::new();

        let acquirer = Acquirer::new(
            vec![Box::new(provider)],
            Language::parse("eng").unwrap(),
        );
        let err = acquirer.fetch(&candidate).await.unwrap_err();
        assert!(matches!(err, SubtidalError::IdentityParse(_)));
    }
}
