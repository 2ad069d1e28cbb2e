// Subtitle provider abstraction
//
// Each provider knows how to search a remote catalogue by video identity
// and fetch the content of a single listing. Providers are queried in the
// order configured; ranking between a provider's own listings uses the
// download count it reports.

pub mod opensubtitles;

use async_trait::async_trait;

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::Result;
use crate::identity::VideoIdentity;
use crate::language::Language;

/// One subtitle offered by a provider, not yet downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleListing {
    /// Provider-scoped identifier used to fetch the content
    pub file_id: String,
    /// Release name the subtitle was made for
    pub release: String,
    /// Language tag reported by the provider
    pub language: String,
    /// How often this subtitle has been downloaded; higher ranks better
    pub download_count: u64,
}

/// Downloaded subtitle text in SRT form.
#[derive(Debug, Clone)]
pub struct SubtitleContent {
    pub text: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubtitleProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// List subtitles matching the given identity and language.
    /// An empty result means the provider has no match; it is not an error.
    async fn search(
        &self,
        identity: &VideoIdentity,
        language: &Language,
    ) -> Result<Vec<SubtitleListing>>;

    /// Download the content of a single listing.
    async fn fetch(&self, listing: &SubtitleListing) -> Result<SubtitleContent>;
}

/// Pick the best-ranked listing: the one with the highest download count.
pub fn select_best(listings: Vec<SubtitleListing>) -> Option<SubtitleListing> {
    listings.into_iter().max_by_key(|l| l.download_count)
}

/// Factory for creating provider instances from configuration
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn create_providers(config: &ProviderConfig) -> Result<Vec<Box<dyn SubtitleProvider>>> {
        config
            .providers
            .iter()
            .map(|kind| match kind {
                ProviderKind::OpenSubtitles => opensubtitles::OpenSubtitlesProvider::new(config)
                    .map(|p| Box::new(p) as Box<dyn SubtitleProvider>),
            })
            .collect()
    }
}
