//! OpenSubtitles REST provider.
//!
//! Talks to the api.opensubtitles.com v1 API: `GET /subtitles` to search by
//! title/year/episode, `POST /download` to turn a file id into a short-lived
//! download link, then a plain GET for the SRT body.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Result, SubtidalError};
use crate::identity::VideoIdentity;
use crate::language::Language;
use crate::provider::{SubtitleContent, SubtitleListing, SubtitleProvider};

pub struct OpenSubtitlesProvider {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    data: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
struct SearchEntry {
    attributes: SearchAttributes,
}

#[derive(Debug, Deserialize)]
struct SearchAttributes {
    language: Option<String>,
    #[serde(default)]
    download_count: u64,
    release: Option<String>,
    #[serde(default)]
    files: Vec<SubtitleFile>,
}

#[derive(Debug, Deserialize)]
struct SubtitleFile {
    file_id: u64,
}

#[derive(Debug, Serialize)]
struct DownloadRequest {
    file_id: u64,
}

#[derive(Debug, Deserialize)]
struct DownloadResponse {
    link: String,
}

impl OpenSubtitlesProvider {
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| SubtidalError::Provider(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => builder.header("Api-Key", key),
            None => builder,
        }
    }
}

#[async_trait::async_trait]
impl SubtitleProvider for OpenSubtitlesProvider {
    fn name(&self) -> &'static str {
        "opensubtitles"
    }

    async fn search(
        &self,
        identity: &VideoIdentity,
        language: &Language,
    ) -> Result<Vec<SubtitleListing>> {
        let url = format!("{}/subtitles", self.endpoint);

        let mut query: Vec<(&str, String)> = vec![
            ("query", identity.title.clone()),
            ("languages", language.suffix().to_string()),
        ];
        if let Some(year) = identity.year {
            query.push(("year", year.to_string()));
        }
        if let Some(season) = identity.season {
            query.push(("season_number", season.to_string()));
        }
        if let Some(episode) = identity.episode {
            query.push(("episode_number", episode.to_string()));
        }

        debug!("Searching OpenSubtitles for '{}'", identity.title);

        let response = self
            .request(self.client.get(&url))
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SubtidalError::Provider(format!(
                "OpenSubtitles search error {}: {}",
                status, error_text
            )));
        }

        let search_response: SearchResponse = response.json().await?;

        let listings = search_response
            .data
            .into_iter()
            .filter_map(|entry| {
                let attrs = entry.attributes;
                let file = attrs.files.into_iter().next()?;
                Some(SubtitleListing {
                    file_id: file.file_id.to_string(),
                    release: attrs.release.unwrap_or_default(),
                    language: attrs.language.unwrap_or_default(),
                    download_count: attrs.download_count,
                })
            })
            .collect();

        Ok(listings)
    }

    async fn fetch(&self, listing: &SubtitleListing) -> Result<SubtitleContent> {
        let file_id: u64 = listing.file_id.parse().map_err(|_| {
            SubtidalError::Provider(format!("Invalid OpenSubtitles file id '{}'", listing.file_id))
        })?;

        let url = format!("{}/download", self.endpoint);
        let response = self
            .request(self.client.post(&url))
            .json(&DownloadRequest { file_id })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(SubtidalError::Provider(format!(
                "OpenSubtitles download error {}: {}",
                status, error_text
            )));
        }

        let download: DownloadResponse = response.json().await?;

        debug!("Fetching subtitle content from {}", download.link);

        let text = self
            .client
            .get(&download.link)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(SubtitleContent { text })
    }
}
