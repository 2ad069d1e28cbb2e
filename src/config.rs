use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SubtidalError};

fn default_subtitle_extension() -> String {
    "srt".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub general: GeneralConfig,
    pub scanner: ScannerConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Subtitle language requested when none is given on the command line,
    /// as a 3-letter ISO-639-3 code
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// File extensions treated as video files (lowercase, without the dot)
    pub video_extensions: Vec<String>,
    /// Extension of subtitle files; a directory containing one is skipped
    #[serde(default = "default_subtitle_extension")]
    pub subtitle_extension: String,
    /// Minimum video file size in MB; smaller files (samples, extras) are
    /// ignored. None disables the filter.
    pub min_size_mb: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Providers to query, in order of preference
    pub providers: Vec<ProviderKind>,
    /// OpenSubtitles REST endpoint
    pub endpoint: String,
    /// OpenSubtitles API key. The anonymous quota applies when unset.
    pub api_key: Option<String>,
    /// User-Agent header sent with provider requests
    pub user_agent: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenSubtitles,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig {
                language: "eng".to_string(),
            },
            scanner: ScannerConfig {
                video_extensions: vec![
                    "mp4".to_string(),
                    "avi".to_string(),
                    "mkv".to_string(),
                ],
                subtitle_extension: default_subtitle_extension(),
                min_size_mb: None,
            },
            provider: ProviderConfig {
                providers: vec![ProviderKind::OpenSubtitles],
                endpoint: "https://api.opensubtitles.com/api/v1".to_string(),
                api_key: None,
                user_agent: concat!("subtidal v", env!("CARGO_PKG_VERSION")).to_string(),
                timeout_secs: 30,
            },
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SubtidalError::Config(format!("Failed to read config file: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| SubtidalError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| SubtidalError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| SubtidalError::Config(format!("Failed to write config file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();

        assert_eq!(parsed.general.language, "eng");
        assert_eq!(parsed.scanner.video_extensions, vec!["mp4", "avi", "mkv"]);
        assert_eq!(parsed.scanner.subtitle_extension, "srt");
        assert_eq!(parsed.provider.providers, vec![ProviderKind::OpenSubtitles]);
    }

    #[test]
    fn test_subtitle_extension_defaults_when_absent() {
        let toml = r#"
            [general]
            language = "spa"

            [scanner]
            video_extensions = ["mkv"]

            [provider]
            providers = ["opensubtitles"]
            endpoint = "https://api.opensubtitles.com/api/v1"
            user_agent = "test"
            timeout_secs = 10
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.scanner.subtitle_extension, "srt");
        assert_eq!(config.scanner.min_size_mb, None);
    }
}
