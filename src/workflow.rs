use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::{debug, info};

use crate::acquire::Acquirer;
use crate::config::Config;
use crate::error::Result;
use crate::language::Language;
use crate::normalize::normalize;
use crate::provider::{ProviderFactory, SubtitleProvider};
use crate::scan::{Candidate, Scanner};

/// Run-level outcome: how many candidates ended in the renamed state out
/// of all candidates discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub successful: usize,
    pub total: usize,
}

pub struct Workflow {
    scanner: Scanner,
    acquirer: Acquirer,
    language: Language,
}

impl Workflow {
    pub fn new(config: Config, language: Language) -> Result<Self> {
        let providers = ProviderFactory::create_providers(&config.provider)?;
        Ok(Self::with_providers(config, language, providers))
    }

    /// Build a workflow around an explicit provider set. Used by `new` and
    /// by tests that substitute mock providers.
    pub fn with_providers(
        config: Config,
        language: Language,
        providers: Vec<Box<dyn SubtitleProvider>>,
    ) -> Self {
        Self {
            scanner: Scanner::new(config.scanner),
            acquirer: Acquirer::new(providers, language.clone()),
            language,
        }
    }

    /// Walk `root` and fetch subtitles for every candidate, one at a time
    /// in walk order. Only an invalid root aborts the run; any per-candidate
    /// failure skips that candidate and moves on.
    pub async fn run(&self, root: &Path) -> Result<RunSummary> {
        info!("Walking the file tree...");
        let candidates: Vec<Candidate> = self.scanner.scan(root)?.collect();

        if candidates.is_empty() {
            info!("No video files without subtitles found in folder");
            return Ok(RunSummary {
                successful: 0,
                total: 0,
            });
        }

        info!("Found {} video files without subtitles", candidates.len());

        let bar = ProgressBar::new(candidates.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(
                "Searching for subtitles [{bar:40}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let mut successful = 0;
        for candidate in &candidates {
            bar.set_message(candidate.title.clone());
            match self.process_candidate(candidate).await {
                Ok(path) => {
                    successful += 1;
                    debug!(
                        "Successfully downloaded subtitle for: {} -> {}",
                        candidate.title,
                        path.display()
                    );
                }
                Err(e) => {
                    debug!("Skipping {}: {}", candidate.title, e);
                }
            }
            bar.inc(1);
        }
        bar.finish_and_clear();

        Ok(RunSummary {
            successful,
            total: candidates.len(),
        })
    }

    /// Take one candidate through matched, downloaded and renamed. An error
    /// anywhere leaves the candidate in the skipped state.
    async fn process_candidate(&self, candidate: &Candidate) -> Result<std::path::PathBuf> {
        self.acquirer.fetch(candidate).await?;
        normalize(candidate, &self.language)
    }
}
