//! Directory scanning.
//!
//! Walks a media tree and yields one [`Candidate`] per video file that does
//! not yet have a subtitle alongside it. A directory that already contains a
//! subtitle file is skipped wholesale, which is what makes repeated runs
//! idempotent: once a subtitle has been fetched and renamed, the next scan
//! produces no candidate for that directory.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::ScannerConfig;
use crate::error::{Result, SubtidalError};

/// A video file lacking a matching subtitle. Created during the scan,
/// consumed by the acquire+rename step, never kept across runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Absolute path of the video file
    pub video_path: PathBuf,
    /// Directory containing the video, where the subtitle will be written
    pub directory: PathBuf,
    /// File name without the video extension, used as the subtitle stem
    pub title: String,
}

pub struct Scanner {
    config: ScannerConfig,
}

impl Scanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }

    /// Lazily scan `root` for candidates. Fails up front when `root` does
    /// not exist or is not a directory; the walk itself never fails,
    /// unreadable entries are skipped.
    pub fn scan(&self, root: &Path) -> Result<ScanIter> {
        if !root.is_dir() {
            return Err(SubtidalError::InvalidDirectory(root.to_path_buf()));
        }
        let root = root.canonicalize()?;

        let dirs = WalkDir::new(root)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_dir());

        Ok(ScanIter {
            config: self.config.clone(),
            dirs: Box::new(dirs),
            pending: VecDeque::new(),
        })
    }
}

pub struct ScanIter {
    config: ScannerConfig,
    dirs: Box<dyn Iterator<Item = walkdir::DirEntry> + Send>,
    pending: VecDeque<Candidate>,
}

impl std::fmt::Debug for ScanIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanIter")
            .field("config", &self.config)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Iterator for ScanIter {
    type Item = Candidate;

    fn next(&mut self) -> Option<Candidate> {
        loop {
            if let Some(candidate) = self.pending.pop_front() {
                return Some(candidate);
            }
            let dir = self.dirs.next()?;
            self.pending = scan_directory(dir.path(), &self.config);
        }
    }
}

/// Collect candidates from the immediate files of a single directory.
/// Subdirectories are handled by their own walk entries.
fn scan_directory(dir: &Path, config: &ScannerConfig) -> VecDeque<Candidate> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!("Skipping unreadable directory {}: {}", dir.display(), e);
            return VecDeque::new();
        }
    };

    let files: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().map(|t| t.is_file()).unwrap_or(false))
        .map(|e| e.path())
        .collect();

    let subtitle_present = files
        .iter()
        .any(|p| has_extension(p, &config.subtitle_extension));

    if subtitle_present {
        debug!("Subtitle already present, skipping directory {}", dir.display());
        return VecDeque::new();
    }

    let mut candidates = VecDeque::new();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }
        if !config
            .video_extensions
            .iter()
            .any(|ext| has_extension(&path, ext))
        {
            continue;
        }
        if let Some(min_mb) = config.min_size_mb {
            let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
            if size < min_mb * 1_000_000 {
                debug!("Below minimum size, skipping {}", path.display());
                continue;
            }
        }
        let Some(title) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        candidates.push_back(Candidate {
            video_path: path.clone(),
            directory: dir.to_path_buf(),
            title: title.to_string(),
        });
    }
    candidates
}

fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(ext))
        .unwrap_or(false)
}
