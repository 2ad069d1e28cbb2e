//! Subtitle file normalization.
//!
//! Providers save subtitles with a language tag in the name
//! (`Movie.en.srt`), but most consumer media players only pair a subtitle
//! with its video when both share the exact same stem. Normalization
//! renames the downloaded file to `Movie.srt`.

use std::path::PathBuf;
use tracing::debug;

use crate::acquire::provider_subtitle_path;
use crate::error::{Result, SubtidalError};
use crate::language::Language;
use crate::scan::Candidate;

/// Rename the provider-named subtitle to the video's base name. The
/// expected source name is recomputed from the candidate and language; if
/// that file is missing (the provider wrote a different convention, or
/// something else moved it) the candidate counts as unsuccessful.
pub fn normalize(candidate: &Candidate, language: &Language) -> Result<PathBuf> {
    let provider_name = provider_subtitle_path(candidate, language);
    let target = candidate.directory.join(format!("{}.srt", candidate.title));

    if !provider_name.is_file() {
        return Err(SubtidalError::RenameMissing(provider_name));
    }

    std::fs::rename(&provider_name, &target)?;
    debug!(
        "Renamed {} -> {}",
        provider_name.display(),
        target.display()
    );
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn candidate(dir: &Path, title: &str) -> Candidate {
        Candidate {
            video_path: dir.join(format!("{}.mkv", title)),
            directory: dir.to_path_buf(),
            title: title.to_string(),
        }
    }

    #[test]
    fn test_rename_strips_language_tag() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Movie.en.srt"), "subtitle").unwrap();

        let target = normalize(
            &candidate(dir.path(), "Movie"),
            &Language::parse("eng").unwrap(),
        )
        .unwrap();

        assert_eq!(target, dir.path().join("Movie.srt"));
        assert!(target.is_file());
        assert!(!dir.path().join("Movie.en.srt").exists());
        assert_eq!(fs::read_to_string(target).unwrap(), "subtitle");
    }

    #[test]
    fn test_missing_provider_file_is_rename_failure() {
        let dir = tempfile::tempdir().unwrap();

        let err = normalize(
            &candidate(dir.path(), "Movie"),
            &Language::parse("eng").unwrap(),
        )
        .unwrap_err();

        assert!(matches!(err, SubtidalError::RenameMissing(_)));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_non_english_suffix_used() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Pelicula.es.srt"), "subtitulo").unwrap();

        let target = normalize(
            &candidate(dir.path(), "Pelicula"),
            &Language::parse("spa").unwrap(),
        )
        .unwrap();

        assert_eq!(target, dir.path().join("Pelicula.srt"));
    }
}
