//! Subtidal - Batch Subtitle Downloader
//!
//! A Rust implementation of a batch subtitle fetcher: walks a media folder,
//! finds video files without a matching subtitle, downloads the best match
//! from subtitle providers, and renames it to pair with the video.

pub mod acquire;
pub mod cli;
pub mod config;
pub mod error;
pub mod identity;
pub mod language;
pub mod normalize;
pub mod provider;
pub mod scan;
pub mod workflow;
