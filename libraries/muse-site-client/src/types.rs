//! Types for music site API requests and responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for connecting to a music site.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Base URL of the site (e.g., "https://music.example.com")
    pub base_url: String,
    /// CSRF token attached to mutating requests (if available)
    pub csrf_token: Option<String>,
}

impl SiteConfig {
    /// Create a new site config with just the base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token: None,
        }
    }

    /// Create a config with a CSRF token for authenticated calls.
    pub fn with_csrf_token(base_url: impl Into<String>, csrf_token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            csrf_token: Some(csrf_token.into()),
        }
    }
}

// =============================================================================
// Play Tracking Types
// =============================================================================

/// Outcome of a play-tracking call.
///
/// A premium restriction is a normal outcome: the site refused to count
/// the play, but nothing went wrong on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Play counted against the authenticated listener.
    Counted { plays: u64 },
    /// Play counted anonymously after a 401 fallback.
    Anonymous { plays: u64 },
    /// Site refused to count the play for non-premium listeners.
    PremiumRestricted {
        can_preview: bool,
        preview_duration: u32,
    },
}

/// Body of a successful play-tracking response.
#[derive(Debug, Deserialize)]
pub struct PlayCountedResponse {
    pub plays: u64,
}

/// Body of a 403 premium-restriction response.
#[derive(Debug, Deserialize)]
pub struct PremiumRestrictedResponse {
    pub error: String,
    #[serde(default)]
    pub can_preview: bool,
    #[serde(default)]
    pub preview_duration: u32,
}

/// Play count for a single song.
#[derive(Debug, Clone, Deserialize)]
pub struct SongPlays {
    pub plays: u64,
    pub title: String,
}

/// Request body for the play-duration endpoint.
#[derive(Debug, Serialize)]
pub struct PlayDurationRequest {
    /// Whole seconds the song was actually played
    pub duration_played: u64,
}

// =============================================================================
// Download Types
// =============================================================================

/// What to download and how to name the result.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Site id of the song, when it has one. Songs without an id are
    /// fetched straight from their audio URL.
    pub song_id: Option<String>,
    pub title: String,
    pub artist: String,
    pub audio_url: String,
}

/// Resolved download: which URL will be fetched and what the file will
/// be called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadPlan {
    pub url: String,
    pub file_name: String,
    /// True when the fetch goes through the site's counted endpoint.
    pub tracked: bool,
}

/// A download that finished successfully.
#[derive(Debug, Clone)]
pub struct DownloadedFile {
    pub path: PathBuf,
    pub file_name: String,
    pub bytes: u64,
    pub tracked: bool,
}

/// Analytics report posted after every download attempt.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReport {
    pub song_id: Option<String>,
    pub song_title: String,
    pub artist_name: String,
    /// ISO-8601 UTC timestamp of the attempt
    pub timestamp: DateTime<Utc>,
}

impl DownloadReport {
    /// Build a report for a download request, stamped with the current
    /// time.
    pub fn new(request: &DownloadRequest) -> Self {
        Self {
            song_id: request.song_id.clone(),
            song_title: request.title.clone(),
            artist_name: request.artist.clone(),
            timestamp: Utc::now(),
        }
    }
}
