//! Muse Site Client
//!
//! HTTP client library for the music site API: play tracking, download
//! analytics, and song downloads.
//!
//! # Features
//!
//! - **Play tracking**: Count plays with anonymous fallback and
//!   premium-restriction handling
//! - **Download analytics**: Report every download attempt with song
//!   metadata and a timestamp
//! - **Downloads**: Stream song files to disk, through the site's
//!   counted endpoint or straight from the audio URL
//!
//! # Example
//!
//! ```ignore
//! use muse_site_client::{MusicSiteClient, SiteConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client
//!     let config = SiteConfig::with_csrf_token("https://music.example.com", "token");
//!     let client = MusicSiteClient::new(config)?;
//!
//!     // Count a play
//!     let outcome = client.tracking().await.track_play("42").await?;
//!     println!("Play outcome: {:?}", outcome);
//!
//!     // Check the play count
//!     let plays = client.tracking().await.song_plays("42").await?;
//!     println!("{} has {} plays", plays.title, plays.plays);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod download;
mod error;
mod tracking;
mod types;

// Re-export main types
pub use client::MusicSiteClient;
pub use error::{Result, SiteClientError};
pub use types::{
    DownloadPlan, DownloadReport, DownloadRequest, DownloadedFile, PlayOutcome, SiteConfig,
    SongPlays,
};

// Re-export sub-clients for direct use if needed
pub use download::DownloadClient;
pub use tracking::TrackingClient;
