//! Play tracking and analytics calls for the music site.

use crate::client::CSRF_HEADER;
use crate::error::{Result, SiteClientError};
use crate::types::{
    DownloadReport, PlayCountedResponse, PlayDurationRequest, PlayOutcome,
    PremiumRestrictedResponse, SongPlays,
};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Tracking client for the music site.
///
/// All calls here are analytics: best-effort, no retries. Use the
/// `*_logged` variants when the caller should never see a failure.
pub struct TrackingClient {
    http: Client,
    base_url: String,
    csrf_token: Option<String>,
}

impl TrackingClient {
    pub(crate) fn new(http: Client, base_url: String, csrf_token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            csrf_token,
        }
    }

    /// Count a play of the given song.
    ///
    /// Tries the authenticated endpoint first; a 401 falls back to the
    /// anonymous endpoint. A premium restriction comes back as a normal
    /// outcome, not an error.
    pub async fn track_play(&self, song_id: &str) -> Result<PlayOutcome> {
        let url = format!("{}/play-song/{}/", self.base_url, song_id);
        debug!(url = %url, song_id = %song_id, "Tracking play");

        let response = self
            .post(&url)
            .send()
            .await
            .map_err(SiteClientError::from_send)?;

        if response.status().as_u16() == 401 {
            debug!(song_id = %song_id, "Play endpoint returned 401, trying anonymous tracking");
            return self.track_play_anonymous(song_id).await;
        }

        self.read_play_outcome(response, false).await
    }

    /// Count an anonymous play of the given song.
    pub async fn track_play_anonymous(&self, song_id: &str) -> Result<PlayOutcome> {
        let url = format!("{}/api/track-anonymous-play/{}/", self.base_url, song_id);
        debug!(url = %url, song_id = %song_id, "Tracking anonymous play");

        let response = self
            .post(&url)
            .send()
            .await
            .map_err(SiteClientError::from_send)?;

        self.read_play_outcome(response, true).await
    }

    /// Count a play, logging the outcome instead of returning it.
    ///
    /// Playback never waits on tracking or fails because of it.
    pub async fn track_play_logged(&self, song_id: &str) {
        match self.track_play(song_id).await {
            Ok(PlayOutcome::Counted { plays }) => {
                debug!(song_id = %song_id, plays = plays, "Play counted");
            }
            Ok(PlayOutcome::Anonymous { plays }) => {
                debug!(song_id = %song_id, plays = plays, "Anonymous play counted");
            }
            Ok(PlayOutcome::PremiumRestricted {
                can_preview,
                preview_duration,
            }) => {
                info!(
                    song_id = %song_id,
                    can_preview = can_preview,
                    preview_duration = preview_duration,
                    "Play not counted: premium restriction"
                );
            }
            Err(e) => {
                warn!(song_id = %song_id, error = %e, "Play tracking failed");
            }
        }
    }

    /// Report a completed or attempted download.
    pub async fn report_download(&self, report: &DownloadReport) -> Result<()> {
        let url = format!("{}/api/track-download/", self.base_url);
        debug!(url = %url, song_title = %report.song_title, "Reporting download");

        let response = self
            .post(&url)
            .json(report)
            .send()
            .await
            .map_err(SiteClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SiteClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Report a download, logging failures instead of returning them.
    pub async fn report_download_logged(&self, report: &DownloadReport) {
        if let Err(e) = self.report_download(report).await {
            warn!(song_title = %report.song_title, error = %e, "Download report failed");
        }
    }

    /// Report how long a song was actually played.
    ///
    /// Duration is truncated to whole seconds.
    pub async fn report_play_duration(&self, song_id: &str, played: Duration) -> Result<()> {
        let url = format!("{}/api/update-play-duration/{}/", self.base_url, song_id);
        let body = PlayDurationRequest {
            duration_played: played.as_secs(),
        };
        debug!(url = %url, song_id = %song_id, seconds = body.duration_played, "Reporting play duration");

        let response = self
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(SiteClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SiteClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Get the play count for a song.
    pub async fn song_plays(&self, song_id: &str) -> Result<SongPlays> {
        let url = format!("{}/api/get-song-plays/{}/", self.base_url, song_id);
        debug!(url = %url, song_id = %song_id, "Fetching play count");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(SiteClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let plays: SongPlays = response.json().await.map_err(|e| {
                SiteClientError::ParseError(format!("Failed to parse play count: {}", e))
            })?;

            Ok(plays)
        } else if status.as_u16() == 404 {
            Err(SiteClientError::ServerError {
                status: 404,
                message: format!("Song not found: {}", song_id),
            })
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SiteClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// Interpret a play-tracking response, shared by the authenticated
    /// and anonymous endpoints.
    async fn read_play_outcome(&self, response: Response, anonymous: bool) -> Result<PlayOutcome> {
        let status = response.status();

        if status.is_success() {
            let counted: PlayCountedResponse = response.json().await.map_err(|e| {
                SiteClientError::ParseError(format!("Failed to parse play response: {}", e))
            })?;

            if anonymous {
                Ok(PlayOutcome::Anonymous {
                    plays: counted.plays,
                })
            } else {
                Ok(PlayOutcome::Counted {
                    plays: counted.plays,
                })
            }
        } else if status.as_u16() == 401 {
            Err(SiteClientError::AuthRequired)
        } else if status.as_u16() == 403 {
            let body = response.text().await.unwrap_or_default();
            match serde_json::from_str::<PremiumRestrictedResponse>(&body) {
                Ok(restricted) if restricted.error.contains("Premium") => {
                    Ok(PlayOutcome::PremiumRestricted {
                        can_preview: restricted.can_preview,
                        preview_duration: restricted.preview_duration,
                    })
                }
                _ => Err(SiteClientError::ServerError {
                    status: 403,
                    message: body,
                }),
            }
        } else {
            let message = response.text().await.unwrap_or_default();
            Err(SiteClientError::ServerError {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// POST builder with the CSRF header attached when a token is
    /// configured.
    fn post(&self, url: &str) -> RequestBuilder {
        let mut builder = self.http.post(url);
        if let Some(token) = &self.csrf_token {
            builder = builder.header(CSRF_HEADER, token);
        }
        builder
    }
}
