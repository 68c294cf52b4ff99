//! Song download operations for the music site.

use crate::error::{Result, SiteClientError};
use crate::types::{DownloadPlan, DownloadRequest, DownloadedFile};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};

/// Download client for the music site.
pub struct DownloadClient {
    http: Client,
    base_url: String,
}

impl DownloadClient {
    pub(crate) fn new(http: Client, base_url: String) -> Self {
        Self { http, base_url }
    }

    /// Resolve how a song will be fetched.
    ///
    /// Songs with a site id go through the tracked download endpoint;
    /// songs without one are fetched straight from their audio URL.
    pub fn plan(&self, request: &DownloadRequest) -> DownloadPlan {
        let file_name = download_file_name(&request.title, &request.artist);

        match &request.song_id {
            Some(id) => DownloadPlan {
                url: format!("{}/download-song/{}/", self.base_url, id),
                file_name,
                tracked: true,
            },
            None => DownloadPlan {
                url: request.audio_url.clone(),
                file_name,
                tracked: false,
            },
        }
    }

    /// Download a song into the given directory.
    ///
    /// The file name is synthesized from the song title and artist; the
    /// directory is created if it does not exist.
    pub async fn download_to_dir(
        &self,
        request: &DownloadRequest,
        dest_dir: &Path,
    ) -> Result<DownloadedFile> {
        let plan = self.plan(request);
        debug!(url = %plan.url, file = %plan.file_name, tracked = plan.tracked, "Downloading song");

        let response = self
            .http
            .get(&plan.url)
            .send()
            .await
            .map_err(SiteClientError::from_send)?;

        let status = response.status();

        if !status.is_success() {
            if status.as_u16() == 404 {
                return Err(SiteClientError::ServerError {
                    status: 404,
                    message: format!("Song not found: {}", request.title),
                });
            }
            let error_text = response.text().await.unwrap_or_default();
            return Err(SiteClientError::ServerError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        tokio::fs::create_dir_all(dest_dir).await?;

        let dest_path = dest_dir.join(&plan.file_name);
        let mut file = File::create(&dest_path).await?;
        let mut downloaded: u64 = 0;

        // Stream the response body
        let mut stream = response.bytes_stream();

        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
            downloaded += chunk.len() as u64;
        }

        file.flush().await?;

        info!(
            dest = %dest_path.display(),
            size = downloaded,
            tracked = plan.tracked,
            "Song downloaded"
        );

        Ok(DownloadedFile {
            path: dest_path,
            file_name: plan.file_name,
            bytes: downloaded,
            tracked: plan.tracked,
        })
    }
}

/// Build a download file name from song metadata.
///
/// Characters that break paths on common filesystems are replaced
/// with underscores.
fn download_file_name(title: &str, artist: &str) -> String {
    let name = format!("{} - {}.mp3", title, artist);
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}
