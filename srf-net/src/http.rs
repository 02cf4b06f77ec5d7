// srf-net/src/http.rs
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header::{HeaderMap, ACCEPT, USER_AGENT};
use reqwest::{Client, Response, StatusCode};
use srf_common::error::{Result, SrfError};
use srf_common::model::{Artifact, CandidateSource};
use tokio::fs::File as TokioFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::transport::Transport;
use crate::validation::validate_url;

const CONNECT_TIMEOUT_SECS: u64 = 30;
const MIRROR_TIMEOUT_SECS: u64 = 30;
const USER_AGENT_STRING: &str = "srf model fetcher (Rust; +https://github.com/srf-tools/srf)";

/// Cookie name prefix the share host sets when a file is too large for
/// its virus-scan preview and an explicit confirmation is required.
const INTERSTITIAL_COOKIE_PREFIX: &str = "download_warning";

pub fn build_http_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, USER_AGENT_STRING.parse().unwrap());
    headers.insert(ACCEPT, "*/*".parse().unwrap());
    Client::builder()
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .default_headers(headers)
        .redirect(reqwest::redirect::Policy::limited(10))
        .cookie_store(true)
        .build()
        .map_err(|e| SrfError::HttpError(format!("Failed to build HTTP client: {e}")))
}

async fn stream_to_file(response: Response, dest: &Path) -> Result<u64> {
    let mut file = TokioFile::create(dest).await.map_err(|e| {
        SrfError::IoError(format!("Failed to create file {}: {}", dest.display(), e))
    })?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk =
            chunk.map_err(|e| SrfError::HttpError(format!("Failed to read response body: {e}")))?;
        file.write_all(&chunk).await.map_err(|e| {
            SrfError::IoError(format!(
                "Failed to write download stream to {}: {}",
                dest.display(),
                e
            ))
        })?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(|e| {
        SrfError::IoError(format!("Failed to flush {}: {}", dest.display(), e))
    })?;
    debug!("Wrote {} bytes to {}", written, dest.display());
    Ok(written)
}

/// Session-based HTTP download that follows the share host's large-file
/// confirmation interstitial: a first GET may answer with a warning page
/// plus a confirmation cookie instead of the content, in which case the
/// request is reissued with the token appended.
pub struct DriveFetch {
    client: Client,
}

impl DriveFetch {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    fn interstitial_token(response: &Response) -> Option<String> {
        response
            .cookies()
            .find(|c| c.name().starts_with(INTERSTITIAL_COOKIE_PREFIX))
            .map(|c| c.value().to_string())
    }
}

#[async_trait]
impl Transport for DriveFetch {
    fn name(&self) -> &'static str {
        "drive-http"
    }

    fn supports(&self, candidate: &CandidateSource) -> bool {
        candidate.download_url().is_some()
    }

    async fn attempt(
        &self,
        artifact: &Artifact,
        candidate: &CandidateSource,
        dest: &Path,
    ) -> Result<()> {
        let url = candidate.download_url().ok_or_else(|| {
            SrfError::Generic(format!(
                "Candidate for '{}' has no download URL",
                artifact.name
            ))
        })?;

        debug!("GET {} for '{}'", url, artifact.name);
        let mut response = self.client.get(&url).send().await.map_err(|e| {
            SrfError::HttpError(format!("HTTP request failed for {url}: {e}"))
        })?;

        if let Some(token) = Self::interstitial_token(&response) {
            // Too large for the virus-scan preview; confirm and refetch.
            let confirm_url = candidate.confirm_url(&token).ok_or_else(|| {
                SrfError::Generic(format!(
                    "Interstitial token received for '{}' on a candidate without a file id",
                    artifact.name
                ))
            })?;
            debug!(
                "Interstitial warning for '{}', confirming with token",
                artifact.name
            );
            response = self.client.get(&confirm_url).send().await.map_err(|e| {
                SrfError::HttpError(format!("HTTP request failed for {confirm_url}: {e}"))
            })?;
        }

        let status = response.status();
        if !status.is_success() {
            return Err(SrfError::DownloadError(
                artifact.name.clone(),
                url,
                format!("HTTP error {status}"),
            ));
        }

        stream_to_file(response, dest).await?;
        Ok(())
    }
}

/// Last-resort strategy: probes the artifact's alternate direct URLs in
/// order, independent of which candidate identifier is being attempted.
pub struct MirrorProbe {
    client: Client,
}

impl MirrorProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for MirrorProbe {
    fn name(&self) -> &'static str {
        "mirror-probe"
    }

    async fn attempt(
        &self,
        artifact: &Artifact,
        _candidate: &CandidateSource,
        dest: &Path,
    ) -> Result<()> {
        if artifact.mirrors.is_empty() {
            return Err(SrfError::NotFound(format!(
                "No mirrors listed for '{}'",
                artifact.name
            )));
        }

        let mut last_error: Option<SrfError> = None;
        for mirror_url in &artifact.mirrors {
            if let Err(e) = validate_url(mirror_url) {
                debug!("Skipping invalid mirror URL {}: {}", mirror_url, e);
                last_error = Some(e);
                continue;
            }
            debug!("Probing mirror {} for '{}'", mirror_url, artifact.name);
            let response = self
                .client
                .get(mirror_url)
                .timeout(Duration::from_secs(MIRROR_TIMEOUT_SECS))
                .send()
                .await;
            match response {
                Ok(r) if r.status() == StatusCode::OK => {
                    stream_to_file(r, dest).await?;
                    return Ok(());
                }
                Ok(r) => {
                    debug!("Mirror {} answered {}", mirror_url, r.status());
                    last_error = Some(SrfError::HttpError(format!(
                        "HTTP error {} for URL {}",
                        r.status(),
                        mirror_url
                    )));
                }
                Err(e) => {
                    debug!("Mirror {} failed: {}", mirror_url, e);
                    last_error = Some(SrfError::HttpError(format!(
                        "HTTP request failed for {mirror_url}: {e}"
                    )));
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            SrfError::DownloadError(
                artifact.name.clone(),
                "mirrors".to_string(),
                "All mirror probes failed".to_string(),
            )
        }))
    }
}
