// src/documents/client.rs
use crate::utils::error::FetchError;
use reqwest::header;

const SCRAPER_USER_AGENT: &str = concat!("standards_scraper/", env!("CARGO_PKG_VERSION"));

/// Creates a reqwest client for downloading the standards documents.
/// No timeout is set; the transport defaults apply.
fn build_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(SCRAPER_USER_AGENT)
        .build()
}

/// Downloads a PDF document and returns its raw bytes.
/// Any non-success status is fatal; there is no retry.
pub async fn download_pdf(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = build_client()?;

    tracing::info!("Downloading document from: {}", url);
    tracing::debug!("Using User-Agent: {}", SCRAPER_USER_AGENT);

    let response = client.get(url)
        .header(header::ACCEPT, "application/pdf,*/*")
        .send()
        .await?; // Propagates reqwest::Error as FetchError::Network

    let status = response.status();
    if !status.is_success() {
        tracing::error!("HTTP error status: {} for URL: {}", status, url);
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(FetchError::DocumentNotFound(url.to_string()));
        }
        return Err(FetchError::Http(status));
    }

    let body = response.bytes().await?;
    tracing::debug!("Successfully downloaded {} bytes from {}", body.len(), url);

    Ok(body.to_vec())
}
