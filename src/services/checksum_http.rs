//! Checksum fetcher implementation using reqwest.

use reqwest::blocking::Client;

use crate::domain::AppError;
use crate::ports::{ChecksumFetcher, HTTP_ERROR_SHA256, MISSING_SHA256};

/// HTTP transport for published `.sha256` files.
///
/// One GET per call, client default timeout, no retries.
#[derive(Debug, Clone)]
pub struct HttpChecksumFetcher {
    client: Client,
}

impl HttpChecksumFetcher {
    pub fn new() -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::HttpClient(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

impl ChecksumFetcher for HttpChecksumFetcher {
    fn fetch_sha256(&self, url: &str) -> String {
        log::info!("Fetching {}", url);

        let response = match self.client.get(url).send() {
            Ok(response) if response.status().as_u16() == 200 => response,
            Ok(response) => {
                log::warn!("Error downloading SHA256 file {}: HTTP {}", url, response.status());
                return MISSING_SHA256.to_string();
            }
            Err(e) => {
                log::warn!("Error downloading SHA256 file {}: {}", url, e);
                return MISSING_SHA256.to_string();
            }
        };

        match response.text() {
            Ok(body) => match body.split_whitespace().next() {
                Some(digest) => digest.to_string(),
                None => {
                    log::warn!("SHA256 file {} is empty", url);
                    HTTP_ERROR_SHA256.to_string()
                }
            },
            Err(e) => {
                log::warn!("Error reading content of SHA256 file {}: {}", url, e);
                HTTP_ERROR_SHA256.to_string()
            }
        }
    }
}
