use std::sync::{Arc, Mutex};

use crate::ports::ChecksumFetcher;

/// Answers every checksum request with the same digest and records the URLs asked for.
#[derive(Clone)]
pub struct FakeChecksumFetcher {
    pub requested_urls: Arc<Mutex<Vec<String>>>,
    pub digest: String,
}

impl FakeChecksumFetcher {
    pub fn with_digest(digest: impl Into<String>) -> Self {
        Self { requested_urls: Arc::new(Mutex::new(vec![])), digest: digest.into() }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested_urls.lock().unwrap().clone()
    }
}

impl ChecksumFetcher for FakeChecksumFetcher {
    fn fetch_sha256(&self, url: &str) -> String {
        self.requested_urls.lock().unwrap().push(url.to_string());
        self.digest.clone()
    }
}
