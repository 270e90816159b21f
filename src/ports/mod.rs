mod checksum_fetcher;

pub use checksum_fetcher::{ChecksumFetcher, HTTP_ERROR_SHA256, MISSING_SHA256};
