//! Checksum source port definition.

/// Placeholder written when the checksum file cannot be fetched or the
/// server does not answer 200.
pub const MISSING_SHA256: &str = "MISSING_SHA256_ERROR";

/// Placeholder written when the checksum response body is unusable.
pub const HTTP_ERROR_SHA256: &str = "HTTP_ERROR";

/// Port for looking up published package checksums.
///
/// Implementations never fail: any problem yields one of the placeholder
/// strings above so generation continues and the value can be patched by hand.
pub trait ChecksumFetcher {
    /// Fetch `url` (a `.sha256` file) and return the digest it contains.
    fn fetch_sha256(&self, url: &str) -> String;
}

