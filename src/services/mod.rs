mod checksum_http;
pub mod resource_deployer;
pub mod template_renderer;

pub use checksum_http::HttpChecksumFetcher;
