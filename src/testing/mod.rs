mod fake_checksum_fetcher;

pub use fake_checksum_fetcher::FakeChecksumFetcher;
