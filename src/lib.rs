//! dockergen: generate per-version Couchbase Dockerfiles from product templates.

pub mod app;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
pub(crate) mod testing;

use std::path::Path;

use app::AppContext;
use app::config::load_settings;
use services::HttpChecksumFetcher;

pub use app::commands::generate::{BatchSummary, GenerateOutcome, parse_overrides};
pub use domain::{AppError, Arch, Edition, Product, VariantRequest};

/// Generate a single variant under `base_dir`, overwriting any existing Dockerfile.
///
/// Checksums are fetched over HTTP; `config` defaults to
/// `<base_dir>/generate/dockergen.toml` when that file exists.
pub fn generate(
    base_dir: &Path,
    config: Option<&Path>,
    request: VariantRequest,
) -> Result<GenerateOutcome, AppError> {
    let settings = load_settings(base_dir, config)?;
    let ctx = AppContext::new(base_dir, settings, HttpChecksumFetcher::new()?);
    app::commands::generate::generate_one(&ctx, request, false)
}

/// Generate every missing Dockerfile in the repository rooted at `base_dir`.
pub fn generate_all(base_dir: &Path, config: Option<&Path>) -> Result<BatchSummary, AppError> {
    let settings = load_settings(base_dir, config)?;
    let ctx = AppContext::new(base_dir, settings, HttpChecksumFetcher::new()?);
    app::commands::generate::generate_all(&ctx)
}
