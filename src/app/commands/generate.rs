//! Dockerfile generation for a single variant and for the whole repository.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::app::AppContext;
use crate::domain::{
    AppError, DockerfileVariant, Edition, Product, VariantRequest, build_template_params,
};
use crate::ports::ChecksumFetcher;
use crate::services::resource_deployer::{CONFIG_DIR, SCRIPTS_DIR, deploy_readme, deploy_subdir};
use crate::services::template_renderer::write_dockerfile;

/// Version directories look like `3.0.25`, `7.6.0-staging` or `2.0.0-devbuild`.
static VERSION_DIR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9].*\.[0-9].*\.[0-9].*$").expect("version dir regex"));

/// Result of generating one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOutcome {
    pub dockerfile: PathBuf,
    /// False when an existing Dockerfile was kept and only the README refreshed.
    pub regenerated: bool,
}

/// Result of a batch run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub generated: Vec<PathBuf>,
    pub existing: Vec<PathBuf>,
    /// `edition/product/version` entries excluded by the skip filter.
    pub skipped: Vec<String>,
}

/// Parse repeated `KEY=VALUE` template arguments. The value may itself contain `=`.
pub fn parse_overrides(args: &[String]) -> Result<BTreeMap<String, String>, AppError> {
    let mut overrides = BTreeMap::new();
    for mapping in args {
        match mapping.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                overrides.insert(key.to_string(), value.to_string());
            }
            _ => return Err(AppError::InvalidOverride(mapping.clone())),
        }
    }
    Ok(overrides)
}

/// Resolve and generate one variant.
///
/// With `no_overwrite` an existing Dockerfile (and its scripts/config) is left
/// alone; the README is copied either way.
pub fn generate_one<C: ChecksumFetcher>(
    ctx: &AppContext<C>,
    request: VariantRequest,
    no_overwrite: bool,
) -> Result<GenerateOutcome, AppError> {
    let edition = request.edition;
    let product = request.product;
    let version = request.version.clone();

    DockerfileVariant::resolve(request)
        .and_then(|variant| generate_variant(ctx, &variant, no_overwrite))
        .map_err(|e| e.in_variant(edition.dir_name(), product.dir_name(), &version))
}

fn generate_variant<C: ChecksumFetcher>(
    ctx: &AppContext<C>,
    variant: &DockerfileVariant,
    no_overwrite: bool,
) -> Result<GenerateOutcome, AppError> {
    let target_dir = variant.target_dir(ctx.base_dir());
    let dockerfile = variant.dockerfile(ctx.base_dir());
    let resources = ctx.resources_dir(variant.product.dir_name());

    let regenerated = if no_overwrite && dockerfile.exists() {
        log::info!("{} exists, not regenerating...", dockerfile.display());
        false
    } else {
        write_variant_dockerfile(ctx, variant, &dockerfile)?;
        deploy_subdir(&resources, SCRIPTS_DIR, &target_dir)?;
        deploy_subdir(&resources, CONFIG_DIR, &target_dir)?;
        true
    };

    // README is refreshed even when the Dockerfile is kept.
    deploy_readme(&resources, &target_dir)?;

    Ok(GenerateOutcome { dockerfile, regenerated })
}

fn write_variant_dockerfile<C: ChecksumFetcher>(
    ctx: &AppContext<C>,
    variant: &DockerfileVariant,
    dockerfile: &Path,
) -> Result<(), AppError> {
    let template =
        ctx.templates_dir(variant.product.dir_name()).join(&variant.template_filename);

    log::info!(
        "Generating {} {} {} from {}",
        variant.edition,
        variant.product,
        variant.version,
        template.display()
    );
    log::debug!("Variant: {:?}", variant);

    let params =
        build_template_params(variant, &ctx.settings().customizations, ctx.checksums());
    log::debug!("Template parameters: {:?}", params);

    write_dockerfile(&template, dockerfile, &params)?;
    log::info!("Wrote {}", dockerfile.display());
    Ok(())
}

/// Version directory names under `dir`, sorted. A missing directory has none.
pub fn version_subdirectories(dir: &Path) -> Result<Vec<String>, AppError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut versions = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if VERSION_DIR.is_match(name) {
                versions.push(name.to_string());
            }
        }
    }
    versions.sort();
    Ok(versions)
}

/// Generate every missing Dockerfile under `<base>/<edition>/<product>/<version>`.
///
/// Stops at the first failing variant.
pub fn generate_all<C: ChecksumFetcher>(ctx: &AppContext<C>) -> Result<BatchSummary, AppError> {
    let mut summary = BatchSummary::default();

    for edition in Edition::ALL {
        for product in Product::ALL {
            let dir = ctx.base_dir().join(edition.dir_name()).join(product.dir_name());

            for version in version_subdirectories(&dir)? {
                if ctx.settings().skip_filter.matches(product, &version) {
                    log::info!("Skipping generation for {} {} {}", product, edition, version);
                    summary.skipped.push(format!("{}/{}/{}", edition, product, version));
                    continue;
                }

                let request = VariantRequest {
                    edition,
                    product,
                    version,
                    output_dir: None,
                    overrides: BTreeMap::new(),
                };
                let outcome = generate_one(ctx, request, true)?;
                if outcome.regenerated {
                    summary.generated.push(outcome.dockerfile);
                } else {
                    summary.existing.push(outcome.dockerfile);
                }
            }
        }
    }

    Ok(summary)
}
