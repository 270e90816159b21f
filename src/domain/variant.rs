use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::domain::resolver::{resolve_architectures, resolve_template_filename};
use crate::domain::{AppError, Arch, Edition, Product, ReleaseVersion};

pub const STAGING_SUFFIX: &str = "-staging";
pub const DOCKERFILE: &str = "Dockerfile";

/// What the caller asked for: one `edition/product/version` directory.
#[derive(Debug, Clone)]
pub struct VariantRequest {
    pub edition: Edition,
    pub product: Product,
    /// Version directory name, optionally ending in `-staging`.
    pub version: String,
    /// Write here instead of the conventional `<base>/<edition>/<product>/<version>`.
    pub output_dir: Option<PathBuf>,
    pub overrides: BTreeMap<String, String>,
}

/// One Dockerfile to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileVariant {
    pub edition: Edition,
    pub product: Product,
    /// The real product version as seen in download URLs and package names.
    pub version: ReleaseVersion,
    /// Version of the Docker image, i.e. the directory name in the repository.
    /// Almost always equal to `version`.
    pub target_version: String,
    pub template_filename: String,
    pub arches: Vec<Arch>,
    pub is_staging: bool,
    pub output_dir: Option<PathBuf>,
    pub template_overrides: BTreeMap<String, String>,
}

impl DockerfileVariant {
    /// Resolve the variant for a request. Fails only on an unparseable version.
    pub fn resolve(request: VariantRequest) -> Result<Self, AppError> {
        let is_staging = request.version.ends_with(STAGING_SUFFIX);
        let target_version = request
            .version
            .strip_suffix(STAGING_SUFFIX)
            .unwrap_or(request.version.as_str())
            .to_string();
        let mut version = ReleaseVersion::parse(&target_version)?;
        let number = version.number();

        // 7.0.3 images install 7.0.3-MP1, which carries the full Log4Shell fix.
        if request.product == Product::Server && target_version == "7.0.3" {
            version = ReleaseVersion::parse("7.0.3-MP1")?;
        }

        Ok(Self {
            edition: request.edition,
            product: request.product,
            version,
            target_version,
            template_filename: resolve_template_filename(request.product, number).to_string(),
            arches: resolve_architectures(request.product, number),
            is_staging,
            output_dir: request.output_dir,
            template_overrides: request.overrides,
        })
    }

    pub fn is_multiarch(&self) -> bool {
        self.arches.len() > 1
    }

    /// Directory receiving the Dockerfile and resources.
    pub fn target_dir(&self, base_dir: &Path) -> PathBuf {
        if let Some(dir) = &self.output_dir {
            return dir.clone();
        }

        let mut version = self.target_version.clone();
        if self.is_staging {
            version.push_str(STAGING_SUFFIX);
        }
        base_dir.join(self.edition.dir_name()).join(self.product.dir_name()).join(version)
    }

    pub fn dockerfile(&self, base_dir: &Path) -> PathBuf {
        self.target_dir(base_dir).join(DOCKERFILE)
    }
}
