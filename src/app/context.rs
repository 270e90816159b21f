use std::path::{Path, PathBuf};

use crate::domain::GeneratorSettings;
use crate::ports::ChecksumFetcher;

const GENERATE_DIR: &str = "generate";
const TEMPLATES_DIR: &str = "templates";
const RESOURCES_DIR: &str = "resources";

/// Application context holding dependencies for command execution.
pub struct AppContext<C: ChecksumFetcher> {
    base_dir: PathBuf,
    settings: GeneratorSettings,
    checksums: C,
}

impl<C: ChecksumFetcher> AppContext<C> {
    /// Create a new application context rooted at the repository's base directory.
    pub fn new(base_dir: impl Into<PathBuf>, settings: GeneratorSettings, checksums: C) -> Self {
        Self { base_dir: base_dir.into(), settings, checksums }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    pub fn checksums(&self) -> &C {
        &self.checksums
    }

    /// `<base>/generate/templates/<product>`
    pub fn templates_dir(&self, product: &str) -> PathBuf {
        self.base_dir.join(GENERATE_DIR).join(TEMPLATES_DIR).join(product)
    }

    /// `<base>/generate/resources/<product>`
    pub fn resources_dir(&self, product: &str) -> PathBuf {
        self.base_dir.join(GENERATE_DIR).join(RESOURCES_DIR).join(product)
    }
}

/// Default location of the optional generator config file.
pub fn default_config_path(base_dir: &Path) -> PathBuf {
    base_dir.join(GENERATE_DIR).join("dockergen.toml")
}
