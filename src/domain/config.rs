//! Generator configuration models.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{
    AppError, Edition, Product, ProductVersionFilter, VersionCustomization, VersionCustomizations,
};

/// Contents of `generate/dockergen.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Package overrides keyed by `product_edition_version`.
    #[serde(default)]
    pub customizations: BTreeMap<String, VersionCustomization>,
    /// Batch skip patterns keyed by product directory name.
    #[serde(default)]
    pub skip: BTreeMap<String, String>,
}

impl GeneratorConfig {
    /// Validate the file and layer it over the built-in defaults.
    pub fn into_settings(self) -> Result<GeneratorSettings, AppError> {
        for key in self.customizations.keys() {
            validate_customization_key(key)?;
        }

        let mut customizations = VersionCustomizations::builtin();
        customizations.extend(self.customizations);

        let mut skip_filter = ProductVersionFilter::builtin();
        for (product, pattern) in &self.skip {
            let product = product.parse::<Product>()?;
            skip_filter.insert(product, pattern)?;
        }

        Ok(GeneratorSettings { customizations, skip_filter })
    }
}

/// Immutable lookup data handed to the resolver and batch scanner.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    pub customizations: VersionCustomizations,
    pub skip_filter: ProductVersionFilter,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            customizations: VersionCustomizations::builtin(),
            skip_filter: ProductVersionFilter::builtin(),
        }
    }
}

pub fn parse_config_content(content: &str) -> Result<GeneratorConfig, AppError> {
    Ok(toml::from_str(content)?)
}

fn validate_customization_key(key: &str) -> Result<(), AppError> {
    let mut parts = key.splitn(3, '_');
    let (Some(product), Some(edition), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(AppError::config_error(format!(
            "customization key '{}' must be product_edition_version",
            key
        )));
    };

    product.parse::<Product>()?;
    // Lookups build keys from the lowercase directory name.
    if edition.parse::<Edition>()?.dir_name() != edition {
        return Err(AppError::config_error(format!(
            "customization key '{}' must use a lowercase edition",
            key
        )));
    }
    if version.is_empty() {
        return Err(AppError::config_error(format!("customization key '{}' has no version", key)));
    }
    Ok(())
}
