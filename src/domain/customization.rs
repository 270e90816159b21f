//! Per-version package overrides and batch skip filters.

use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::{AppError, Edition, Product};

/// Explicit package location for a build that predates the public release layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionCustomization {
    pub package_url: String,
    pub package_filename: String,
}

/// Customizations keyed by `product_edition_version`,
/// e.g. `sync-gateway_community_2.0.0-devbuild`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionCustomizations {
    entries: BTreeMap<String, VersionCustomization>,
}

impl VersionCustomizations {
    pub fn new(entries: BTreeMap<String, VersionCustomization>) -> Self {
        Self { entries }
    }

    /// The sync-gateway 2.0.0 developer builds served from the mobile package bucket.
    pub fn builtin() -> Self {
        let mut entries = BTreeMap::new();
        for edition in Edition::ALL {
            let filename = format!("couchbase-sync-gateway-{}_2.0.0-827_x86_64.rpm", edition);
            entries.insert(
                Self::key(Product::SyncGateway, edition, "2.0.0-devbuild"),
                VersionCustomization {
                    package_url: format!("http://cbmobile-packages.s3.amazonaws.com/{}", filename),
                    package_filename: filename,
                },
            );
        }
        Self { entries }
    }

    pub fn key(product: Product, edition: Edition, version: &str) -> String {
        format!("{}_{}_{}", product, edition, version)
    }

    pub fn get(
        &self,
        product: Product,
        edition: Edition,
        version: &str,
    ) -> Option<&VersionCustomization> {
        self.entries.get(&Self::key(product, edition, version))
    }

    /// Add or replace entries; keys from `other` win.
    pub fn extend(&mut self, other: BTreeMap<String, VersionCustomization>) {
        self.entries.extend(other);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Versions to leave alone in batch mode, one pattern per product.
#[derive(Debug, Clone, Default)]
pub struct ProductVersionFilter {
    patterns: BTreeMap<Product, Regex>,
}

impl ProductVersionFilter {
    /// Sync Gateway 1.x and 2.0.x are no longer regenerated.
    pub fn builtin() -> Self {
        let mut filter = Self::default();
        filter
            .insert(Product::SyncGateway, r"^(1\.|2\.0\.).+$")
            .expect("built-in skip pattern compiles");
        filter
    }

    /// Compile and set the pattern for a product, replacing any previous one.
    pub fn insert(&mut self, product: Product, pattern: &str) -> Result<(), AppError> {
        let regex = Regex::new(pattern).map_err(|e| AppError::InvalidSkipPattern {
            product: product.to_string(),
            details: e.to_string(),
        })?;
        self.patterns.insert(product, regex);
        Ok(())
    }

    /// True when the product has a pattern and the version matches it.
    pub fn matches(&self, product: Product, version: &str) -> bool {
        self.patterns.get(&product).is_some_and(|regex| regex.is_match(version))
    }
}
