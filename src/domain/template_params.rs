//! Values substituted into a product's Dockerfile template.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::resolver::{
    extra_dependencies, resolve_base_image, resolve_package_filename, resolve_release_url,
    resolve_sync_gateway_package_url, server_package_command, server_package_name,
    systemd_workaround, version_with_substitutions,
};
use crate::domain::{Arch, DockerfileVariant, Product, VersionCustomizations};
use crate::ports::ChecksumFetcher;

/// A template value; templates see strings and booleans only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TemplateValue {
    Text(String),
    Flag(bool),
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<bool> for TemplateValue {
    fn from(value: bool) -> Self {
        TemplateValue::Flag(value)
    }
}

impl fmt::Display for TemplateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateValue::Text(text) => f.write_str(text),
            TemplateValue::Flag(flag) => write!(f, "{}", flag),
        }
    }
}

/// Template variable name to value, serialized as the template context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TemplateParams(BTreeMap<String, TemplateValue>);

impl TemplateParams {
    pub fn set<K: Into<String>, V: Into<TemplateValue>>(&mut self, key: K, value: V) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&TemplateValue> {
        self.0.get(key)
    }

    /// Text value for `key`; `None` for missing keys and flags.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.0.get(key) {
            Some(TemplateValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key) {
            Some(TemplateValue::Flag(flag)) => Some(*flag),
            _ => None,
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Compute the parameters for a variant and apply its user overrides last.
///
/// Only server templates carry checksums, so `checksums` is consulted for
/// server variants alone.
pub fn build_template_params(
    variant: &DockerfileVariant,
    customizations: &VersionCustomizations,
    checksums: &dyn ChecksumFetcher,
) -> TemplateParams {
    let product = variant.product;
    let version = &variant.version;
    let number = version.number();
    let package = |arch: Arch| {
        resolve_package_filename(product, variant.edition, version, arch, customizations)
            .unwrap_or_default()
    };
    let release_url = resolve_release_url(product, version, variant.is_staging);
    let base_image = resolve_base_image(product, version);

    let mut params = TemplateParams::default();
    match product {
        Product::Server => {
            let sha256 = |arch: Arch| {
                checksums.fetch_sha256(&format!("{}/{}.sha256", release_url, package(arch)))
            };
            params.set("CB_VERSION", version_with_substitutions(product, version));
            params.set("CB_PACKAGE", package(Arch::Generic));
            params.set("CB_PACKAGE_NAME", server_package_name(variant.edition));
            params.set("CB_EXTRA_DEPS", extra_dependencies(product, number));
            params.set("CB_SHA256_arm64", sha256(Arch::Arm64));
            params.set("CB_SHA256_amd64", sha256(Arch::Amd64));
            params.set("CB_RELEASE_URL", release_url.as_str());
            params.set("DOCKER_BASE_IMAGE", base_image);
            params.set("PKG_COMMAND", server_package_command());
            params.set("SYSTEMD_WORKAROUND", systemd_workaround(product, number));
            params.set("CB_MULTIARCH", variant.is_multiarch());
            params.set("CB_SKIP_CHECKSUM", "false");
        }
        Product::SyncGateway => {
            params.set(
                "SYNC_GATEWAY_PACKAGE_URL",
                resolve_sync_gateway_package_url(
                    variant.edition,
                    version,
                    variant.is_staging,
                    customizations,
                ),
            );
            params.set("SYNC_GATEWAY_PACKAGE_FILENAME", package(Arch::Generic));
            params.set("DOCKER_BASE_IMAGE", base_image);
        }
        Product::Sandbox => {
            params.set("CB_VERSION", version_with_substitutions(product, version));
            params.set("DOCKER_BASE_IMAGE", base_image);
            params.set("CB_MULTIARCH", variant.is_multiarch());
        }
        Product::Columnar | Product::EnterpriseAnalytics => {
            params.set("CB_VERSION", version_with_substitutions(product, version));
            params.set("CB_PACKAGE", package(Arch::Generic));
            params.set("CB_RELEASE_URL", release_url.as_str());
            params.set("DOCKER_BASE_IMAGE", base_image);
            params.set("CB_MULTIARCH", variant.is_multiarch());
        }
        Product::EdgeServer => {
            params.set("CB_RELEASE_URL", release_url.as_str());
            params.set("CB_PACKAGE_NAME", package(Arch::Generic));
            params.set("DOCKER_BASE_IMAGE", base_image);
        }
    }

    for (key, value) in &variant.template_overrides {
        params.set(key.as_str(), value.as_str());
    }

    params
}
