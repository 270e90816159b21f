//! Shared testing utilities for dockergen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const SYNC_GATEWAY_TEMPLATE: &str = "FROM {{ DOCKER_BASE_IMAGE }}\n\
ARG SYNC_GATEWAY_PACKAGE_URL={{ SYNC_GATEWAY_PACKAGE_URL }}\n\
ARG SYNC_GATEWAY_PACKAGE_FILENAME={{ SYNC_GATEWAY_PACKAGE_FILENAME }}\n";

pub const SANDBOX_TEMPLATE: &str = "FROM {{ DOCKER_BASE_IMAGE }}\n\
{% if CB_MULTIARCH %}ARG TARGETARCH\n{% endif %}\
ENV CB_VERSION={{ CB_VERSION }}\n";

pub const EDGE_SERVER_TEMPLATE: &str = "FROM {{ DOCKER_BASE_IMAGE }}\n\
ARG CB_RELEASE_URL={{ CB_RELEASE_URL }}\n\
ARG CB_PACKAGE_NAME={{ CB_PACKAGE_NAME }}\n";

/// An isolated docker repository layout with `generate/templates` and `generate/resources`.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a repository with no products set up.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        Self { root }
    }

    /// Create a repository with templates and resources for the products that
    /// need no checksum downloads.
    pub fn with_offline_products() -> Self {
        let ctx = Self::new();
        ctx.add_product("sync-gateway", "Dockerfile.centos.template", SYNC_GATEWAY_TEMPLATE);
        ctx.add_template("sync-gateway", "Dockerfile.ubuntu.template", SYNC_GATEWAY_TEMPLATE);
        ctx.add_product("server-sandbox", "Dockerfile.template", SANDBOX_TEMPLATE);
        ctx.add_product("couchbase-edge-server", "Dockerfile.template", EDGE_SERVER_TEMPLATE);
        ctx
    }

    /// Repository root passed as the CLI's base directory.
    pub fn base(&self) -> &Path {
        self.root.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Register a product: one template, a README and an entrypoint script.
    pub fn add_product(&self, product: &str, template: &str, content: &str) {
        self.add_template(product, template, content);
        self.write(&format!("generate/resources/{}/README.md", product), "# docs\n");
        self.write(
            &format!("generate/resources/{}/scripts/entrypoint.sh", product),
            "#!/bin/sh\nexec \"$@\"\n",
        );
    }

    pub fn add_template(&self, product: &str, template: &str, content: &str) {
        self.write(&format!("generate/templates/{}/{}", product, template), content);
    }

    /// Create `<edition>/<product>/<version>` and return its path.
    pub fn add_version_dir(&self, edition: &str, product: &str, version: &str) -> PathBuf {
        let dir = self.path(&format!("{}/{}/{}", edition, product, version));
        fs::create_dir_all(&dir).expect("Failed to create version directory");
        dir
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        fs::create_dir_all(path.parent().expect("relative path has a parent"))
            .expect("Failed to create parent directory");
        fs::write(path, content).expect("Failed to write fixture file");
    }

    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    /// Build a command for invoking the compiled `dockergen` binary.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("dockergen").expect("Failed to locate dockergen binary");
        cmd.current_dir(self.base()).env("RUST_LOG", "warn");
        cmd
    }
}
