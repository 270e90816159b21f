use std::fmt;
use std::str::FromStr;

use crate::domain::AppError;

/// Products that have Docker images in the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Product {
    Server,
    SyncGateway,
    Sandbox,
    Columnar,
    EdgeServer,
    EnterpriseAnalytics,
}

impl Product {
    /// All products in batch generation order.
    pub const ALL: [Product; 6] = [
        Product::Server,
        Product::SyncGateway,
        Product::Sandbox,
        Product::Columnar,
        Product::EdgeServer,
        Product::EnterpriseAnalytics,
    ];

    /// Directory name for this product, also used in package names and URLs.
    pub fn dir_name(&self) -> &'static str {
        match self {
            Product::Server => "couchbase-server",
            Product::SyncGateway => "sync-gateway",
            Product::Sandbox => "server-sandbox",
            Product::Columnar => "couchbase-columnar",
            Product::EdgeServer => "couchbase-edge-server",
            Product::EnterpriseAnalytics => "enterprise-analytics",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Product> {
        Product::ALL.into_iter().find(|product| product.dir_name() == name)
    }
}

impl FromStr for Product {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Product::from_dir_name(s).ok_or_else(|| AppError::UnknownProduct(s.to_string()))
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Packaging edition of a product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Edition {
    Community,
    Enterprise,
}

impl Edition {
    /// All editions in batch generation order.
    pub const ALL: [Edition; 2] = [Edition::Community, Edition::Enterprise];

    pub fn dir_name(&self) -> &'static str {
        match self {
            Edition::Community => "community",
            Edition::Enterprise => "enterprise",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Edition> {
        match name.to_lowercase().as_str() {
            "community" => Some(Edition::Community),
            "enterprise" => Some(Edition::Enterprise),
            _ => None,
        }
    }
}

impl FromStr for Edition {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Edition::from_dir_name(s).ok_or_else(|| AppError::UnknownEdition(s.to_string()))
    }
}

impl fmt::Display for Edition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Docker's architecture names.
///
/// `Generic` renders as `@@ARCH@@`, which the Dockerfile replaces with the
/// real architecture at image build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Amd64,
    Arm64,
    Generic,
}

impl Arch {
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::Amd64 => "amd64",
            Arch::Arm64 => "arm64",
            Arch::Generic => "@@ARCH@@",
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
