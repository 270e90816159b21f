//! Base OS release selection.

use std::ops::RangeInclusive;

use crate::domain::{Product, Version};

/// Ubuntu release used for anything newer than the ranges below.
pub const LATEST_UBUNTU: &str = "24.04";

/// Couchbase Server version ranges and the Ubuntu release each was built on.
///
/// Ranges are closed, ascending and non-overlapping. Lookup takes the first
/// match; versions outside every range use [`LATEST_UBUNTU`].
pub const SERVER_UBUNTU_RELEASES: [(RangeInclusive<Version>, &str); 6] = [
    (RangeInclusive::new(Version::new(4, 0, 0), Version::new(4, u32::MAX, u32::MAX)), "14.04"),
    (RangeInclusive::new(Version::new(5, 0, 0), Version::new(6, 0, 0)), "16.04"),
    (RangeInclusive::new(Version::new(6, 0, 1), Version::new(6, 6, 1)), "18.04"),
    (RangeInclusive::new(Version::new(6, 6, 2), Version::new(7, 1, 6)), "20.04"),
    (RangeInclusive::new(Version::new(7, 2, 0), Version::new(7, 2, 5)), "22.04"),
    (RangeInclusive::new(Version::new(7, 6, 0), Version::new(7, 6, 1)), "22.04"),
];

/// Ubuntu release tag for a product version.
pub fn ubuntu_release(product: Product, version: Version) -> &'static str {
    match product {
        Product::SyncGateway | Product::EdgeServer | Product::Columnar => "22.04",
        Product::EnterpriseAnalytics => "24.04",
        Product::Server | Product::Sandbox => server_ubuntu_release(version),
    }
}

fn server_ubuntu_release(version: Version) -> &'static str {
    SERVER_UBUNTU_RELEASES
        .iter()
        .find(|(range, _)| range.contains(&version))
        .map(|(_, release)| *release)
        .unwrap_or(LATEST_UBUNTU)
}
