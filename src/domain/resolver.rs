//! Product/version rules that feed the Dockerfile templates.
//!
//! Every function here is a pure lookup. Thresholds live in small tables so
//! each can be tested on its own.

use crate::domain::os_release::ubuntu_release;
use crate::domain::{Arch, Edition, Product, ReleaseVersion, Version, VersionCustomizations};

pub const RELEASES_HOST: &str = "https://packages.couchbase.com/releases";
pub const STAGING_RELEASES_HOST: &str = "http://packages-staging.couchbase.com/releases";

const SYNC_GATEWAY_PACKAGES: &str = "http://packages.couchbase.com/releases/couchbase-sync-gateway";
const SYNC_GATEWAY_STAGING_PACKAGES: &str =
    "http://packages-staging.couchbase.com/releases/couchbase-sync-gateway";

/// First version of each product that ships arm64 images. Products missing
/// from the table are amd64 only.
const ARM64_SINCE: [(Product, Version); 5] = [
    (Product::Server, Version::new(7, 1, 0)),
    (Product::Sandbox, Version::new(7, 1, 0)),
    (Product::SyncGateway, Version::new(3, 0, 4)),
    (Product::Columnar, Version::ZERO),
    (Product::EnterpriseAnalytics, Version::ZERO),
];

/// Last sync-gateway release packaged as an RPM on CentOS.
const SYNC_GATEWAY_LAST_CENTOS: Version = Version::new(3, 0, 3);

/// Server releases from here on publish a single `linux` package per arch.
const SERVER_LINUX_PACKAGES_SINCE: Version = Version::new(7, 1, 0);

const SERVER_BZIP2_SINCE: Version = Version::new(6, 5, 0);
const SERVER_NATIVE_SYSTEMD_SINCE: Version = Version::new(7, 0, 0);

pub const DEFAULT_TEMPLATE: &str = "Dockerfile.template";
const CENTOS_TEMPLATE: &str = "Dockerfile.centos.template";
const UBUNTU_TEMPLATE: &str = "Dockerfile.ubuntu.template";

/// Architectures the product publishes for this version; `amd64` always comes first.
pub fn resolve_architectures(product: Product, version: Version) -> Vec<Arch> {
    let mut arches = vec![Arch::Amd64];
    let supports_arm64 = ARM64_SINCE
        .iter()
        .find(|(candidate, _)| *candidate == product)
        .is_some_and(|(_, since)| version >= *since);
    if supports_arm64 {
        arches.push(Arch::Arm64);
    }
    arches
}

/// Template file under `generate/templates/<product>/`.
pub fn resolve_template_filename(product: Product, version: Version) -> &'static str {
    match product {
        Product::SyncGateway if version <= SYNC_GATEWAY_LAST_CENTOS => CENTOS_TEMPLATE,
        Product::SyncGateway => UBUNTU_TEMPLATE,
        _ => DEFAULT_TEMPLATE,
    }
}

pub fn resolve_base_image(product: Product, version: &ReleaseVersion) -> String {
    match product {
        Product::Sandbox => format!("couchbase/server:{}", version),
        Product::SyncGateway if version.as_str().contains("forestdb") => {
            "tleyden5iwx/forestdb".to_string()
        }
        Product::SyncGateway if version.number() <= SYNC_GATEWAY_LAST_CENTOS => {
            "centos:centos7".to_string()
        }
        _ => format!("ubuntu:{}", ubuntu_release(product, version.number())),
    }
}

/// Package file name for one architecture, or `None` for products that
/// install nothing themselves (the sandbox layers on a server image).
pub fn resolve_package_filename(
    product: Product,
    edition: Edition,
    version: &ReleaseVersion,
    arch: Arch,
    customizations: &VersionCustomizations,
) -> Option<String> {
    let filename = match product {
        Product::Server if version.number() >= SERVER_LINUX_PACKAGES_SINCE => {
            format!("{}-{}_{}-linux_{}.deb", product, edition, version, arch)
        }
        // No arm64 builds before the linux packages, so amd64 is fixed.
        Product::Server => format!(
            "{}-{}_{}-ubuntu{}_amd64.deb",
            product,
            edition,
            version,
            ubuntu_release(product, version.number())
        ),
        Product::SyncGateway => {
            if let Some(custom) = customizations.get(product, edition, version.as_str()) {
                return Some(custom.package_filename.clone());
            }
            let extension =
                if version.number() <= SYNC_GATEWAY_LAST_CENTOS { "rpm" } else { "deb" };
            format!(
                "couchbase-sync-gateway-{}_{}_{}.{}",
                edition,
                version,
                Arch::Generic,
                extension
            )
        }
        Product::Columnar => format!("{}-{}_{}-linux_{}.deb", product, edition, version, arch),
        Product::EnterpriseAnalytics => format!("{}_{}-linux_{}.deb", product, version, arch),
        Product::EdgeServer => format!("{}_{}_{}.deb", product, version, arch),
        Product::Sandbox => return None,
    };
    Some(filename)
}

/// Directory on the release host holding this version's packages.
pub fn resolve_release_url(product: Product, version: &ReleaseVersion, staging: bool) -> String {
    let host = if staging { STAGING_RELEASES_HOST } else { RELEASES_HOST };
    match product {
        Product::Server => format!("{}/{}", host, version),
        _ => format!("{}/{}/{}", host, product, version),
    }
}

/// Full download URL of the sync-gateway package.
pub fn resolve_sync_gateway_package_url(
    edition: Edition,
    version: &ReleaseVersion,
    staging: bool,
    customizations: &VersionCustomizations,
) -> String {
    if let Some(custom) = customizations.get(Product::SyncGateway, edition, version.as_str()) {
        return custom.package_url.clone();
    }
    let base = if staging { SYNC_GATEWAY_STAGING_PACKAGES } else { SYNC_GATEWAY_PACKAGES };
    let filename = resolve_package_filename(
        Product::SyncGateway,
        edition,
        version,
        Arch::Generic,
        customizations,
    )
    .unwrap_or_default();
    format!("{}/{}/{}", base, version, filename)
}

/// Version as rendered into `CB_VERSION`.
///
/// Sync-gateway feature builds such as `0.0.0-forestdb` are published under
/// `feature/forestdb`.
pub fn version_with_substitutions(product: Product, version: &ReleaseVersion) -> String {
    match (product, version.suffix()) {
        (Product::SyncGateway, "forestdb") => "feature/forestdb".to_string(),
        _ => version.to_string(),
    }
}

/// Debian name of the server package for the edition.
pub fn server_package_name(edition: Edition) -> &'static str {
    match edition {
        Edition::Community => "couchbase-server-community",
        Edition::Enterprise => "couchbase-server",
    }
}

pub fn extra_dependencies(product: Product, version: Version) -> &'static str {
    match product {
        Product::Server if version >= SERVER_BZIP2_SINCE => "bzip2",
        Product::Server => "python-httplib2",
        _ => "",
    }
}

pub fn systemd_workaround(product: Product, version: Version) -> bool {
    product == Product::Server && version < SERVER_NATIVE_SYSTEMD_SINCE
}

/// All server images are Ubuntu based.
pub fn server_package_command() -> &'static str {
    "apt-get"
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn rv(s: &str) -> ReleaseVersion {
        ReleaseVersion::parse(s).unwrap()
    }

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn arm64_thresholds() {
        assert_eq!(resolve_architectures(Product::Server, v("7.0.5")), vec![Arch::Amd64]);
        assert_eq!(
            resolve_architectures(Product::Server, v("7.1.0")),
            vec![Arch::Amd64, Arch::Arm64]
        );
        assert_eq!(resolve_architectures(Product::Sandbox, v("7.0.9")), vec![Arch::Amd64]);
        assert_eq!(
            resolve_architectures(Product::Sandbox, v("7.1.0")),
            vec![Arch::Amd64, Arch::Arm64]
        );
        assert_eq!(resolve_architectures(Product::SyncGateway, v("3.0.3")), vec![Arch::Amd64]);
        assert_eq!(
            resolve_architectures(Product::SyncGateway, v("3.0.4")),
            vec![Arch::Amd64, Arch::Arm64]
        );
        assert_eq!(
            resolve_architectures(Product::Columnar, v("1.0.0")),
            vec![Arch::Amd64, Arch::Arm64]
        );
        assert_eq!(
            resolve_architectures(Product::EnterpriseAnalytics, v("2.0.0")),
            vec![Arch::Amd64, Arch::Arm64]
        );
        assert_eq!(resolve_architectures(Product::EdgeServer, v("9.9.9")), vec![Arch::Amd64]);
    }

    fn version_strategy() -> impl Strategy<Value = Version> {
        (0u32..12, 0u32..12, 0u32..12).prop_map(|(a, b, c)| Version::new(a, b, c))
    }

    fn product_strategy() -> impl Strategy<Value = Product> {
        prop::sample::select(Product::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn architectures_always_start_with_amd64(
            product in product_strategy(),
            version in version_strategy(),
        ) {
            let arches = resolve_architectures(product, version);
            prop_assert!(!arches.is_empty());
            prop_assert_eq!(arches[0], Arch::Amd64);

            let threshold =
                ARM64_SINCE.iter().find(|(p, _)| *p == product).map(|(_, since)| *since);
            let expect_arm64 = threshold.is_some_and(|since| version >= since);
            prop_assert_eq!(arches.contains(&Arch::Arm64), expect_arm64);
        }
    }

    #[test]
    fn sync_gateway_template_switches_after_3_0_3() {
        assert_eq!(
            resolve_template_filename(Product::SyncGateway, v("3.0.3")),
            "Dockerfile.centos.template"
        );
        assert_eq!(
            resolve_template_filename(Product::SyncGateway, v("3.0.4")),
            "Dockerfile.ubuntu.template"
        );
        assert_eq!(resolve_template_filename(Product::Server, v("7.2.0")), DEFAULT_TEMPLATE);
    }

    #[test]
    fn base_images() {
        assert_eq!(resolve_base_image(Product::Server, &rv("7.2.4")), "ubuntu:22.04");
        assert_eq!(resolve_base_image(Product::Server, &rv("6.6.0")), "ubuntu:18.04");
        assert_eq!(resolve_base_image(Product::Sandbox, &rv("7.6.1")), "couchbase/server:7.6.1");
        assert_eq!(resolve_base_image(Product::SyncGateway, &rv("3.0.3")), "centos:centos7");
        assert_eq!(resolve_base_image(Product::SyncGateway, &rv("3.1.0")), "ubuntu:22.04");
        assert_eq!(
            resolve_base_image(Product::SyncGateway, &rv("0.0.0-forestdb")),
            "tleyden5iwx/forestdb"
        );
        assert_eq!(resolve_base_image(Product::EdgeServer, &rv("1.0.0")), "ubuntu:22.04");
        assert_eq!(resolve_base_image(Product::Columnar, &rv("1.1.0")), "ubuntu:22.04");
        assert_eq!(resolve_base_image(Product::EnterpriseAnalytics, &rv("2.0.0")), "ubuntu:24.04");
    }

    #[test]
    fn server_package_names() {
        let none = VersionCustomizations::default();
        assert_eq!(
            resolve_package_filename(
                Product::Server,
                Edition::Enterprise,
                &rv("7.1.1"),
                Arch::Generic,
                &none
            )
            .unwrap(),
            "couchbase-server-enterprise_7.1.1-linux_@@ARCH@@.deb"
        );
        assert_eq!(
            resolve_package_filename(
                Product::Server,
                Edition::Community,
                &rv("7.0.3-MP1"),
                Arch::Arm64,
                &none
            )
            .unwrap(),
            "couchbase-server-community_7.0.3-MP1-ubuntu20.04_amd64.deb"
        );
    }

    #[test]
    fn sync_gateway_package_extension_boundary() {
        let none = VersionCustomizations::default();
        let file = |s: &str| {
            resolve_package_filename(
                Product::SyncGateway,
                Edition::Enterprise,
                &rv(s),
                Arch::Amd64,
                &none,
            )
            .unwrap()
        };
        assert_eq!(file("3.0.3"), "couchbase-sync-gateway-enterprise_3.0.3_@@ARCH@@.rpm");
        assert_eq!(file("3.0.4"), "couchbase-sync-gateway-enterprise_3.0.4_@@ARCH@@.deb");
    }

    #[test]
    fn other_product_package_names() {
        let none = VersionCustomizations::default();
        let file = |product, edition| {
            resolve_package_filename(product, edition, &rv("1.1.0"), Arch::Arm64, &none)
        };
        assert_eq!(
            file(Product::Columnar, Edition::Enterprise).unwrap(),
            "couchbase-columnar-enterprise_1.1.0-linux_arm64.deb"
        );
        assert_eq!(
            file(Product::EnterpriseAnalytics, Edition::Enterprise).unwrap(),
            "enterprise-analytics_1.1.0-linux_arm64.deb"
        );
        assert_eq!(
            file(Product::EdgeServer, Edition::Community).unwrap(),
            "couchbase-edge-server_1.1.0_arm64.deb"
        );
        assert_eq!(file(Product::Sandbox, Edition::Enterprise), None);
    }

    #[test]
    fn customizations_bypass_computed_names() {
        let customizations = VersionCustomizations::builtin();
        let version = rv("2.0.0-devbuild");
        assert_eq!(
            resolve_package_filename(
                Product::SyncGateway,
                Edition::Community,
                &version,
                Arch::Generic,
                &customizations
            )
            .unwrap(),
            "couchbase-sync-gateway-community_2.0.0-827_x86_64.rpm"
        );
        assert_eq!(
            resolve_sync_gateway_package_url(Edition::Community, &version, true, &customizations),
            "http://cbmobile-packages.s3.amazonaws.com/couchbase-sync-gateway-community_2.0.0-827_x86_64.rpm"
        );
    }

    #[test]
    fn sync_gateway_package_urls() {
        let none = VersionCustomizations::default();
        assert_eq!(
            resolve_sync_gateway_package_url(Edition::Community, &rv("3.1.0"), false, &none),
            "http://packages.couchbase.com/releases/couchbase-sync-gateway/3.1.0/couchbase-sync-gateway-community_3.1.0_@@ARCH@@.deb"
        );
        assert_eq!(
            resolve_sync_gateway_package_url(Edition::Enterprise, &rv("2.8.0"), true, &none),
            "http://packages-staging.couchbase.com/releases/couchbase-sync-gateway/2.8.0/couchbase-sync-gateway-enterprise_2.8.0_@@ARCH@@.rpm"
        );
    }

    #[test]
    fn release_urls() {
        assert_eq!(
            resolve_release_url(Product::Server, &rv("7.2.0"), false),
            "https://packages.couchbase.com/releases/7.2.0"
        );
        assert_eq!(
            resolve_release_url(Product::Server, &rv("7.2.0"), true),
            "http://packages-staging.couchbase.com/releases/7.2.0"
        );
        assert_eq!(
            resolve_release_url(Product::Columnar, &rv("1.1.0"), false),
            "https://packages.couchbase.com/releases/couchbase-columnar/1.1.0"
        );
        assert_eq!(
            resolve_release_url(Product::EdgeServer, &rv("1.0.0"), true),
            "http://packages-staging.couchbase.com/releases/couchbase-edge-server/1.0.0"
        );
    }

    #[test]
    fn forestdb_builds_use_feature_branch_version() {
        assert_eq!(
            version_with_substitutions(Product::SyncGateway, &rv("0.0.0-forestdb")),
            "feature/forestdb"
        );
        assert_eq!(version_with_substitutions(Product::SyncGateway, &rv("3.1.0")), "3.1.0");
        assert_eq!(version_with_substitutions(Product::Server, &rv("7.0.3-MP1")), "7.0.3-MP1");
    }

    #[test]
    fn server_flags() {
        assert_eq!(extra_dependencies(Product::Server, v("6.5.0")), "bzip2");
        assert_eq!(extra_dependencies(Product::Server, v("6.0.4")), "python-httplib2");
        assert_eq!(extra_dependencies(Product::Columnar, v("1.0.0")), "");
        assert!(systemd_workaround(Product::Server, v("6.6.6")));
        assert!(!systemd_workaround(Product::Server, v("7.0.0")));
        assert!(!systemd_workaround(Product::Sandbox, v("6.6.6")));
        assert_eq!(server_package_name(Edition::Community), "couchbase-server-community");
        assert_eq!(server_package_name(Edition::Enterprise), "couchbase-server");
    }
}
