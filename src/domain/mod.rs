pub mod config;
pub mod customization;
pub mod error;
pub mod os_release;
pub mod product;
pub mod resolver;
pub mod template_params;
pub mod variant;
pub mod version;

pub use config::{GeneratorConfig, GeneratorSettings, parse_config_content};
pub use customization::{ProductVersionFilter, VersionCustomization, VersionCustomizations};
pub use error::AppError;
pub use product::{Arch, Edition, Product};
pub use template_params::{TemplateParams, TemplateValue, build_template_params};
pub use variant::{DOCKERFILE, DockerfileVariant, STAGING_SUFFIX, VariantRequest};
pub use version::{ReleaseVersion, Version};
