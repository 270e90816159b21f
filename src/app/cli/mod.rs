//! CLI Adapter.

use std::path::PathBuf;

use clap::Parser;

use crate::app::commands::generate::parse_overrides;
use crate::domain::{AppError, Edition, Product, VariantRequest};

#[derive(Parser)]
#[command(name = "dockergen")]
#[command(
    about = "Generate Couchbase Dockerfiles from per-product templates",
    long_about = "Without -p, regenerates every missing Dockerfile under \
                  BASE_DIRECTORY/<edition>/<product>/<version>. With -p, generates \
                  exactly one variant into the given output directory."
)]
struct Cli {
    /// Root of the docker repository (holds generate/ and the edition trees)
    base_dir: PathBuf,

    /// Product to generate (e.g. couchbase-server, sync-gateway)
    #[arg(short = 'p', long, requires_all = ["product_version", "edition", "output"])]
    product: Option<String>,

    /// Release version, optionally suffixed with -staging
    #[arg(short = 'v', long = "version", value_name = "VERSION", requires = "product")]
    product_version: Option<String>,

    /// Edition: community or enterprise
    #[arg(short = 'e', long, requires = "product")]
    edition: Option<String>,

    /// Existing directory to write the Dockerfile into
    #[arg(short = 'o', long, requires = "product")]
    output: Option<PathBuf>,

    /// Extra template parameter as KEY=VALUE (repeatable)
    #[arg(short = 't', long = "template-arg", value_name = "KEY=VALUE", requires = "product")]
    template_args: Vec<String>,

    /// Generator config file [default: BASE_DIRECTORY/generate/dockergen.toml]
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(()) => println!("Successfully finished!"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn execute(cli: Cli) -> Result<(), AppError> {
    let config = cli.config.as_deref();

    match cli.product {
        Some(product) => {
            log::info!("Generating single product");
            let request = VariantRequest {
                product: product.parse::<Product>()?,
                edition: cli.edition.unwrap_or_default().parse::<Edition>()?,
                version: cli.product_version.unwrap_or_default(),
                output_dir: cli.output,
                overrides: parse_overrides(&cli.template_args)?,
            };
            crate::generate(&cli.base_dir, config, request)?;
        }
        None => {
            log::info!("Generating multiple products");
            let summary = crate::generate_all(&cli.base_dir, config)?;
            log::info!(
                "Generated {}, kept {} existing, skipped {}",
                summary.generated.len(),
                summary.existing.len(),
                summary.skipped.len()
            );
        }
    }

    Ok(())
}
