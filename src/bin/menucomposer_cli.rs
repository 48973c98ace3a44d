//! Menu Composer CLI - JSON bridge to the composition engine
//!
//! Commands: formats, styles, products, price, compose
//! Outputs JSON to stdout (errors included), logs to stderr
//! Returns 1 on bad input or catalog failure, 2 when a page fails validation

use clap::{Parser, Subcommand};
use serde::Deserialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use menucomposer_core::{
    catalog::CatalogStore,
    composition_digest,
    format::resolve_geometry,
    pricing::price_blocks,
    resolve_price,
    styles::list_recipes,
    compose_request, ComposeRequest, InMemoryCatalog, PageFormat, PriceOverride, Product,
};

#[derive(Parser)]
#[command(name = "menucomposer-cli")]
#[command(about = "Menu Composer CLI - grid menu composition engine")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to catalog JSON file ({"products": [...], "categories": [...]})
    #[arg(short, long, default_value = "catalog.json", global = true)]
    catalog: PathBuf,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// List page formats with their geometry
    Formats,

    /// List card style variants
    Styles,

    /// List catalog products with their price buttons
    Products {
        /// Case-insensitive name filter
        #[arg(short, long, default_value = "")]
        search: String,
    },

    /// Resolve the price text for a product
    Price {
        /// JSON payload ({"product": Product, "override": PriceOverride?})
        #[arg(short, long)]
        payload: String,
    },

    /// Validate and compose a page
    Compose {
        /// JSON payload (ComposeRequest)
        #[arg(short, long)]
        payload: String,
    },
}

#[derive(Deserialize)]
struct PricePayload {
    product: Product,
    #[serde(default, rename = "override")]
    price_override: Option<PriceOverride>,
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap());
}

/// Report a bad payload or catalog failure on stdout and exit 1
fn fail(message: impl std::fmt::Display) -> ExitCode {
    let output = serde_json::json!({ "success": false, "error": message.to_string() });
    println!("{}", serde_json::to_string(&output).unwrap());
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Formats => {
            let formats: Vec<_> = PageFormat::ALL
                .iter()
                .filter_map(|f| {
                    // Custom is shown with the default 1080x1080 canvas
                    resolve_geometry(*f, 1080, 1080).ok().map(|g| serde_json::json!({
                        "id": f.id(),
                        "label": f.label(),
                        "aspectRatio": g.aspect_ratio,
                        "nominalWidth": g.nominal_width,
                    }))
                })
                .collect();
            print_json(&serde_json::json!(formats));
            ExitCode::SUCCESS
        }

        Commands::Styles => {
            let styles: Vec<_> = list_recipes()
                .iter()
                .map(|r| serde_json::json!({
                    "id": r.style.id(),
                    "name": r.style.name(),
                    "recipe": r,
                }))
                .collect();
            print_json(&serde_json::json!(styles));
            ExitCode::SUCCESS
        }

        Commands::Products { search } => {
            let catalog = match InMemoryCatalog::load_from_file(&cli.catalog) {
                Ok(c) => c,
                Err(e) => return fail(format!("Failed to load catalog: {}", e)),
            };
            let products = match catalog.list_products() {
                Ok(p) => p,
                Err(e) => return fail(e),
            };

            let rows: Vec<_> = products
                .iter()
                .filter(|p| p.matches(&search))
                .map(|p| serde_json::json!({
                    "id": p.id,
                    "name": p.name,
                    "category": p.category,
                    "price": resolve_price(p, None),
                    "priceBlocks": price_blocks(p),
                }))
                .collect();
            print_json(&serde_json::json!(rows));
            ExitCode::SUCCESS
        }

        Commands::Price { payload } => {
            let payload: PricePayload = match serde_json::from_str(&payload) {
                Ok(p) => p,
                Err(e) => return fail(format!("Invalid payload: {}", e)),
            };
            let text = resolve_price(&payload.product, payload.price_override.as_ref());
            print_json(&serde_json::json!({ "success": true, "price": text }));
            ExitCode::SUCCESS
        }

        Commands::Compose { payload } => {
            let request: ComposeRequest = match serde_json::from_str(&payload) {
                Ok(r) => r,
                Err(e) => return fail(format!("Invalid payload: {}", e)),
            };

            let catalog = match InMemoryCatalog::load_from_file(&cli.catalog) {
                Ok(c) => c,
                Err(e) => return fail(format!("Failed to load catalog: {}", e)),
            };

            let outcome = match compose_request(&request, &catalog) {
                Ok(o) => o,
                Err(e) => return fail(e),
            };
            debug!(dangling = ?outcome.dangling_slots, "compose finished");

            match &outcome.page {
                Some(page) => {
                    let digest = match composition_digest(page) {
                        Ok(d) => d,
                        Err(e) => return fail(e),
                    };
                    print_json(&serde_json::json!({
                        "success": true,
                        "digest": digest,
                        "danglingSlots": outcome.dangling_slots,
                        "validation": outcome.validation,
                        "page": page,
                    }));
                    ExitCode::SUCCESS
                }
                None => {
                    print_json(&serde_json::json!({
                        "success": false,
                        "validation": outcome.validation,
                    }));
                    ExitCode::from(2) // Validation failure
                }
            }
        }
    }
}
