//! # Seller Catalog Commands
//!
//! `collections select` only writes local storage; `product add` reads
//! the selection back, so the two can run as separate invocations.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use storefront_client::{FlowOutcome, Storefront};
use storefront_core::forms::{CollectionForm, ProductForm, ProductImage};

#[derive(Subcommand)]
pub enum CollectionCommand {
    /// List your collections
    List,

    /// Create a collection
    Create {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,
    },

    /// Choose the collection new products go into
    Select {
        collection_id: String,
    },
}

#[derive(Subcommand)]
pub enum ProductCommand {
    /// Add a product to the selected collection
    Add {
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        description: String,

        #[arg(short, long)]
        sku: String,

        /// Price in major units, e.g. 19.99
        #[arg(short, long)]
        price: String,

        /// Bonus in major units (default 0)
        #[arg(short, long, default_value = "")]
        bonus: String,

        /// Image file; repeat 4 to 8 times
        #[arg(short, long = "image", required = true)]
        images: Vec<PathBuf>,
    },
}

pub async fn run_collections(storefront: &Storefront, command: CollectionCommand) -> FlowOutcome {
    let flow = storefront.catalog();

    let outcome = match command {
        CollectionCommand::List => flow.list_collections().await,
        CollectionCommand::Create { name, description } => {
            flow.create_collection(&CollectionForm { name, description })
                .await
        }
        CollectionCommand::Select { collection_id } => {
            let outcome = flow.select_collection(&collection_id);
            if outcome.is_applied() {
                println!("Selected collection {}", collection_id);
            }
            return outcome;
        }
    };

    if outcome.is_applied() {
        let selected = flow.selected_collection();
        for collection in flow.collections() {
            let marker = if selected.as_deref() == Some(collection.id.as_str()) {
                "*"
            } else {
                " "
            };
            println!(
                "{} {:<26} {:<24} {}",
                marker, collection.id, collection.name, collection.description
            );
        }
    }
    outcome
}

pub async fn run_product(storefront: &Storefront, command: ProductCommand) -> Result<FlowOutcome> {
    match command {
        ProductCommand::Add {
            name,
            description,
            sku,
            price,
            bonus,
            images,
        } => {
            let form = ProductForm {
                name,
                description,
                sku,
                price,
                bonus,
                images: read_images(&images)?,
            };
            Ok(storefront.catalog().add_product(&form).await)
        }
    }
}

fn read_images(paths: &[PathBuf]) -> Result<Vec<ProductImage>> {
    paths
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("reading image {}", path.display()))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "image".to_string());
            Ok(ProductImage::from_bytes(file_name, bytes))
        })
        .collect()
}
