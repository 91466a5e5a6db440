//! # Storefront Entry Point
//!
//! ## Usage
//! ```text
//! storefront open "/catalogo?categoria=Sillas&query=roble"
//! storefront home
//! storefront categories
//! storefront product sofa-escandinavo
//! storefront browse --categoria Sofás
//! storefront inquire 2 --nombre Ana --email ana@mail.com --nota "¿Hay stock?"
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Load configuration (file, then environment)
//! 3. Load the dataset into `AppState`
//! 4. Run the command and print its JSON

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use sofa_core::{CatalogLink, InquiryFields};
use sofa_inquiry::EmailJsRelay;
use tokio::io::BufReader;
use tracing::info;

use storefront_lib::commands::{self, catalog, home, inquiry, product};
use storefront_lib::{init_tracing, ApiError, AppState, StorefrontConfig};

#[derive(Debug, Parser)]
#[command(name = "storefront", version, about = "Forniture & Sofa storefront")]
struct Cli {
    /// Path to a storefront.toml file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open any deep link (URL or path)
    Open { link: String },

    /// Home view
    Home,

    /// Category list
    Categories,

    /// Catalog view for a category and query
    Catalog {
        #[arg(long)]
        categoria: Option<String>,
        #[arg(long)]
        query: Option<String>,
    },

    /// Product detail by id or slug
    Product { key: String },

    /// Interactive catalog: one search-box value per stdin line
    Browse {
        #[arg(long)]
        categoria: Option<String>,
        #[arg(long)]
        query: Option<String>,
    },

    /// Send an availability inquiry about a product
    Inquire {
        /// Product id or slug
        product: String,
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        telefono: String,
        #[arg(long, default_value = "")]
        ciudad: String,
        #[arg(long, default_value = "")]
        nota: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let config = StorefrontConfig::load(cli.config).context("Failed to load configuration")?;
    let state = match AppState::load(config) {
        Ok(state) => state,
        Err(err) => return fail(err),
    };
    info!(products = state.catalog().len(), "Storefront ready");

    match cli.command {
        Command::Open { link } => print(commands::open_link(&state, &link)),
        Command::Home => print(Ok(home::home(&state))),
        Command::Categories => print(Ok(catalog::categories(&state))),
        Command::Catalog { categoria, query } => {
            print(Ok(catalog::catalog_view(&state, categoria, query)))
        }
        Command::Product { key } => print(product::product_detail(&state, &key)),
        Command::Browse { categoria, query } => {
            let link = CatalogLink { categoria, query };
            let stdin = BufReader::new(tokio::io::stdin());
            match catalog::browse(&state, &link, stdin, tokio::io::stdout()).await {
                Ok(_) => Ok(()),
                Err(err) => fail(err),
            }
        }
        Command::Inquire {
            product,
            nombre,
            email,
            telefono,
            ciudad,
            nota,
        } => {
            let relay = EmailJsRelay::new(&state.config().relay)
                .map_err(ApiError::from)
                .context("Failed to build the email relay")?;
            let fields = InquiryFields {
                nombre,
                email,
                telefono,
                ciudad,
                nota,
            };
            print(inquiry::inquire(&state, relay, &product, fields).await)
        }
    }
}

/// Prints a command result as pretty JSON on stdout.
fn print<T: Serialize>(result: Result<T, ApiError>) -> anyhow::Result<()> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(err) => fail(err),
    }
}

/// Prints an error as JSON and turns it into the process exit status.
fn fail(err: ApiError) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&err)?);
    Err(err.into())
}
