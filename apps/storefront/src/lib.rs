//! # Forniture & Sofa Storefront Library
//!
//! Core library for the storefront command-line front end. `main.rs` parses
//! arguments and prints; everything else lives here.
//!
//! ## Module Organization
//! ```text
//! storefront_lib/
//! ├── lib.rs          ◄─── You are here (logging setup)
//! ├── config.rs       ◄─── TOML + environment configuration
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState (catalog + config)
//! │   ├── catalog.rs  ◄─── CatalogSession (one visitor's catalog view)
//! │   └── debounce.rs ◄─── Search-box debouncer
//! ├── commands/
//! │   ├── mod.rs      ◄─── ProductCard, deep-link dispatch
//! │   ├── home.rs     ◄─── Home view
//! │   ├── catalog.rs  ◄─── Catalog view and interactive browsing
//! │   ├── product.rs  ◄─── Product detail view
//! │   └── inquiry.rs  ◄─── Inquiry form submission
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Output Channels
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdout ──► JSON views and errors, one document per command            │
//! │             (one line per update in `browse`)                          │
//! │  stderr ──► tracing logs, filtered by RUST_LOG                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod state;

use tracing::Subscriber;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub use config::StorefrontConfig;
pub use error::{ApiError, ErrorCode};
pub use state::AppState;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str =
    "warn,storefront=info,storefront_lib=info,sofa_inquiry=info";

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout stays valid JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=sofa_core=trace` - Trace for one crate only
/// - Default: `warn`, `info` for the storefront crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    build_subscriber(filter).init();
}

fn build_subscriber(filter: EnvFilter) -> impl Subscriber + Send + Sync {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish()
}
