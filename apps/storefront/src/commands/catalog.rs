//! # Catalog Commands
//!
//! The catalog view, one-shot or interactive.
//!
//! ## Interactive Browse
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin line            Session action           stdout                  │
//! │  ──────────            ──────────────           ──────                  │
//! │  sofa                  type_query("sofa")       (after the quiet        │
//! │                                                  interval) CatalogView  │
//! │  :cat Sillas           select_category          CatalogView             │
//! │  :clear                clear_query              CatalogView             │
//! │  :link                 share_link               {"link": "/catalogo.."} │
//! │  :quit / EOF           flush pending typing     final CatalogView       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every stdin line replaces the whole search box, like a burst of
//! keystrokes ending in that text.

use serde::Serialize;
use sofa_core::{Catalog, CatalogLink, CatalogResults};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use super::ProductCard;
use crate::error::ApiError;
use crate::state::{AppState, CatalogSession};

/// Snapshot of a catalog session.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogView {
    pub category: String,
    pub categories: Vec<String>,
    /// Query the results were computed for.
    pub query: String,
    pub count: usize,
    pub results: Vec<ProductCard>,
    /// Empty-state message with the "clear search" hint.
    pub message: Option<String>,
    pub link: String,
}

impl From<&CatalogSession> for CatalogView {
    fn from(session: &CatalogSession) -> Self {
        CatalogView {
            category: session.category().label().to_string(),
            categories: session.catalog().categories().to_vec(),
            query: session.effective_query().to_string(),
            count: session.results().len(),
            results: session.results().iter().map(ProductCard::from).collect(),
            message: session.no_results_message().map(String::from),
            link: session.share_link().to_href(),
        }
    }
}

impl CatalogView {
    /// Renders a search result without opening a session.
    pub fn from_results(catalog: &Catalog, results: &CatalogResults<'_>) -> Self {
        CatalogView {
            category: results.category().label().to_string(),
            categories: catalog.categories().to_vec(),
            query: results.query().to_string(),
            count: results.len(),
            results: results.items().iter().copied().map(ProductCard::from).collect(),
            message: results.no_results_message(),
            link: CatalogLink::from_state(results.category(), results.query()).to_href(),
        }
    }

    /// One-shot view of a catalog link. Needs no runtime.
    pub fn from_link(catalog: &Catalog, link: &CatalogLink) -> Self {
        let (category, query) = link.seed(catalog);
        CatalogView::from_results(catalog, &catalog.search(&query, &category))
    }
}

#[derive(Debug, Serialize)]
struct LinkView {
    link: String,
}

/// Category list, sentinel first.
pub fn categories(state: &AppState) -> Vec<String> {
    state.catalog().categories().to_vec()
}

/// One-shot catalog view for a category and query.
pub fn catalog_view(
    state: &AppState,
    categoria: Option<String>,
    query: Option<String>,
) -> CatalogView {
    let link = CatalogLink { categoria, query };
    CatalogView::from_link(state.catalog(), &link)
}

/// Runs an interactive catalog session over line-oriented I/O.
///
/// Writes one JSON document per line.
pub async fn browse<R, W>(
    state: &AppState,
    link: &CatalogLink,
    input: R,
    mut output: W,
) -> Result<CatalogView, ApiError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut session = state.open_session(link);
    let mut lines = input.lines();
    info!(link = %link.to_href(), "Catalog session opened");

    emit(&mut output, &CatalogView::from(&session)).await?;

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = line.map_err(|e| ApiError::internal(format!("stdin: {}", e)))?;
                let Some(line) = line else { break };

                match parse_input(&line) {
                    Input::Quit => break,
                    Input::Link => {
                        emit(&mut output, &LinkView { link: session.share_link().to_href() }).await?;
                    }
                    Input::Clear => {
                        session.clear_query();
                        emit(&mut output, &CatalogView::from(&session)).await?;
                    }
                    Input::Category(label) => {
                        session.select_category(label);
                        emit(&mut output, &CatalogView::from(&session)).await?;
                    }
                    Input::Query(text) => {
                        debug!(raw = %text, "Search box changed");
                        session.type_query(text);
                    }
                }
            }
            update = session.next_update() => {
                if update.is_none() {
                    break;
                }
                emit(&mut output, &CatalogView::from(&session)).await?;
            }
        }
    }

    if session.flush() {
        emit(&mut output, &CatalogView::from(&session)).await?;
    }

    info!(
        recomputations = session.recomputations(),
        link = %session.share_link().to_href(),
        "Catalog session closed"
    );
    Ok(CatalogView::from(&session))
}

/// One line of interactive input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Quit,
    Link,
    Clear,
    Category(&'a str),
    Query(&'a str),
}

fn parse_input(line: &str) -> Input<'_> {
    match line.trim() {
        ":quit" | ":q" => Input::Quit,
        ":link" => Input::Link,
        ":clear" => Input::Clear,
        cmd if cmd.starts_with(":cat") => Input::Category(cmd[":cat".len()..].trim()),
        _ => Input::Query(line),
    }
}

async fn emit<W, T>(output: &mut W, value: &T) -> Result<(), ApiError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut json = serde_json::to_string(value).map_err(|e| ApiError::internal(e.to_string()))?;
    json.push('\n');
    output
        .write_all(json.as_bytes())
        .await
        .map_err(|e| ApiError::internal(format!("stdout: {}", e)))?;
    output
        .flush()
        .await
        .map_err(|e| ApiError::internal(format!("stdout: {}", e)))
}
