//! # Catalog Session
//!
//! State of one visitor's catalog view: selected category, raw and
//! effective query, and the visible products.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  /catalogo?categoria=..&query=..                                        │
//! │         │ CatalogLink::seed                                             │
//! │         ▼                                                               │
//! │  ┌──────────────┐  type_query   ┌───────────┐  settled  ┌────────────┐  │
//! │  │  raw query   │──────────────►│ Debouncer │──────────►│ effective  │  │
//! │  └──────────────┘               └───────────┘           │ query      │  │
//! │                                                          └─────┬──────┘  │
//! │  select_category ─────────────────────────────────────────────┤         │
//! │                                                                ▼         │
//! │                                           Catalog::search (recompute)   │
//! │                                                                │         │
//! │  share_link ◄── (category, effective query) ◄──────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Category changes apply at once; only typing is debounced.

use std::sync::Arc;
use std::time::Duration;

use sofa_core::{Catalog, CatalogLink, CategoryFilter, Product};
use tracing::debug;

use super::debounce::Debouncer;

/// One visitor's catalog view.
#[derive(Debug)]
pub struct CatalogSession {
    catalog: Arc<Catalog>,
    category: CategoryFilter,
    raw_query: String,
    effective_query: String,
    visible: Vec<Product>,
    message: Option<String>,
    recomputations: u64,
    debouncer: Debouncer<String>,
}

impl CatalogSession {
    /// Opens a session seeded from a catalog link.
    ///
    /// The seeded query is applied at once, without waiting for the
    /// debounce interval.
    pub fn open(catalog: Arc<Catalog>, link: &CatalogLink, debounce: Duration) -> Self {
        let (category, raw_query) = link.seed(&catalog);

        let mut session = CatalogSession {
            catalog,
            category,
            effective_query: raw_query.clone(),
            raw_query,
            visible: Vec::new(),
            message: None,
            recomputations: 0,
            debouncer: Debouncer::new(debounce),
        };
        session.recompute();
        session
    }

    // =========================================================================
    // Visitor Actions
    // =========================================================================

    /// Records a keystroke burst. The results follow once typing pauses.
    pub fn type_query(&mut self, raw: impl Into<String>) {
        self.raw_query = raw.into();
        self.debouncer.push(self.raw_query.clone());
    }

    /// Selects a category from the list (or from a label typed by hand).
    pub fn select_category(&mut self, label: &str) {
        self.category = self.catalog.resolve_category(label);
        self.recompute();
    }

    /// The "clear search" action: empties the query and shows every product
    /// of the selected category at once.
    pub fn clear_query(&mut self) {
        self.debouncer.cancel();
        self.raw_query.clear();
        self.effective_query.clear();
        self.recompute();
    }

    /// Applies the raw query immediately, skipping the quiet interval.
    ///
    /// Returns false when the effective query was already up to date.
    pub fn flush(&mut self) -> bool {
        self.debouncer.cancel();
        if self.effective_query == self.raw_query {
            return false;
        }
        self.effective_query = self.raw_query.clone();
        self.recompute();
        true
    }

    /// Waits for the debouncer to settle and applies the settled query.
    ///
    /// Cancel safe. Returns `None` if the debouncer stopped.
    pub async fn next_update(&mut self) -> Option<()> {
        let settled = self.debouncer.next().await?;
        self.effective_query = settled;
        self.recompute();
        Some(())
    }

    fn recompute(&mut self) {
        let results = self.catalog.search(&self.effective_query, &self.category);
        self.message = results.no_results_message();
        self.visible = results.into_items().into_iter().cloned().collect();
        self.recomputations += 1;

        debug!(
            category = %self.category,
            query = %self.effective_query,
            count = self.visible.len(),
            "Catalog results recomputed"
        );
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn category(&self) -> &CategoryFilter {
        &self.category
    }

    /// What the visitor has typed so far.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// The query the visible results were computed for.
    pub fn effective_query(&self) -> &str {
        &self.effective_query
    }

    /// Visible products, in dataset order.
    pub fn results(&self) -> &[Product] {
        &self.visible
    }

    /// Empty-state message, `None` when there are results.
    pub fn no_results_message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Number of times the visible list has been computed.
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    /// Link that reopens the session in its current state.
    pub fn share_link(&self) -> CatalogLink {
        CatalogLink::from_state(&self.category, &self.effective_query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sofa_core::dataset::load_products;
    use sofa_core::Route;
    use tokio::time::timeout;

    const DEBOUNCE: Duration = Duration::from_millis(350);

    fn catalog() -> Arc<Catalog> {
        let products = load_products(
            r#"[
                {"id": 1, "titulo": "Silla Roble Natural", "categoria": "Sillas"},
                {"id": 2, "titulo": "Silla Nórdica", "categoria": "Sillas", "colores": ["Blanco"]},
                {"id": 3, "titulo": "Sofá Escandinavo", "categoria": "Sofás", "descripcion": "Patas de roble"},
                {"id": 4, "titulo": "Mesa Ratona", "categoria": "Mesas", "colores": ["Roble"]}
            ]"#,
        )
        .unwrap();
        Arc::new(Catalog::new(products))
    }

    fn ids(session: &CatalogSession) -> Vec<&str> {
        session.results().iter().map(|p| p.id.as_str()).collect()
    }

    fn open(link: &str) -> CatalogSession {
        let Route::Catalog(link) = Route::parse(link).unwrap() else {
            panic!("not a catalog link");
        };
        CatalogSession::open(catalog(), &link, DEBOUNCE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_link_preselects_category() {
        let session = open("/catalogo?categoria=sillas");
        assert_eq!(session.category(), &CategoryFilter::Only("Sillas".into()));
        assert_eq!(ids(&session), vec!["1", "2"]);
        assert_eq!(session.recomputations(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_link_seeds_query_verbatim() {
        let session = open("/catalogo?query=ROBLE");
        assert_eq!(session.raw_query(), "ROBLE");
        assert_eq!(ids(&session), vec!["1", "3", "4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_typing_burst_recomputes_once() {
        let mut session = open("/catalogo");
        let before = session.recomputations();

        session.type_query("r");
        session.type_query("ro");
        session.type_query("rob");
        assert_eq!(session.effective_query(), "");

        session.next_update().await.unwrap();
        assert_eq!(session.effective_query(), "rob");
        assert_eq!(session.recomputations(), before + 1);
        assert_eq!(ids(&session), vec!["1", "3", "4"]);

        assert!(timeout(Duration::from_secs(5), session.next_update()).await.is_err());
        assert_eq!(session.recomputations(), before + 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_results_and_clear() {
        let mut session = open("/catalogo?categoria=Sillas");

        session.type_query("zzz-no-match");
        session.next_update().await.unwrap();
        assert!(session.results().is_empty());
        assert_eq!(
            session.no_results_message(),
            Some("No se encontraron resultados para “zzz-no-match”")
        );

        session.clear_query();
        assert_eq!(ids(&session), vec!["1", "2"]);
        assert_eq!(session.no_results_message(), None);
        assert_eq!(session.raw_query(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_cancels_pending_typing() {
        let mut session = open("/catalogo");
        session.type_query("sofa");
        session.clear_query();

        assert!(timeout(Duration::from_secs(5), session.next_update()).await.is_err());
        assert_eq!(session.effective_query(), "");
        assert_eq!(session.results().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_clear_discards_settled_but_unread_query() {
        let mut session = open("/catalogo");
        session.type_query("sofa");
        tokio::time::sleep(DEBOUNCE * 2).await;
        session.clear_query();

        assert!(timeout(Duration::from_secs(5), session.next_update()).await.is_err());
        assert_eq!(session.effective_query(), "");
        assert_eq!(session.results().len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_newer_keystroke_wins_over_settled_query() {
        let mut session = open("/catalogo");
        session.type_query("s");
        tokio::time::sleep(DEBOUNCE * 2).await;
        session.type_query("mesa");

        session.next_update().await.unwrap();
        assert_eq!(session.effective_query(), "mesa");
        assert_eq!(ids(&session), vec!["4"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_discards_settled_value() {
        let mut session = open("/catalogo");
        session.type_query("silla");
        tokio::time::sleep(DEBOUNCE * 2).await;
        session.type_query("mesa");
        assert!(session.flush());

        assert!(timeout(Duration::from_secs(5), session.next_update()).await.is_err());
        assert_eq!(session.effective_query(), "mesa");
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_applies_immediately() {
        let mut session = open("/catalogo");
        session.type_query("mesa");

        assert!(session.flush());
        assert_eq!(ids(&session), vec!["4"]);
        assert!(!session.flush());
    }

    #[tokio::test(start_paused = true)]
    async fn test_share_link_reflects_state() {
        let mut session = open("/catalogo");
        assert_eq!(session.share_link().to_href(), "/catalogo");

        session.select_category("SOFAS");
        session.type_query("roble");
        session.next_update().await.unwrap();

        let link = session.share_link();
        assert_eq!(link.categoria.as_deref(), Some("Sofás"));
        assert_eq!(link.query.as_deref(), Some("roble"));

        let reopened = open(&link.to_href());
        assert_eq!(reopened.category(), session.category());
        assert_eq!(ids(&reopened), ids(&session));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_category_selects_everything() {
        let mut session = open("/catalogo?categoria=Sillas");
        session.select_category("Lámparas");
        assert!(session.category().is_all());
        assert_eq!(session.results().len(), 4);
    }
}
