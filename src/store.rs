//! View-model over the catalog client.
//!
//! The store derives exactly one "current recipe list" from its query state
//! (search text beats category; both empty falls back to a default keyword)
//! and owns the loading/error lifecycle around each fetch. The view layer
//! only reads accessors and calls the mutating actions.

use log::{debug, warn};

use crate::client::CatalogClient;
use crate::config::AppConfig;
use crate::error::CatalogError;
use crate::favorites::{Favorites, FavoritesError};
use crate::model::{Category, Recipe};

/// Lifecycle of the current recipe list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Ready,
    Error,
}

/// The one query derived from the current search text and category
/// selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Search(String),
    Category(String),
}

/// Holds the current result list, category list, query state, favorites and
/// the loading/error flags. Single owner; all mutation goes through its
/// methods.
#[derive(Debug)]
pub struct RecipeStore {
    client: CatalogClient,
    favorites: Favorites,
    default_query: String,
    search_text: String,
    selected_category: Option<String>,
    recipes: Vec<Recipe>,
    categories: Vec<Category>,
    phase: Phase,
    error: Option<String>,
    /// Ticket of the most recently issued query. Responses carrying an older
    /// ticket are stale and get discarded.
    issued: u64,
}

impl RecipeStore {
    pub fn new(
        client: CatalogClient,
        favorites: Favorites,
        default_query: impl Into<String>,
    ) -> Self {
        Self {
            client,
            favorites,
            default_query: default_query.into(),
            search_text: String::new(),
            selected_category: None,
            recipes: Vec::new(),
            categories: Vec::new(),
            phase: Phase::Idle,
            error: None,
            issued: 0,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            CatalogClient::from_config(config),
            Favorites::load(&config.favorites_path),
            config.default_query.clone(),
        )
    }

    /// Startup sequence: fetch the category facets once, then populate the
    /// list with the default query.
    pub async fn init(&mut self) {
        self.load_categories().await;
        self.refresh().await;
    }

    /// Fetch the category list. A failure surfaces an error message but
    /// leaves the recipe list and phase untouched.
    pub async fn load_categories(&mut self) {
        match self.client.categories().await {
            Ok(categories) => self.categories = categories,
            Err(e) => {
                warn!("Loading categories failed: {e}");
                self.error = Some("Could not load categories".to_string());
            }
        }
    }

    /// The query the current filter state resolves to: non-empty search text
    /// wins over a selected category; with both cleared, the default keyword
    /// query applies.
    pub fn active_query(&self) -> Query {
        let text = self.search_text.trim();
        if !text.is_empty() {
            return Query::Search(text.to_string());
        }
        if let Some(category) = self.selected_category.as_deref() {
            if !category.is_empty() {
                return Query::Category(category.to_string());
            }
        }
        Query::Search(self.default_query.clone())
    }

    /// Enter `Loading` and issue a new query ticket. The caller runs the
    /// matching client operation and hands the outcome to
    /// [`complete_query`](Self::complete_query).
    pub fn begin_query(&mut self) -> (u64, Query) {
        self.issued += 1;
        self.phase = Phase::Loading;
        self.error = None;
        (self.issued, self.active_query())
    }

    /// Apply a query outcome. Outcomes whose ticket is not the latest issued
    /// one are stale and ignored, so a slow earlier response can never
    /// overwrite a fresher list.
    pub fn complete_query(
        &mut self,
        ticket: u64,
        query: &Query,
        outcome: Result<Vec<Recipe>, CatalogError>,
    ) {
        if ticket != self.issued {
            debug!(
                "Discarding stale response for ticket {ticket}, latest is {}",
                self.issued
            );
            return;
        }

        match outcome {
            Ok(recipes) => {
                self.recipes = recipes;
                self.phase = Phase::Ready;
                self.error = None;
            }
            Err(e) => {
                warn!("Query {query:?} failed: {e}");
                self.recipes.clear();
                self.phase = Phase::Error;
                self.error = Some(
                    match query {
                        Query::Search(_) => "Failed to search recipes",
                        Query::Category(_) => "Failed to load category recipes",
                    }
                    .to_string(),
                );
            }
        }
    }

    /// Re-run the query derived from the current filter state.
    pub async fn refresh(&mut self) {
        let (ticket, query) = self.begin_query();
        let outcome = match &query {
            Query::Search(text) => self.client.search(text).await,
            Query::Category(name) => self.client.recipes_in_category(name).await,
        };
        self.complete_query(ticket, &query, outcome);
    }

    pub async fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.refresh().await;
    }

    pub async fn set_category(&mut self, category: Option<String>) {
        self.selected_category = category.filter(|c| !c.is_empty());
        self.refresh().await;
    }

    pub async fn clear_filters(&mut self) {
        self.search_text.clear();
        self.selected_category = None;
        self.refresh().await;
    }

    // Favorites actions. Persistence happens inside the toggle.

    pub fn toggle_favorite(&mut self, id: &str) -> Result<bool, FavoritesError> {
        self.favorites.toggle(id)
    }

    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    pub fn favorites(&self) -> &Favorites {
        &self.favorites
    }

    /// The favorited subset of the current list, in list order.
    pub fn favorite_recipes(&self) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| self.favorites.contains(&recipe.id))
            .collect()
    }

    // Read accessors for the view layer.

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn selected_category(&self) -> Option<&str> {
        self.selected_category.as_deref()
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }
}
