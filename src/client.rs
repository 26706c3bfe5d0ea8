//! HTTP client for the remote recipe catalog.
//!
//! Four read-only endpoints, all keyed by query-string parameters. The API
//! signals "no results" by serving `{"meals": null}` rather than an empty
//! array, so every envelope field is optional and an absent field maps to an
//! empty result, not an error.

use std::time::Duration;

use futures::future::join_all;
use log::{debug, warn};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::AppConfig;
use crate::error::CatalogError;
use crate::model::{Category, Recipe};

/// Production catalog endpoint.
pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Category listings are summary-only upstream; at most this many records
/// get a follow-up detail lookup.
pub const CATEGORY_DETAIL_LIMIT: usize = 12;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct MealsEnvelope {
    #[serde(default)]
    meals: Option<Vec<Recipe>>,
}

#[derive(Deserialize)]
struct CategoriesEnvelope {
    #[serde(default)]
    categories: Option<Vec<Category>>,
}

/// Client for the catalog API. Cheap to clone; the inner connection pool is
/// shared between clones.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a client against `base_url` (no trailing slash). Tests point
    /// this at a mock server.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Self {
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipebox/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        )
    }

    /// List all categories, in server order. An absent `categories` field
    /// yields an empty list.
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let envelope: CategoriesEnvelope = self.get_json("categories.php", &[]).await?;
        Ok(envelope.categories.unwrap_or_default())
    }

    /// Free-text name search. No matches yields an empty list, not an error.
    pub async fn search(&self, text: &str) -> Result<Vec<Recipe>, CatalogError> {
        let envelope: MealsEnvelope = self.get_json("search.php", &[("s", text)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// List the summary records of a category. Summaries carry only id, name
    /// and thumbnail; see [`recipes_in_category`](Self::recipes_in_category)
    /// for the detailed variant.
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<Recipe>, CatalogError> {
        let envelope: MealsEnvelope = self.get_json("filter.php", &[("c", category)]).await?;
        Ok(envelope.meals.unwrap_or_default())
    }

    /// Look up one recipe by identifier. `None` when the id is unknown.
    pub async fn lookup(&self, id: &str) -> Result<Option<Recipe>, CatalogError> {
        let envelope: MealsEnvelope = self.get_json("lookup.php", &[("i", id)]).await?;
        Ok(envelope.meals.unwrap_or_default().into_iter().next())
    }

    /// List a category with full detail: fetch the summaries, then run a
    /// concurrent detail lookup for the first [`CATEGORY_DETAIL_LIMIT`]
    /// records. A failed or not-found lookup keeps the summary record in
    /// place, so a partial failure never fails the whole listing. Summary
    /// order is preserved.
    pub async fn recipes_in_category(&self, category: &str) -> Result<Vec<Recipe>, CatalogError> {
        let summaries = self.filter_by_category(category).await?;

        let lookups = summaries
            .into_iter()
            .take(CATEGORY_DETAIL_LIMIT)
            .map(|summary| async move {
                match self.lookup(&summary.id).await {
                    Ok(Some(detail)) => detail,
                    Ok(None) => summary,
                    Err(e) => {
                        warn!("Detail lookup for {} failed, keeping summary: {e}", summary.id);
                        summary
                    }
                }
            });

        Ok(join_all(lookups).await)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, CatalogError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {url} {query:?}");

        // Fetch the body first so decode failures surface as Parse, not Http.
        let body = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        Ok(serde_json::from_str(&body)?)
    }
}
