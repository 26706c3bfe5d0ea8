//! Recipe discovery for the MealDB catalog.
//!
//! The crate is split along the same seams as the application it backs:
//! [`client`] talks to the remote catalog, [`store`] derives one current
//! recipe list from the search/category state, and [`favorites`] persists
//! the user's favorited ids across sessions. The `recipebox` binary is the
//! view layer.

pub mod client;
pub mod config;
pub mod error;
pub mod favorites;
pub mod model;
pub mod store;

pub use client::{CatalogClient, CATEGORY_DETAIL_LIMIT, DEFAULT_BASE_URL};
pub use config::AppConfig;
pub use error::CatalogError;
pub use favorites::{Favorites, FavoritesError};
pub use model::{Category, Ingredient, Recipe};
pub use store::{Phase, Query, RecipeStore};
