//! Domain types for the recipe catalog.
//!
//! The upstream API serves a flat record per recipe with twenty numbered
//! ingredient/measure slots (`strIngredient1`..`strIngredient20`). Records
//! are normalized into [`Recipe`] at deserialization time so the rest of the
//! crate never sees the numbered slots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Number of ingredient/measure slots in the wire format.
pub const INGREDIENT_SLOTS: usize = 20;

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ingredient {
    pub name: String,
    /// Measure as written upstream ("1 cup", "dash"). Empty when the record
    /// names an ingredient without a quantity.
    pub measure: String,
}

/// A single dish record. Immutable once fetched; identified by `id`.
///
/// Category listings return summary records that carry only `id`, `name`
/// and `thumbnail`; every other field is then `None` or empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RecipeRecord")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub thumbnail: Option<String>,
    /// Comma-separated free-text tags, as served upstream.
    pub tags: Option<String>,
    /// Free text; line breaks delimit the preparation steps.
    pub instructions: String,
    pub ingredients: Vec<Ingredient>,
    pub youtube: Option<String>,
    pub source: Option<String>,
}

impl Recipe {
    /// Instruction text split into trimmed, non-empty steps. The upstream
    /// data mixes CRLF, LF and bare CR line endings.
    pub fn steps(&self) -> Vec<&str> {
        self.instructions
            .split(['\r', '\n'])
            .map(str::trim)
            .filter(|step| !step.is_empty())
            .collect()
    }

    /// Tags split out of the comma-separated `tags` field.
    pub fn tag_list(&self) -> Vec<&str> {
        self.tags
            .as_deref()
            .map(|tags| {
                tags.split(',')
                    .map(str::trim)
                    .filter(|tag| !tag.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// A named grouping of recipes used as a filter facet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

/// Wire form of a recipe record. The numbered ingredient slots land in the
/// flattened `slots` map and are collected positionally.
#[derive(Debug, Deserialize)]
struct RecipeRecord {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strSource", default)]
    source: Option<String>,
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl RecipeRecord {
    fn slot(&self, key: &str) -> Option<&str> {
        self.slots.get(key).and_then(Value::as_str)
    }
}

impl From<RecipeRecord> for Recipe {
    fn from(record: RecipeRecord) -> Self {
        let mut ingredients = Vec::new();
        for i in 1..=INGREDIENT_SLOTS {
            let name = record
                .slot(&format!("strIngredient{i}"))
                .map(str::trim)
                .unwrap_or_default();
            if name.is_empty() {
                continue;
            }
            let measure = record
                .slot(&format!("strMeasure{i}"))
                .map(str::trim)
                .unwrap_or_default();
            ingredients.push(Ingredient {
                name: name.to_string(),
                measure: measure.to_string(),
            });
        }

        Recipe {
            id: record.id,
            name: record.name,
            category: non_blank(record.category),
            area: non_blank(record.area),
            thumbnail: non_blank(record.thumbnail),
            tags: non_blank(record.tags),
            instructions: record.instructions.unwrap_or_default(),
            ingredients,
            youtube: non_blank(record.youtube),
            source: non_blank(record.source),
        }
    }
}

/// Upstream uses empty strings and nulls interchangeably for absent fields.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
