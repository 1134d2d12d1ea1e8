//! Response and request envelopes of the recipe API.
//!
//! Recipe payloads stay as raw [`serde_json::Value`]s here; they only become
//! [`Recipe`](crate::Recipe)s by passing through the mapper.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// `GET categories` → `{ "categories": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoriesBody {
    /// Category labels.
    #[serde(default)]
    pub categories: Vec<String>,
}

/// `GET recipes` and `GET search` → `{ "recipes": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipesBody {
    /// Raw recipe objects.
    #[serde(default)]
    pub recipes: Vec<Value>,
}

/// `GET recipes/info` → `{ "info": { ... } }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoBody {
    /// Item counts.
    pub info: RecipesInfo,
}

/// Total item counts, overall and per category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipesInfo {
    /// Number of recipes across all categories.
    #[serde(default)]
    pub total: u64,
    /// Number of recipes in each category.
    #[serde(default)]
    pub total_per_category: BTreeMap<String, u64>,
}

/// `GET import/websites` → `{ "websites": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebsitesBody {
    /// Websites the server can import recipes from.
    #[serde(default)]
    pub websites: Vec<String>,
}

/// `POST import/url` request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportRequest {
    /// Page to import the recipe from.
    pub url: String,
}
