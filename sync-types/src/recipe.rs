//! Normalized recipe records.
//!
//! A [`Recipe`] is never deserialized directly from API JSON. Records are
//! produced by the mapper in sync-core, which tolerates any input shape.
//! Serializing a `Recipe` yields the API's wire shape, so a mapped recipe
//! can be posted back or mapped again without loss.

use serde::Serialize;

use crate::RecipeId;

/// A recipe as held by the client stores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Server-assigned id; absent until persisted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecipeId>,
    /// Recipe name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category label (e.g. "dinner").
    #[serde(rename = "recipeCategory", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Ingredient lines, in order.
    #[serde(rename = "recipeIngredient", skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Instruction steps, in order.
    #[serde(rename = "recipeInstructions", skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    /// ISO-8601 duration, e.g. `PT30M`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<String>,
    /// ISO-8601 duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<String>,
    /// ISO-8601 duration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_time: Option<String>,
    /// Number of servings.
    #[serde(rename = "recipeYield", skip_serializing_if = "Option::is_none")]
    pub yields: Option<i64>,
    /// Nutrition facts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nutrition: Option<Nutrition>,
    /// Comma-separated keywords.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<String>,
    /// Tools needed.
    #[serde(rename = "tool", skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<String>>,
    /// Image reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Source URL.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Creation timestamp as sent by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<String>,
    /// Last modification timestamp as sent by the server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
}

impl Recipe {
    /// Attach a server-issued id.
    pub fn with_id(mut self, id: RecipeId) -> Self {
        self.id = Some(id);
        self
    }

    /// Whether the recipe has been persisted by the server.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Display name, falling back to a placeholder for unnamed recipes.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(untitled)")
    }
}

/// Nutrition facts, each a free-form quantity such as `"12g"`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Nutrition {
    /// Energy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calories: Option<String>,
    /// Total carbohydrate.
    #[serde(rename = "carbohydrateContent", skip_serializing_if = "Option::is_none")]
    pub carbohydrate: Option<String>,
    /// Total fat.
    #[serde(rename = "fatContent", skip_serializing_if = "Option::is_none")]
    pub fat: Option<String>,
    /// Saturated fat.
    #[serde(rename = "saturatedFatContent", skip_serializing_if = "Option::is_none")]
    pub saturated_fat: Option<String>,
    /// Cholesterol.
    #[serde(rename = "cholesterolContent", skip_serializing_if = "Option::is_none")]
    pub cholesterol: Option<String>,
    /// Protein.
    #[serde(rename = "proteinContent", skip_serializing_if = "Option::is_none")]
    pub protein: Option<String>,
    /// Sodium.
    #[serde(rename = "sodiumContent", skip_serializing_if = "Option::is_none")]
    pub sodium: Option<String>,
    /// Dietary fiber.
    #[serde(rename = "fiberContent", skip_serializing_if = "Option::is_none")]
    pub fiber: Option<String>,
    /// Sugar.
    #[serde(rename = "sugarContent", skip_serializing_if = "Option::is_none")]
    pub sugar: Option<String>,
}

impl Nutrition {
    /// True when no nutrient is set.
    pub fn is_empty(&self) -> bool {
        self.calories.is_none()
            && self.carbohydrate.is_none()
            && self.fat.is_none()
            && self.saturated_fat.is_none()
            && self.cholesterol.is_none()
            && self.protein.is_none()
            && self.sodium.is_none()
            && self.fiber.is_none()
            && self.sugar.is_none()
    }
}
