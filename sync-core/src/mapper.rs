//! Recipe entity mapper.
//!
//! Converts raw API JSON into [`Recipe`] records. The mapper is total: any
//! JSON value maps to a recipe, and fields that are missing or of an
//! unexpected type come out as `None` instead of failing.
//!
//! Mapping is idempotent. A `Recipe` serializes to the same wire names the
//! mapper reads, so `to_recipe(&to_value(&recipe))` returns an equal recipe.

use serde_json::{Map, Value};
use sync_types::{Nutrition, Recipe, RecipeId};

/// Map one raw recipe object.
///
/// Non-object input yields an empty recipe with no id.
pub fn to_recipe(raw: &Value) -> Recipe {
    let Some(obj) = raw.as_object() else {
        return Recipe::default();
    };

    Recipe {
        id: integer(obj.get("id")).map(RecipeId::new),
        name: text(obj.get("name")),
        description: text(obj.get("description")),
        category: text(obj.get("recipeCategory")),
        ingredients: strings(obj.get("recipeIngredient")),
        instructions: strings(obj.get("recipeInstructions")),
        prep_time: text(obj.get("prepTime")),
        cook_time: text(obj.get("cookTime")),
        total_time: text(obj.get("totalTime")),
        yields: integer(obj.get("recipeYield")),
        nutrition: obj
            .get("nutrition")
            .and_then(Value::as_object)
            .map(to_nutrition),
        keywords: keywords(obj.get("keywords")),
        tools: strings(obj.get("tool")),
        image: text(obj.get("image")),
        url: text(obj.get("url")),
        date_created: text(obj.get("dateCreated")),
        date_modified: text(obj.get("dateModified")),
    }
}

/// Map a list of raw recipe objects, preserving order.
pub fn to_recipes(raw: &[Value]) -> Vec<Recipe> {
    raw.iter().map(to_recipe).collect()
}

fn to_nutrition(obj: &Map<String, Value>) -> Nutrition {
    Nutrition {
        calories: text(obj.get("calories")),
        carbohydrate: text(obj.get("carbohydrateContent")),
        fat: text(obj.get("fatContent")),
        saturated_fat: text(obj.get("saturatedFatContent")),
        cholesterol: text(obj.get("cholesterolContent")),
        protein: text(obj.get("proteinContent")),
        sodium: text(obj.get("sodiumContent")),
        fiber: text(obj.get("fiberContent")),
        sugar: text(obj.get("sugarContent")),
    }
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && f.fract() == 0.0)
                .map(|f| f as i64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Arrays keep their string items; a lone string becomes a one-item list.
fn strings(value: Option<&Value>) -> Option<Vec<String>> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_owned))
                .collect(),
        ),
        Value::String(s) => Some(vec![s.clone()]),
        _ => None,
    }
}

/// Keywords travel as one comma-separated string; arrays are joined.
fn keywords(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(","),
        ),
        other => text(Some(other)),
    }
}
