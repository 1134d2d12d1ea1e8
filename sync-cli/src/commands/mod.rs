//! CLI command implementations.
//!
//! Every command takes the coordinator it should drive, so tests can hand
//! in one backed by a mock transport.

pub mod browse;
pub mod create;
pub mod search;

use sync_types::Recipe;

/// One line per recipe: id, name and category.
pub(crate) fn format_recipe_line(recipe: &Recipe) -> String {
    let id = recipe
        .id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());
    match &recipe.category {
        Some(category) => format!("{id:>6}  {}  [{category}]", recipe.display_name()),
        None => format!("{id:>6}  {}", recipe.display_name()),
    }
}

pub(crate) fn print_recipes(recipes: &[Recipe]) {
    if recipes.is_empty() {
        println!("No recipes.");
        return;
    }
    for recipe in recipes {
        println!("{}", format_recipe_line(recipe));
    }
}
