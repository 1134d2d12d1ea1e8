//! State slices owned by the domain stores - NO I/O, just mutations.
//!
//! Every recipe entering a slice goes through the mapper. Lists are
//! refilled in place (cleared, then extended) rather than swapped for a
//! new allocation; recipes are never removed one at a time.

use serde_json::Value;
use sync_types::{Recipe, RecipeId};

use crate::mapper::{to_recipe, to_recipes};
use crate::pagination::Pagination;

/// Data behind the browse listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    categories: Vec<String>,
    recipes: Vec<Recipe>,
    pagination: Pagination,
}

impl BrowseState {
    /// Empty state with the given page size.
    pub fn new(page_size: u32) -> Self {
        Self {
            categories: Vec::new(),
            recipes: Vec::new(),
            pagination: Pagination::new(page_size),
        }
    }

    /// Known categories.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Recipes of the current listing.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Pagination bookkeeping.
    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    /// Mutable pagination, for page changes and fresh totals.
    pub fn pagination_mut(&mut self) -> &mut Pagination {
        &mut self.pagination
    }

    /// Look up a listed recipe.
    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        find(&self.recipes, id)
    }

    /// Replace the category list.
    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    /// Replace the listing with mapped raw recipes.
    pub fn set_recipes(&mut self, raw: &[Value]) {
        replace(&mut self.recipes, raw);
    }

    /// Append one persisted recipe.
    ///
    /// Returns its id, or `None` (and appends nothing) if the raw recipe
    /// carries no id.
    pub fn add_recipe(&mut self, raw: &Value) -> Option<RecipeId> {
        let recipe = to_recipe(raw);
        let id = recipe.id?;
        self.recipes.push(recipe);
        Some(id)
    }
}

/// Data behind the search results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    recipes: Vec<Recipe>,
}

impl SearchState {
    /// Current results.
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Look up a result.
    pub fn recipe(&self, id: RecipeId) -> Option<&Recipe> {
        find(&self.recipes, id)
    }

    /// Replace the results with mapped raw recipes.
    pub fn set_recipes(&mut self, raw: &[Value]) {
        replace(&mut self.recipes, raw);
    }
}

/// Data behind the create/import forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateState {
    websites: Vec<String>,
}

impl CreateState {
    /// Websites the importer supports (empty until fetched).
    pub fn websites(&self) -> &[String] {
        &self.websites
    }

    /// Whether the website list is cached.
    pub fn has_websites(&self) -> bool {
        !self.websites.is_empty()
    }

    /// Replace the website list.
    pub fn set_websites(&mut self, websites: Vec<String>) {
        self.websites = websites;
    }
}

fn find(recipes: &[Recipe], id: RecipeId) -> Option<&Recipe> {
    recipes.iter().find(|recipe| recipe.id == Some(id))
}

fn replace(recipes: &mut Vec<Recipe>, raw: &[Value]) {
    recipes.clear();
    recipes.extend(to_recipes(raw));
}
