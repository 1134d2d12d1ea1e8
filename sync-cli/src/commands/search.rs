//! Search recipes by ingredient.

use anyhow::{bail, Result};
use sync_client::{Coordinator, Transport};
use sync_core::{SearchMode, SearchQuery, View};

use super::print_recipes;

/// Run a search and list the results.
pub async fn run<T: Transport>(
    coordinator: &Coordinator<T>,
    ingredients: Vec<String>,
    mode: SearchMode,
    limit: u32,
) -> Result<()> {
    let query = SearchQuery::new(ingredients).with_mode(mode).with_limit(limit);
    if !coordinator.search().search(&query).await {
        bail!("Search failed");
    }
    coordinator.set_store(View::Search);

    print_recipes(&coordinator.search().recipes().await);
    Ok(())
}
