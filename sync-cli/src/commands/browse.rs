//! Browse commands: categories, listings, counts and single recipes.

use anyhow::{bail, Context, Result};
use sync_client::{Coordinator, Transport};
use sync_core::{View, ALL_CATEGORIES};
use sync_types::RecipeId;

use super::print_recipes;

/// List the categories.
pub async fn categories<T: Transport>(coordinator: &Coordinator<T>) -> Result<()> {
    if !coordinator.browse().get_categories().await {
        bail!("Could not load categories");
    }

    let categories = coordinator.browse().categories().await;
    if categories.is_empty() {
        println!("No categories.");
    }
    for category in categories {
        println!("{category}");
    }
    Ok(())
}

/// List one page of recipes, optionally for one category.
pub async fn recipes<T: Transport>(
    coordinator: &Coordinator<T>,
    category: Option<String>,
    page: u32,
) -> Result<()> {
    coordinator.select_node(category);
    let category = coordinator.selected_node();
    let browse = coordinator.browse();

    // Page counts only bound the page number, so a failure here is not fatal.
    browse.get_pagination_lengths().await;
    let page = browse.set_page(page, category.as_deref()).await;

    if !browse.get_recipes(category.as_deref()).await {
        bail!("Could not load recipes");
    }

    print_recipes(&browse.recipes().await);
    if let Some(count) = browse.pagination().await.page_count(category.as_deref()) {
        println!();
        println!("Page {page} of {}", count.max(1));
    }
    Ok(())
}

/// Show recipe totals and page counts.
pub async fn info<T: Transport>(coordinator: &Coordinator<T>) -> Result<()> {
    let browse = coordinator.browse();
    if !browse.get_pagination_lengths().await {
        bail!("Could not load recipe counts");
    }

    let pagination = browse.pagination().await;
    println!("Pages of {} recipes:", pagination.page_size());
    for (category, pages) in pagination.lengths() {
        let marker = if category == ALL_CATEGORIES { " (all categories)" } else { "" };
        println!("  {category:<20} {pages}{marker}");
    }
    Ok(())
}

/// Print one recipe as JSON.
///
/// There is no single-recipe endpoint, so this pages through the full
/// listing until the recipe turns up.
pub async fn show<T: Transport>(coordinator: &Coordinator<T>, id: RecipeId) -> Result<()> {
    let browse = coordinator.browse();
    coordinator.set_store(View::Browse);

    browse.get_pagination_lengths().await;
    let pages = browse
        .pagination()
        .await
        .page_count(None)
        .unwrap_or(1)
        .max(1);

    for page in 1..=pages {
        browse.set_page(page, None).await;
        if !browse.get_recipes(None).await {
            bail!("Could not load recipes");
        }
        if let Some(recipe) = coordinator.recipe_by_id(id).await {
            let json = serde_json::to_string_pretty(&recipe).context("Failed to encode recipe")?;
            println!("{json}");
            return Ok(());
        }
    }

    bail!("Recipe {id} not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sync_client::{MockTransport, SyncConfig};

    fn coordinator() -> (Coordinator<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let config = SyncConfig::new("http://localhost:3001/api/v1").with_page_size(2);
        (
            Coordinator::new(&config, transport.clone()).unwrap(),
            transport,
        )
    }

    #[tokio::test]
    async fn categories_command() {
        let (coordinator, transport) = coordinator();
        transport.queue_ok(json!({ "categories": ["soup", "bread"] }));
        assert!(categories(&coordinator).await.is_ok());

        transport.queue_error(500, "DB", "down");
        assert!(categories(&coordinator).await.is_err());
    }

    #[tokio::test]
    async fn recipes_command_clamps_page() {
        let (coordinator, transport) = coordinator();
        transport.queue_ok(json!({ "info": { "total": 3, "totalPerCategory": { "soup": 3 } } }));
        transport.queue_ok(json!({ "recipes": [{ "id": 3, "name": "Miso" }] }));

        recipes(&coordinator, Some("soup".into()), 9).await.unwrap();

        assert!(transport
            .last_sent()
            .unwrap()
            .url
            .ends_with("recipes?c=soup&page=2&limit=2"));
        assert_eq!(coordinator.selected_node().as_deref(), Some("soup"));
    }

    #[tokio::test]
    async fn recipes_command_survives_missing_counts() {
        let (coordinator, transport) = coordinator();
        transport.queue_error(500, "INFO", "no counts");
        transport.queue_ok(json!({ "recipes": [] }));

        assert!(recipes(&coordinator, None, 1).await.is_ok());
    }

    #[tokio::test]
    async fn info_command() {
        let (coordinator, transport) = coordinator();
        transport.queue_ok(json!({ "info": { "total": 5, "totalPerCategory": { "soup": 1 } } }));
        assert!(info(&coordinator).await.is_ok());
    }

    #[tokio::test]
    async fn show_pages_until_found() {
        let (coordinator, transport) = coordinator();
        transport.queue_ok(json!({ "info": { "total": 4, "totalPerCategory": {} } }));
        transport.queue_ok(json!({ "recipes": [{ "id": 1 }, { "id": 2 }] }));
        transport.queue_ok(json!({ "recipes": [{ "id": 3 }, { "id": 4, "name": "Flan" }] }));

        show(&coordinator, RecipeId::new(4)).await.unwrap();

        assert_eq!(transport.request_count(), 3);
        assert!(transport.last_sent().unwrap().url.contains("page=2"));
    }

    #[tokio::test]
    async fn show_unknown_recipe_fails() {
        let (coordinator, transport) = coordinator();
        transport.queue_ok(json!({ "info": { "total": 1, "totalPerCategory": {} } }));
        transport.queue_ok(json!({ "recipes": [{ "id": 1 }] }));

        let err = show(&coordinator, RecipeId::new(99)).await.unwrap_err();
        assert!(err.to_string().contains("99"));
    }
}
