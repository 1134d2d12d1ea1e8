//! Create commands: importable websites, URL import and posting a recipe file.

use anyhow::{bail, Context, Result};
use std::path::Path;
use sync_client::{Coordinator, Transport};
use sync_core::to_recipe;

/// List the websites the server can import from.
pub async fn websites<T: Transport>(coordinator: &Coordinator<T>) -> Result<()> {
    let websites = coordinator.create().fetch_websites().await;
    if websites.is_empty() {
        bail!("No importable websites available");
    }
    for website in websites {
        println!("{website}");
    }
    Ok(())
}

/// Import the recipe published at `url`.
pub async fn import<T: Transport>(coordinator: &Coordinator<T>, url: &str) -> Result<()> {
    println!("Importing {}...", url.trim());
    if !coordinator.import_recipe(url).await {
        bail!("Import failed");
    }
    report_created(coordinator).await;
    Ok(())
}

/// Post the recipe described by a JSON file.
pub async fn from_file<T: Transport>(coordinator: &Coordinator<T>, path: &Path) -> Result<()> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let raw: serde_json::Value = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    let recipe = to_recipe(&raw);

    println!("Saving {}...", recipe.display_name());
    if !coordinator.post_recipe(&recipe).await {
        bail!("Saving the recipe failed");
    }
    report_created(coordinator).await;
    Ok(())
}

async fn report_created<T: Transport>(coordinator: &Coordinator<T>) {
    let Some(id) = coordinator.last_created() else {
        return;
    };
    if let Some(recipe) = coordinator.recipe_by_id(id).await {
        println!("Saved as recipe {id}: {}", recipe.display_name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use sync_client::{MockTransport, SyncConfig};
    use tempfile::tempdir;

    fn coordinator() -> (Coordinator<MockTransport>, MockTransport) {
        let transport = MockTransport::new();
        let config = SyncConfig::default();
        (
            Coordinator::new(&config, transport.clone()).unwrap(),
            transport,
        )
    }

    #[tokio::test]
    async fn websites_command() {
        let (coordinator, transport) = coordinator();
        transport.queue_ok(json!({ "websites": ["food.com"] }));
        assert!(websites(&coordinator).await.is_ok());
        assert!(websites(&coordinator).await.is_ok());
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn import_command_reports_failure() {
        let (coordinator, transport) = coordinator();
        transport.queue_error(422, "UNSUPPORTED", "site not supported");
        assert!(import(&coordinator, "https://unknown.example/x").await.is_err());
    }

    #[tokio::test]
    async fn create_from_file_posts_mapped_recipe() {
        let (coordinator, transport) = coordinator();
        let dir = tempdir().unwrap();
        let path = dir.path().join("pie.json");
        tokio::fs::write(
            &path,
            r#"{ "id": 99, "name": "Apple pie", "recipeIngredient": ["apples", "flour"], "recipeYield": "8" }"#,
        )
        .await
        .unwrap();
        transport.queue_json(201, json!({ "id": 5 }));
        transport.queue_ok(json!({ "categories": [] }));

        from_file(&coordinator, &path).await.unwrap();

        let posted = transport.sent_requests()[0].body.clone().unwrap();
        assert!(posted.get("id").is_none());
        assert_eq!(posted["recipeYield"], 8);
        assert_eq!(coordinator.last_created().map(|id| id.value()), Some(5));
    }

    #[tokio::test]
    async fn create_from_invalid_file_fails_before_request() {
        let (coordinator, transport) = coordinator();
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        tokio::fs::write(&path, "{ not json").await.unwrap();

        assert!(from_file(&coordinator, &path).await.is_err());
        assert_eq!(transport.request_count(), 0);
    }
}
