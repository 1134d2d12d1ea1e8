//! Search store: recipes matching a set of ingredients.

use sync_core::{SearchQuery, SearchState};
use sync_types::{Recipe, RecipeId, RecipesBody};
use tokio::sync::Mutex;

use super::StoreContext;
use crate::error::ClientError;
use crate::loading::LoadingFlag;
use crate::transport::Transport;

/// Store behind the search view.
pub struct SearchStore<T: Transport> {
    ctx: StoreContext<T>,
    state: Mutex<SearchState>,
    loading: LoadingFlag,
}

impl<T: Transport> SearchStore<T> {
    /// Create an empty store.
    pub fn new(ctx: StoreContext<T>) -> Self {
        Self {
            ctx,
            state: Mutex::new(SearchState::default()),
            loading: LoadingFlag::new(),
        }
    }

    /// The store's loading flag.
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Whether a search is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Results of the last successful search.
    pub async fn recipes(&self) -> Vec<Recipe> {
        self.state.lock().await.recipes().to_vec()
    }

    /// Look up a result.
    pub async fn recipe(&self, id: RecipeId) -> Option<Recipe> {
        self.state.lock().await.recipe(id).cloned()
    }

    /// Run a search and replace the results.
    ///
    /// A query without ingredients is rejected before any request.
    pub async fn search(&self, query: &SearchQuery) -> bool {
        if query.is_empty() {
            self.ctx.report(
                "search",
                &ClientError::Precondition("no ingredients to search for".into()),
            );
            return false;
        }

        let _loading = (self.loading.begin(), self.ctx.global_loading.begin());

        match self.ctx.gateway.get::<RecipesBody>(&query.endpoint()).await {
            Ok(body) => {
                tracing::info!(
                    count = body.recipes.len(),
                    ingredients = ?query.unique_ingredients(),
                    "search results updated"
                );
                self.state.lock().await.set_recipes(&body.recipes);
                true
            }
            Err(e) => {
                self.ctx.report("search", &e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Gateway;
    use crate::notify::NotificationChannel;
    use crate::transport::MockTransport;
    use serde_json::json;
    use sync_core::{ApiBase, SearchMode};

    fn store() -> (SearchStore<MockTransport>, MockTransport, NotificationChannel) {
        let transport = MockTransport::new();
        let notifications = NotificationChannel::new();
        let gateway = Gateway::new(
            ApiBase::parse("http://localhost:3001/api/v1").unwrap(),
            transport.clone(),
        );
        (
            SearchStore::new(StoreContext::new(gateway, notifications.clone())),
            transport,
            notifications,
        )
    }

    #[tokio::test]
    async fn search_sends_query_and_stores_results() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "recipes": [{ "id": 5, "name": "omelette" }] }));

        let query = SearchQuery::new(["egg", "cheese", "egg"]).with_mode(SearchMode::Minimize);
        assert!(store.search(&query).await);

        let url = transport.last_sent().unwrap().url;
        assert_eq!(
            url,
            "http://localhost:3001/api/v1/search?ingredients=egg%2Ccheese&mode=1&n=10"
        );
        assert_eq!(
            store.recipe(RecipeId::new(5)).await.unwrap().name.as_deref(),
            Some("omelette")
        );
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn empty_query_makes_no_request() {
        let (store, transport, notifications) = store();
        let mut sub = notifications.subscribe();

        assert!(!store.search(&SearchQuery::new([" ", ""])).await);

        assert_eq!(transport.request_count(), 0);
        assert_eq!(store.loading().transitions(), 0);
        assert_eq!(sub.drain().len(), 1);
    }

    #[tokio::test]
    async fn failed_search_keeps_previous_results() {
        let (store, transport, notifications) = store();
        let mut sub = notifications.subscribe();
        transport.queue_ok(json!({ "recipes": [{ "id": 1 }, { "id": 2 }] }));
        transport.queue_error(500, "SEARCH", "index offline");

        store.search(&SearchQuery::new(["rice"])).await;
        assert!(!store.search(&SearchQuery::new(["beans"])).await);

        assert_eq!(store.recipes().await.len(), 2);
        let published = sub.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].message, "index offline");
    }
}
