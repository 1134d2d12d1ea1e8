//! Browse store: categories, the paged recipe listing and page counts.

use serde_json::Value;
use sync_core::{paths, BrowseState, Pagination, RecipeQuery};
use sync_types::{CategoriesBody, InfoBody, Recipe, RecipeId, RecipesBody};
use tokio::sync::Mutex;

use super::StoreContext;
use crate::error::ClientError;
use crate::loading::{LoadingFlag, LoadingGuard};
use crate::transport::Transport;

/// Store behind the browse view.
///
/// Its actions are global operations: they raise both the store's own flag
/// and the coordinator's global flag.
pub struct BrowseStore<T: Transport> {
    ctx: StoreContext<T>,
    state: Mutex<BrowseState>,
    loading: LoadingFlag,
}

impl<T: Transport> BrowseStore<T> {
    /// Create an empty store.
    pub fn new(ctx: StoreContext<T>, page_size: u32) -> Self {
        Self {
            ctx,
            state: Mutex::new(BrowseState::new(page_size)),
            loading: LoadingFlag::new(),
        }
    }

    /// The store's loading flag.
    pub fn loading(&self) -> &LoadingFlag {
        &self.loading
    }

    /// Whether an action is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// Known categories.
    pub async fn categories(&self) -> Vec<String> {
        self.state.lock().await.categories().to_vec()
    }

    /// Recipes of the current listing.
    pub async fn recipes(&self) -> Vec<Recipe> {
        self.state.lock().await.recipes().to_vec()
    }

    /// Look up a listed recipe.
    pub async fn recipe(&self, id: RecipeId) -> Option<Recipe> {
        self.state.lock().await.recipe(id).cloned()
    }

    /// Pagination bookkeeping.
    pub async fn pagination(&self) -> Pagination {
        self.state.lock().await.pagination().clone()
    }

    /// Copy of the whole state slice.
    pub async fn snapshot(&self) -> BrowseState {
        self.state.lock().await.clone()
    }

    /// Move to `page` (clamped to the category's page count).
    ///
    /// Does not fetch; call [`get_recipes`](Self::get_recipes) afterwards.
    pub async fn set_page(&self, page: u32, category: Option<&str>) -> u32 {
        self.state
            .lock()
            .await
            .pagination_mut()
            .set_page(page, sync_core::category_filter(category))
    }

    /// Fetch the category list.
    pub async fn get_categories(&self) -> bool {
        let _loading = self.begin();

        match self
            .ctx
            .gateway
            .get::<CategoriesBody>(paths::CATEGORIES)
            .await
        {
            Ok(body) => {
                tracing::info!(count = body.categories.len(), "categories updated");
                self.state.lock().await.set_categories(body.categories);
                true
            }
            Err(e) => {
                self.ctx.report("get_categories", &e);
                false
            }
        }
    }

    /// Fetch the current page of recipes, optionally for one category.
    ///
    /// `None` and an empty category both list every category. The current
    /// page is clamped to the requested category's page count first.
    pub async fn get_recipes(&self, category: Option<&str>) -> bool {
        let _loading = self.begin();

        let endpoint = {
            let mut state = self.state.lock().await;
            let pagination = state.pagination_mut();
            let current = pagination.page();
            let page = pagination.set_page(current, sync_core::category_filter(category));
            RecipeQuery::new(category)
                .with_page(page, pagination.page_size())
                .endpoint()
        };

        match self.ctx.gateway.get::<RecipesBody>(&endpoint).await {
            Ok(body) => {
                tracing::info!(count = body.recipes.len(), category, "recipes updated");
                self.state.lock().await.set_recipes(&body.recipes);
                true
            }
            Err(e) => {
                self.ctx.report("get_recipes", &e);
                false
            }
        }
    }

    /// Fetch item totals and recompute every page count.
    pub async fn get_pagination_lengths(&self) -> bool {
        let _loading = self.begin();

        match self.ctx.gateway.get::<InfoBody>(paths::RECIPES_INFO).await {
            Ok(body) => {
                let mut state = self.state.lock().await;
                state.pagination_mut().apply_info(&body.info);
                tracing::info!(lengths = ?state.pagination().lengths(), "page counts updated");
                true
            }
            Err(e) => {
                self.ctx.report("get_pagination_lengths", &e);
                false
            }
        }
    }

    /// Append a recipe the server has already persisted. No request is made.
    ///
    /// A recipe without an id is rejected and reported.
    pub async fn add_recipe(&self, raw: &Value) -> Option<RecipeId> {
        let added = self.state.lock().await.add_recipe(raw);
        match added {
            Some(id) => tracing::info!(%id, "recipe added to listing"),
            None => self.ctx.report(
                "add_recipe",
                &ClientError::Precondition("recipe has no id".into()),
            ),
        }
        added
    }

    fn begin(&self) -> (LoadingGuard, LoadingGuard) {
        (self.loading.begin(), self.ctx.global_loading.begin())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Gateway;
    use crate::notify::NotificationChannel;
    use crate::transport::MockTransport;
    use serde_json::json;
    use sync_core::{ApiBase, NotificationKind};

    fn store() -> (BrowseStore<MockTransport>, MockTransport, NotificationChannel) {
        let transport = MockTransport::new();
        let notifications = NotificationChannel::new();
        let gateway = Gateway::new(
            ApiBase::parse("http://localhost:3001/api/v1").unwrap(),
            transport.clone(),
        );
        let ctx = StoreContext::new(gateway, notifications.clone());
        (BrowseStore::new(ctx, 12), transport, notifications)
    }

    // ===========================================
    // get_categories
    // ===========================================

    #[tokio::test]
    async fn get_categories_replaces_list() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "categories": ["soup"] }));
        transport.queue_ok(json!({ "categories": ["bread", "dinner"] }));

        assert!(store.get_categories().await);
        assert!(store.get_categories().await);

        assert_eq!(store.categories().await, vec!["bread", "dinner"]);
        assert_eq!(
            transport.last_sent().unwrap().url,
            "http://localhost:3001/api/v1/categories"
        );
    }

    #[tokio::test]
    async fn get_categories_failure_keeps_list_and_notifies() {
        let (store, transport, notifications) = store();
        let mut sub = notifications.subscribe();
        transport.queue_ok(json!({ "categories": ["soup"] }));
        transport.queue_error(500, "DB", "database down");

        store.get_categories().await;
        assert!(!store.get_categories().await);

        assert_eq!(store.categories().await, vec!["soup"]);
        let published = sub.drain();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].kind, NotificationKind::Error);
        assert_eq!(published[0].title, "500 (DB)");
        assert!(!store.is_loading());
    }

    // ===========================================
    // get_recipes
    // ===========================================

    #[tokio::test]
    async fn get_recipes_filters_by_category_in_query() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "recipes": [] }));
        transport.queue_ok(json!({ "recipes": [] }));
        transport.queue_ok(json!({ "recipes": [] }));

        store.get_recipes(Some("soup")).await;
        store.get_recipes(None).await;
        store.get_recipes(Some("")).await;

        let urls: Vec<_> = transport
            .sent_requests()
            .into_iter()
            .map(|r| r.url)
            .collect();
        assert!(urls[0].contains("c=soup"));
        assert!(!urls[1].contains("c="));
        assert!(!urls[2].contains("c="));
        assert!(urls[1].ends_with("recipes?page=1&limit=12"));
    }

    #[tokio::test]
    async fn get_recipes_maps_and_replaces() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "recipes": [{ "id": 1 }, { "id": 2 }] }));
        transport.queue_ok(json!({ "recipes": [{ "id": 3, "name": "stew", "recipeCategory": "dinner" }] }));

        store.get_recipes(None).await;
        assert_eq!(store.recipes().await.len(), 2);

        store.get_recipes(Some("dinner")).await;
        let recipes = store.recipes().await;
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].category.as_deref(), Some("dinner"));
        assert!(store.recipe(RecipeId::new(3)).await.is_some());
        assert!(store.recipe(RecipeId::new(1)).await.is_none());
    }

    #[tokio::test]
    async fn get_recipes_failure_leaves_list_untouched() {
        let (store, transport, notifications) = store();
        let mut sub = notifications.subscribe();
        transport.queue_ok(json!({ "recipes": [{ "id": 1 }] }));

        assert!(store.get_recipes(None).await);
        transport.fail_next(crate::transport::TransportError::Timeout);
        assert!(!store.get_recipes(None).await);

        assert_eq!(store.recipes().await.len(), 1);
        assert_eq!(sub.drain().len(), 1);
    }

    #[tokio::test]
    async fn get_recipes_uses_current_page() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "info": { "total": 40, "totalPerCategory": { "soup": 30 } } }));
        transport.queue_ok(json!({ "recipes": [] }));

        store.get_pagination_lengths().await;
        assert_eq!(store.set_page(3, Some("soup")).await, 3);
        store.get_recipes(Some("soup")).await;

        assert!(transport
            .last_sent()
            .unwrap()
            .url
            .ends_with("recipes?c=soup&page=3&limit=12"));
    }

    #[tokio::test]
    async fn get_recipes_clamps_page_to_new_category() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({
            "info": { "total": 40, "totalPerCategory": { "soup": 30, "bread": 2 } }
        }));
        transport.queue_ok(json!({ "recipes": [{ "id": 5, "recipeCategory": "bread" }] }));

        store.get_pagination_lengths().await;
        assert_eq!(store.set_page(3, Some("soup")).await, 3);
        assert!(store.get_recipes(Some("bread")).await);

        assert!(transport
            .last_sent()
            .unwrap()
            .url
            .ends_with("recipes?c=bread&page=1&limit=12"));
        assert_eq!(store.pagination().await.page(), 1);
        assert_eq!(store.recipes().await.len(), 1);
    }

    // ===========================================
    // Loading flags
    // ===========================================

    #[tokio::test]
    async fn loading_flags_toggle_around_success_and_failure() {
        let (store, transport, _) = store();
        let global = store.ctx.global_loading.clone();
        transport.queue_ok(json!({ "categories": [] }));
        transport.queue_error(500, "X", "boom");

        store.get_categories().await;
        store.get_categories().await;

        assert!(!store.is_loading());
        assert!(!global.is_loading());
        assert_eq!(store.loading().transitions(), 4);
        assert_eq!(global.transitions(), 4);
    }

    #[tokio::test]
    async fn loading_is_up_while_request_pending() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "categories": ["soup"] }));
        let release = transport.hold_next();

        let (done, ()) = tokio::join!(store.get_categories(), async {
            tokio::task::yield_now().await;
            assert!(store.is_loading());
            assert!(store.ctx.global_loading.is_loading());
            assert!(store.categories().await.is_empty());
            release.release();
        });

        assert!(done);
        assert!(!store.is_loading());
        assert_eq!(store.categories().await, vec!["soup"]);
    }

    // ===========================================
    // Pagination
    // ===========================================

    #[tokio::test]
    async fn pagination_lengths_from_info() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "info": { "total": 25, "totalPerCategory": { "soup": 7 } } }));

        assert!(store.get_pagination_lengths().await);

        let pagination = store.pagination().await;
        assert_eq!(pagination.lengths().len(), 2);
        assert_eq!(pagination.page_count(None), Some(3));
        assert_eq!(pagination.page_count(Some("soup")), Some(1));
        assert!(transport.last_sent().unwrap().url.ends_with("recipes/info"));
    }

    #[tokio::test]
    async fn pagination_failure_keeps_previous_counts() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "info": { "total": 25, "totalPerCategory": {} } }));
        transport.queue_error(503, "UNAVAILABLE", "later");

        store.get_pagination_lengths().await;
        assert!(!store.get_pagination_lengths().await);
        assert_eq!(store.pagination().await.page_count(None), Some(3));
    }

    // ===========================================
    // add_recipe
    // ===========================================

    #[tokio::test]
    async fn add_recipe_appends_without_request() {
        let (store, transport, _) = store();
        transport.queue_ok(json!({ "recipes": [{ "id": 1 }] }));
        store.get_recipes(None).await;
        let before = transport.request_count();

        let id = store.add_recipe(&json!({ "id": 9, "name": "pie" })).await;

        assert_eq!(id, Some(RecipeId::new(9)));
        assert_eq!(store.recipes().await.len(), 2);
        assert_eq!(transport.request_count(), before);
        assert_eq!(store.loading().transitions(), 2);
    }

    #[tokio::test]
    async fn add_recipe_without_id_is_rejected() {
        let (store, _, notifications) = store();
        let mut sub = notifications.subscribe();

        assert!(store.add_recipe(&json!({ "name": "draft" })).await.is_none());
        assert!(store.recipes().await.is_empty());
        assert_eq!(sub.drain().len(), 1);
    }
}
