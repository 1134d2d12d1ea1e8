//! Root coordinator.
//!
//! Owns the gateway, the notification channel and the three domain stores,
//! and carries the small amount of state that spans them: which store is
//! active for shared lookups, which category node is selected, and the last
//! recipe created through it.
//!
//! # Example
//!
//! ```ignore
//! use sync_client::{Coordinator, HttpTransport, SyncConfig};
//!
//! let config = SyncConfig::new("http://localhost:3001/api/v1");
//! let coordinator = Coordinator::new(&config, HttpTransport::new(&config)?)?;
//!
//! let mut notifications = coordinator.notifications().subscribe();
//! coordinator.start().await;
//!
//! for recipe in coordinator.browse().recipes().await {
//!     println!("{}", recipe.display_name());
//! }
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde_json::Value;
use sync_core::{ConfigError, Notification, View};
use sync_types::{Recipe, RecipeId};

use crate::config::SyncConfig;
use crate::gateway::Gateway;
use crate::loading::LoadingFlag;
use crate::notify::NotificationChannel;
use crate::stores::{BrowseStore, CreateStore, SearchStore, StoreContext};
use crate::transport::Transport;

#[derive(Debug, Default)]
struct ViewState {
    store: Option<View>,
    selected_node: Option<String>,
    last_created: Option<RecipeId>,
}

/// Entry point of the client layer.
pub struct Coordinator<T: Transport> {
    ctx: StoreContext<T>,
    browse: BrowseStore<T>,
    search: SearchStore<T>,
    create: CreateStore<T>,
    view: Mutex<ViewState>,
}

impl<T: Transport> Coordinator<T> {
    /// Wire up every component for the API described by `config`.
    pub fn new(config: &SyncConfig, transport: T) -> Result<Self, ConfigError> {
        let gateway = Gateway::new(config.api_base()?, transport);
        let ctx = StoreContext::new(gateway, NotificationChannel::new());

        tracing::debug!(base = %ctx.gateway.base().as_str(), "coordinator created");

        Ok(Self {
            browse: BrowseStore::new(ctx.clone(), config.page_size),
            search: SearchStore::new(ctx.clone()),
            create: CreateStore::new(ctx.clone()),
            ctx,
            view: Mutex::new(ViewState::default()),
        })
    }

    /// Absolute URL of an API endpoint.
    pub fn api_url(&self, endpoint: &str) -> String {
        self.ctx.gateway.build_url(endpoint)
    }

    /// The gateway shared by every store.
    pub fn gateway(&self) -> &Gateway<T> {
        &self.ctx.gateway
    }

    /// The browse store.
    pub fn browse(&self) -> &BrowseStore<T> {
        &self.browse
    }

    /// The search store.
    pub fn search(&self) -> &SearchStore<T> {
        &self.search
    }

    /// The create store.
    pub fn create(&self) -> &CreateStore<T> {
        &self.create
    }

    /// Channel every failure is published on.
    pub fn notifications(&self) -> &NotificationChannel {
        &self.ctx.notifications
    }

    /// The global loading flag.
    pub fn loading(&self) -> &LoadingFlag {
        &self.ctx.global_loading
    }

    /// Whether any global operation is in flight.
    pub fn is_loading(&self) -> bool {
        self.ctx.global_loading.is_loading()
    }

    // =========================================================================
    // View state
    // =========================================================================

    /// Make `view` the store used by [`recipe_by_id`](Self::recipe_by_id).
    pub fn set_store(&self, view: View) {
        tracing::debug!(%view, "active store changed");
        self.view_state().store = Some(view);
    }

    /// The active store, if one was ever selected.
    pub fn store(&self) -> Option<View> {
        self.view_state().store
    }

    /// Look a recipe up in the active store.
    pub async fn recipe_by_id(&self, id: RecipeId) -> Option<Recipe> {
        match self.store()? {
            View::Browse => self.browse.recipe(id).await,
            View::Search => self.search.recipe(id).await,
        }
    }

    /// Record the selected category node. Blank names clear the selection.
    pub fn select_node(&self, node: Option<String>) {
        let node = node.filter(|n| !n.trim().is_empty());
        self.view_state().selected_node = node;
    }

    /// The selected category node.
    pub fn selected_node(&self) -> Option<String> {
        self.view_state().selected_node.clone()
    }

    /// Select a category node and load its first page.
    pub async fn browse_category(&self, node: Option<String>) -> bool {
        self.select_node(node);
        let node = self.selected_node();
        self.browse.set_page(1, node.as_deref()).await;
        self.browse.get_recipes(node.as_deref()).await
    }

    /// Id of the most recently created or imported recipe.
    pub fn last_created(&self) -> Option<RecipeId> {
        self.view_state().last_created
    }

    // =========================================================================
    // Cross-store operations
    // =========================================================================

    /// Import the recipe at `url` and show it in the browse listing.
    pub async fn import_recipe(&self, url: &str) -> bool {
        match self.create.import_recipe(url).await {
            Some(created) => self.recipe_created(&created).await.is_some(),
            None => false,
        }
    }

    /// Save a hand-written recipe and show it in the browse listing.
    pub async fn post_recipe(&self, recipe: &Recipe) -> bool {
        match self.create.post_recipe(recipe).await {
            Some(created) => self.recipe_created(&created).await.is_some(),
            None => false,
        }
    }

    /// Place a freshly persisted recipe.
    ///
    /// Appends it to the browse listing, switches to the browse store and
    /// refreshes the categories. The refresh is best-effort: its failure is
    /// reported but keeps the append and the switch.
    pub async fn recipe_created(&self, raw: &Value) -> Option<RecipeId> {
        let id = self.browse.add_recipe(raw).await?;

        self.view_state().last_created = Some(id);
        self.set_store(View::Browse);

        let name = self
            .browse
            .recipe(id)
            .await
            .map(|recipe| recipe.display_name().to_string())
            .unwrap_or_default();
        self.ctx
            .notifications
            .send(Notification::success("Recipe saved", name));

        self.browse.get_categories().await;
        Some(id)
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Load what the browse view needs: categories, page counts and the
    /// first page of recipes for the selected node.
    ///
    /// Returns `true` only if all three loads succeeded.
    pub async fn start(&self) -> bool {
        tracing::info!(base = %self.ctx.gateway.base().as_str(), "starting");
        let categories = self.browse.get_categories().await;
        let lengths = self.browse.get_pagination_lengths().await;
        let node = self.selected_node();
        let recipes = self.browse.get_recipes(node.as_deref()).await;
        categories && lengths && recipes
    }

    /// Tear everything down.
    ///
    /// Subscriptions see the end of the stream once any notification
    /// channel handles cloned out of the coordinator are gone too.
    pub fn shutdown(self) {
        tracing::info!(
            subscribers = self.ctx.notifications.subscriber_count(),
            "shutting down"
        );
    }

    fn view_state(&self) -> MutexGuard<'_, ViewState> {
        self.view.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
