//! Create store: importing from a URL, posting hand-written recipes and the
//! list of importable websites.
//!
//! Import and post only talk to the server. Placing the new recipe in the
//! browse listing is the coordinator's job, see
//! [`Coordinator::recipe_created`](crate::Coordinator::recipe_created).

use serde_json::{Map, Value};
use sync_core::{paths, to_recipe, CreateState};
use sync_types::{ImportRequest, Recipe, WebsitesBody};
use tokio::sync::Mutex;

use super::StoreContext;
use crate::error::ClientError;
use crate::loading::LoadingFlag;
use crate::transport::{Transport, TransportError};

/// Store behind the create/import forms.
pub struct CreateStore<T: Transport> {
    ctx: StoreContext<T>,
    state: Mutex<CreateState>,
    importing: LoadingFlag,
    posting: LoadingFlag,
    websites_loading: LoadingFlag,
}

impl<T: Transport> CreateStore<T> {
    /// Create an empty store.
    pub fn new(ctx: StoreContext<T>) -> Self {
        Self {
            ctx,
            state: Mutex::new(CreateState::default()),
            importing: LoadingFlag::new(),
            posting: LoadingFlag::new(),
            websites_loading: LoadingFlag::new(),
        }
    }

    /// Raised while an import is in flight.
    pub fn importing(&self) -> &LoadingFlag {
        &self.importing
    }

    /// Raised while a recipe is being posted.
    pub fn posting(&self) -> &LoadingFlag {
        &self.posting
    }

    /// Raised while the website list is being fetched.
    pub fn websites_loading(&self) -> &LoadingFlag {
        &self.websites_loading
    }

    /// Whether an import is in flight.
    pub fn is_importing(&self) -> bool {
        self.importing.is_loading()
    }

    /// Whether a post is in flight.
    pub fn is_posting(&self) -> bool {
        self.posting.is_loading()
    }

    /// Whether the website list is being fetched.
    pub fn is_websites_loading(&self) -> bool {
        self.websites_loading.is_loading()
    }

    /// Cached importable websites.
    pub async fn websites(&self) -> Vec<String> {
        self.state.lock().await.websites().to_vec()
    }

    /// The importable websites, fetched once and then served from cache.
    ///
    /// On failure the cache stays empty and the next call retries.
    pub async fn fetch_websites(&self) -> Vec<String> {
        {
            let state = self.state.lock().await;
            if state.has_websites() {
                return state.websites().to_vec();
            }
        }

        let _loading = self.websites_loading.begin();

        match self
            .ctx
            .gateway
            .get::<WebsitesBody>(paths::IMPORT_WEBSITES)
            .await
        {
            Ok(body) => {
                tracing::info!(count = body.websites.len(), "importable websites cached");
                let mut state = self.state.lock().await;
                state.set_websites(body.websites);
                state.websites().to_vec()
            }
            Err(e) => {
                self.ctx.report("fetch_websites", &e);
                Vec::new()
            }
        }
    }

    /// Ask the server to import the recipe published at `url`.
    ///
    /// Returns the raw created recipe. The URL is trimmed; an empty one is
    /// rejected before any request.
    pub async fn import_recipe(&self, url: &str) -> Option<Value> {
        let url = url.trim();
        if url.is_empty() {
            self.ctx.report(
                "import_recipe",
                &ClientError::Precondition("no URL to import from".into()),
            );
            return None;
        }

        let _loading = self.importing.begin();
        let request = ImportRequest {
            url: url.to_string(),
        };

        let result = self
            .ctx
            .gateway
            .post::<_, Value>(paths::IMPORT_URL, &request)
            .await
            .and_then(require_id);

        match result {
            Ok(created) => {
                tracing::info!(url, id = %created["id"], "recipe imported");
                Some(created)
            }
            Err(e) => {
                self.ctx.report("import_recipe", &e);
                None
            }
        }
    }

    /// Save a hand-written recipe.
    ///
    /// Any id on `recipe` is dropped from the payload; the server assigns
    /// one. Servers may answer with the full recipe or only `{ "id": .. }`,
    /// so the answer is laid over what was sent.
    pub async fn post_recipe(&self, recipe: &Recipe) -> Option<Value> {
        let named = recipe
            .name
            .as_deref()
            .is_some_and(|name| !name.trim().is_empty());
        if !named {
            self.ctx.report(
                "post_recipe",
                &ClientError::Precondition("recipe needs a name".into()),
            );
            return None;
        }

        let mut payload = match serde_json::to_value(recipe) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => {
                self.ctx.report(
                    "post_recipe",
                    &ClientError::Precondition("recipe cannot be encoded".into()),
                );
                return None;
            }
        };
        payload.remove("id");

        let _loading = self.posting.begin();

        let result = self
            .ctx
            .gateway
            .post::<_, Value>(paths::RECIPES, &payload)
            .await
            .map(|answer| merge(payload.clone(), answer))
            .and_then(require_id);

        match result {
            Ok(created) => {
                tracing::info!(id = %created["id"], "recipe posted");
                Some(created)
            }
            Err(e) => {
                self.ctx.report("post_recipe", &e);
                None
            }
        }
    }
}

fn merge(mut sent: Map<String, Value>, answer: Value) -> Value {
    match answer {
        Value::Object(fields) => {
            sent.extend(fields);
            Value::Object(sent)
        }
        // Bare id.
        Value::Number(_) => {
            sent.insert("id".into(), answer);
            Value::Object(sent)
        }
        other => other,
    }
}

fn require_id(created: Value) -> Result<Value, ClientError> {
    if to_recipe(&created).id.is_some() {
        Ok(created)
    } else {
        Err(TransportError::InvalidBody("answer carries no recipe id".into()).into())
    }
}
