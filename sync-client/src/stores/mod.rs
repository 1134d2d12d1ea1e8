//! Domain stores.
//!
//! Each store owns one state slice from sync-core and exposes async
//! accessors (snapshots) plus actions. All actions share the same shape:
//!
//! 1. raise the loading flag(s) through a guard;
//! 2. await the gateway;
//! 3. on success, commit the mutation while the flag is still up;
//! 4. on failure, commit nothing and publish one error notification.
//!
//! Actions report their outcome as `bool`/`Option`; errors never reach the
//! caller. State locks are never held across a request, and overlapping
//! actions on one store commit in completion order (last one wins).

mod browse;
mod create;
mod search;

pub use browse::BrowseStore;
pub use create::CreateStore;
pub use search::SearchStore;

use std::sync::Arc;

use crate::error::ClientError;
use crate::gateway::Gateway;
use crate::loading::LoadingFlag;
use crate::notify::NotificationChannel;
use crate::transport::Transport;

/// Collaborators shared by every store.
pub struct StoreContext<T: Transport> {
    /// Gateway to the recipe API.
    pub gateway: Arc<Gateway<T>>,
    /// Where failures are reported.
    pub notifications: NotificationChannel,
    /// Flag raised by global operations.
    pub global_loading: LoadingFlag,
}

impl<T: Transport> StoreContext<T> {
    /// Bundle the shared collaborators.
    pub fn new(gateway: Gateway<T>, notifications: NotificationChannel) -> Self {
        Self {
            gateway: Arc::new(gateway),
            notifications,
            global_loading: LoadingFlag::new(),
        }
    }

    /// Publish the failure of `action` as an error notification.
    pub(crate) fn report(&self, action: &'static str, err: &ClientError) {
        tracing::debug!(action, error = %err, "action failed");
        self.notifications.send(err.to_notification());
    }
}

impl<T: Transport> Clone for StoreContext<T> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            notifications: self.notifications.clone(),
            global_loading: self.global_loading.clone(),
        }
    }
}
