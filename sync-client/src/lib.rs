//! # sync-client
//!
//! Client-side synchronization layer for the recipe API.
//!
//! This is the library a front end drives: it keeps local recipe state in
//! step with the server and tells the UI what is happening.
//!
//! ## Features
//!
//! - **Gateway**: one place that builds URLs and normalizes every answer
//!   into `Result<_, ClientError>`
//! - **Domain stores**: browse, search and create, each with loading flags
//!   raised for exactly the duration of their actions
//! - **Coordinator**: explicit cross-store operations (a created recipe lands
//!   in the browse listing and becomes the active view)
//! - **Notifications**: failures surface on a broadcast channel instead of
//!   reaching the caller
//! - **Transport abstraction**: reqwest over HTTP, or a scripted mock
//!
//! ## Example
//!
//! ```ignore
//! use sync_client::{Coordinator, HttpTransport, SyncConfig};
//!
//! let config = SyncConfig::default();
//! let coordinator = Coordinator::new(&config, HttpTransport::new(&config)?)?;
//!
//! coordinator.start().await;
//! coordinator.import_recipe("https://example.com/apple-pie").await;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod coordinator;
pub mod error;
pub mod gateway;
pub mod loading;
pub mod notify;
pub mod stores;
pub mod transport;

pub use config::{SyncConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use coordinator::Coordinator;
pub use error::ClientError;
pub use gateway::Gateway;
pub use loading::{LoadingFlag, LoadingGuard};
pub use notify::{NotificationChannel, Subscription};
pub use stores::{BrowseStore, CreateStore, SearchStore, StoreContext};
pub use transport::{
    HttpTransport, Method, MockTransport, Release, Request, Response, Transport, TransportError,
};
