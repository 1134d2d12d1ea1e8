//! # sync-core
//!
//! Pure logic for recipe-sync (no I/O, instant tests).
//!
//! This crate holds the state slices and algorithms of the client layer
//! without any network access:
//! - [`mapper`] turns arbitrary API JSON into [`Recipe`](sync_types::Recipe)s
//! - [`pagination`] derives per-category page counts
//! - [`endpoint`] builds API URLs and query strings
//! - [`state`] holds the data owned by each store, with its mutations
//!
//! The actual I/O is performed by `sync-client`, which wraps these slices in
//! async stores and commits mutations once requests resolve.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod endpoint;
pub mod mapper;
pub mod notification;
pub mod pagination;
pub mod search;
pub mod state;
pub mod view;

pub use endpoint::{category_filter, paths, ApiBase, ConfigError, RecipeQuery};
pub use mapper::{to_recipe, to_recipes};
pub use notification::{Notification, NotificationKind};
pub use pagination::{page_lengths, Pagination, ALL_CATEGORIES, DEFAULT_PAGE_SIZE};
pub use search::{SearchMode, SearchQuery, DEFAULT_SEARCH_LIMIT, MAX_SEARCH_LIMIT};
pub use state::{BrowseState, CreateState, SearchState};
pub use view::View;
