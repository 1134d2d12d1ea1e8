//! # sync-types
//!
//! Wire format and domain types for the recipe-sync client layer.
//!
//! This crate provides the foundational types used across all recipe-sync crates:
//! - [`RecipeId`] - Server-assigned recipe identity
//! - [`Recipe`], [`Nutrition`] - Normalized recipe records
//! - [`CategoriesBody`], [`RecipesBody`], [`InfoBody`], ... - Response envelopes
//! - [`ApiError`] - The error payload returned by the recipe API

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod ids;
mod messages;
mod recipe;

pub use error::{ApiError, ErrorBody};
pub use ids::RecipeId;
pub use messages::{
    CategoriesBody, ImportRequest, InfoBody, RecipesBody, RecipesInfo, WebsitesBody,
};
pub use recipe::{Nutrition, Recipe};
