//! Identity types for recipe-sync.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned identifier of a persisted recipe.
///
/// Recipes that have not been saved yet carry no id at all
/// (`Option<RecipeId>::None`), never a sentinel value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipeId(i64);

impl RecipeId {
    /// Create a RecipeId from its numeric value.
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Get the numeric value.
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RecipeId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl FromStr for RecipeId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
