//! Ingredient search queries.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use url::form_urlencoded;

use crate::endpoint::{paths, with_query};

/// Results returned when no limit is given.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

/// The server never returns more than this many results.
pub const MAX_SEARCH_LIMIT: u32 = 30;

/// How the server ranks recipes against the given ingredients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SearchMode {
    /// Prefer recipes with the fewest missing ingredients.
    Minimize,
    /// Prefer recipes that use as many of the ingredients as possible.
    #[default]
    Maximize,
}

impl SearchMode {
    /// Value of the `mode` query parameter.
    pub fn as_param(self) -> u8 {
        match self {
            Self::Minimize => 1,
            Self::Maximize => 2,
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Minimize => write!(f, "minimize"),
            Self::Maximize => write!(f, "maximize"),
        }
    }
}

impl FromStr for SearchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "minimize" | "min" => Ok(Self::Minimize),
            "2" | "maximize" | "max" => Ok(Self::Maximize),
            other => Err(format!("unknown search mode: {other}")),
        }
    }
}

/// A search by ingredients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    ingredients: Vec<String>,
    mode: SearchMode,
    limit: u32,
}

impl SearchQuery {
    /// Search for the given ingredients with the default mode and limit.
    pub fn new<I, S>(ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ingredients: ingredients.into_iter().map(Into::into).collect(),
            mode: SearchMode::default(),
            limit: DEFAULT_SEARCH_LIMIT,
        }
    }

    /// Set the ranking mode.
    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the result limit, capped at [`MAX_SEARCH_LIMIT`].
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit.clamp(1, MAX_SEARCH_LIMIT);
        self
    }

    /// Ranking mode.
    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Result limit.
    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Trimmed, non-empty ingredients with duplicates removed (first wins).
    pub fn unique_ingredients(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.ingredients
            .iter()
            .map(|i| i.trim())
            .filter(|i| !i.is_empty() && seen.insert(*i))
            .collect()
    }

    /// True when there is nothing to search for.
    pub fn is_empty(&self) -> bool {
        self.unique_ingredients().is_empty()
    }

    /// Endpoint path, e.g. `search?ingredients=egg%2Cmilk&mode=2&n=10`.
    pub fn endpoint(&self) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("ingredients", &self.unique_ingredients().join(","))
            .append_pair("mode", &self.mode.as_param().to_string())
            .append_pair("n", &self.limit.to_string())
            .finish();
        with_query(paths::SEARCH, query)
    }
}
