//! Store selection.

use std::fmt;
use std::str::FromStr;

/// Which domain store the UI is currently showing.
///
/// Shared lookups such as "recipe by id" are answered by the active store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Paged listing, filtered by category.
    Browse,
    /// Results of an ingredient search.
    Search,
}

impl View {
    /// Stable lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Browse => "browse",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browse" => Ok(Self::Browse),
            "search" => Ok(Self::Search),
            other => Err(format!("unknown view: {other}")),
        }
    }
}
