//! API URL construction.
//!
//! All endpoints hang off one configured base (origin plus prefix, e.g.
//! `https://host/api/v1`). [`ApiBase::build_url`] joins base and endpoint
//! with exactly one slash; query strings are form-encoded.

use thiserror::Error;
use url::form_urlencoded;
use url::Url;

/// Endpoint paths relative to the API base.
pub mod paths {
    /// `GET` the category list.
    pub const CATEGORIES: &str = "categories";
    /// `GET` recipes, `POST` a new recipe.
    pub const RECIPES: &str = "recipes";
    /// `GET` item totals for pagination.
    pub const RECIPES_INFO: &str = "recipes/info";
    /// `GET` websites supported by the importer.
    pub const IMPORT_WEBSITES: &str = "import/websites";
    /// `POST` a URL to import a recipe from.
    pub const IMPORT_URL: &str = "import/url";
    /// `GET` recipes matching ingredients.
    pub const SEARCH: &str = "search";
}

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed.
    #[error("invalid base url {url:?}: {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The base URL uses a scheme other than http or https.
    #[error("unsupported scheme {0:?} (expected http or https)")]
    UnsupportedScheme(String),
}

/// Validated API base URL, stored without a trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(String);

impl ApiBase {
    /// Validate and normalize a base URL.
    pub fn parse(base: &str) -> Result<Self, ConfigError> {
        let parsed = Url::parse(base.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })?;

        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(ConfigError::UnsupportedScheme(other.to_string())),
        }

        Ok(Self(parsed.as_str().trim_end_matches('/').to_string()))
    }

    /// The normalized base.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Absolute URL for an endpoint path (which may carry a query string).
    pub fn build_url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.0, endpoint.trim_start_matches('/'))
    }
}

/// Normalize an optional category filter: empty or blank means no filter.
pub fn category_filter(category: Option<&str>) -> Option<&str> {
    category.map(str::trim).filter(|c| !c.is_empty())
}

/// Parameters of a `GET recipes` request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecipeQuery<'a> {
    /// Category filter; `None` lists every category.
    pub category: Option<&'a str>,
    /// 1-based page.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
}

impl<'a> RecipeQuery<'a> {
    /// Query for one category (or all of them).
    pub fn new(category: Option<&'a str>) -> Self {
        Self {
            category: category_filter(category),
            ..Self::default()
        }
    }

    /// Restrict to one page of `limit` items.
    pub fn with_page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Endpoint path with query string, e.g. `recipes?c=soup&page=2&limit=12`.
    pub fn endpoint(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        if let Some(category) = category_filter(self.category) {
            query.append_pair("c", category);
        }
        if let Some(page) = self.page {
            query.append_pair("page", &page.to_string());
        }
        if let Some(limit) = self.limit {
            query.append_pair("limit", &limit.to_string());
        }
        with_query(paths::RECIPES, query.finish())
    }
}

pub(crate) fn with_query(path: &str, query: String) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}
