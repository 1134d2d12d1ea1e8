//! Pagination bookkeeping.
//!
//! Page counts are derived from the totals reported by `recipes/info`:
//! one entry per category plus the [`ALL_CATEGORIES`] sentinel. The whole
//! mapping is recomputed on every fetch; entries are never patched.

use std::collections::BTreeMap;
use sync_types::RecipesInfo;

/// Key under which the page count across all categories is stored.
pub const ALL_CATEGORIES: &str = "all";

/// Number of recipes per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 12;

/// Compute `ceil(total / page_size)` for every category and for `all`.
///
/// A category literally named `all` is shadowed by the overall count.
pub fn page_lengths(info: &RecipesInfo, page_size: u32) -> BTreeMap<String, u32> {
    let mut lengths: BTreeMap<String, u32> = info
        .total_per_category
        .iter()
        .map(|(category, total)| (category.clone(), pages(*total, page_size)))
        .collect();
    lengths.insert(ALL_CATEGORIES.to_string(), pages(info.total, page_size));
    lengths
}

fn pages(total: u64, page_size: u32) -> u32 {
    let size = u64::from(page_size.max(1));
    u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
}

/// Current page, page size and per-category page counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    page_size: u32,
    lengths: BTreeMap<String, u32>,
}

impl Pagination {
    /// Start on page 1 with no known page counts.
    ///
    /// A page size of zero is treated as one.
    pub fn new(page_size: u32) -> Self {
        Self {
            page: 1,
            page_size: page_size.max(1),
            lengths: BTreeMap::new(),
        }
    }

    /// Current 1-based page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Items per page.
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Page count per category, including `all`.
    pub fn lengths(&self) -> &BTreeMap<String, u32> {
        &self.lengths
    }

    /// Page count for a category (`None` means all categories).
    ///
    /// Returns `None` when the category is unknown or counts were never fetched.
    pub fn page_count(&self, category: Option<&str>) -> Option<u32> {
        self.lengths
            .get(category.unwrap_or(ALL_CATEGORIES))
            .copied()
    }

    /// Replace every page count from fresh totals.
    pub fn apply_info(&mut self, info: &RecipesInfo) {
        self.lengths = page_lengths(info, self.page_size);
    }

    /// Move to `page`, clamped to `1..=page_count(category)`.
    ///
    /// With no known count for the category only the lower bound applies.
    /// Returns the page actually selected.
    pub fn set_page(&mut self, page: u32, category: Option<&str>) -> u32 {
        let upper = self.page_count(category).map_or(u32::MAX, |count| count.max(1));
        self.page = page.clamp(1, upper);
        self.page
    }

    /// Go back to page 1.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}
