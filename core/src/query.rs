use serde::Deserialize;
use serde::Serialize;
use storefront_backend_client::ProductQuery;

/// The canonical browsing state: page, category filter, search text.
///
/// Owned by the orchestrator and mutated only through its mutators; the
/// URL, the outgoing request, and UI highlighting are all derived from it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryState {
    /// 1-based page number.
    pub page: u32,

    /// Selected category, if any. Retained even while a search is active,
    /// but excluded from the effective filter until the search clears.
    pub category_id: Option<i64>,

    /// Free-text search. Non-empty text takes precedence over the
    /// category filter.
    pub search: String,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            page: 1,
            category_id: None,
            search: String::new(),
        }
    }
}

/// The single active narrowing criterion actually sent to the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EffectiveFilter {
    Search(String),
    Category(i64),
    None,
}

impl QueryState {
    /// Apply the precedence rule: search text wins over the category.
    pub fn effective_filter(&self) -> EffectiveFilter {
        if !self.search.is_empty() {
            EffectiveFilter::Search(self.search.clone())
        } else if let Some(id) = self.category_id {
            EffectiveFilter::Category(id)
        } else {
            EffectiveFilter::None
        }
    }

    /// Outgoing request parameters for this state.
    pub fn to_request(&self) -> ProductQuery {
        match self.effective_filter() {
            EffectiveFilter::Search(q) => ProductQuery {
                q: Some(q),
                category_id: None,
                page: self.page,
            },
            EffectiveFilter::Category(id) => ProductQuery {
                q: None,
                category_id: Some(id),
                page: self.page,
            },
            EffectiveFilter::None => ProductQuery {
                q: None,
                category_id: None,
                page: self.page,
            },
        }
    }

    /// State after a category click: search cleared, back to page 1.
    pub fn with_category(&self, category_id: i64) -> Self {
        Self {
            page: 1,
            category_id: Some(category_id),
            search: String::new(),
        }
    }

    /// State after clearing the category filter ("All").
    pub fn without_category(&self) -> Self {
        Self {
            page: 1,
            category_id: None,
            search: String::new(),
        }
    }

    /// State after a (debounced) search submission. The category stays
    /// stored; the effective filter switches to the text while non-empty.
    pub fn with_search(&self, search: impl Into<String>) -> Self {
        Self {
            page: 1,
            category_id: self.category_id,
            search: search.into(),
        }
    }

    /// State on the given page with filters untouched.
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            category_id: self.category_id,
            search: self.search.clone(),
        }
    }
}
