use serde::{Deserialize, Serialize};

use crate::domain::{
    organization::entities::Organization,
    query::{
        filter::{FilterClause, FilterSet},
        sort::{SortSpec, SortTerm},
    },
};

/// Body of `POST /organizations/search`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Zero-based page index
    pub page: u32,
    pub size: u32,
    pub filters: Vec<FilterClause>,
    /// Ordered by ascending priority
    pub sort: Vec<SortTerm>,
}

impl SearchRequest {
    /// Request of the organizations table: current sort, no filters.
    pub fn table(page: u32, size: u32, sort: &SortSpec) -> Self {
        build_search_request(page, size, &FilterSet::new(), sort)
    }

    /// Request of the filter search panel: active filters, first page, `id asc`.
    pub fn panel(size: u32, filters: &FilterSet) -> Self {
        build_search_request(0, size, filters, &SortSpec::default())
    }
}

/// Composes filters, sort and pagination into a search request.
pub fn build_search_request(
    page: u32,
    size: u32,
    filters: &FilterSet,
    sort: &SortSpec,
) -> SearchRequest {
    let mut terms = sort.terms().to_vec();
    terms.sort_by_key(|term| term.priority);

    SearchRequest {
        page,
        size,
        filters: filters.clauses().to_vec(),
        sort: terms,
    }
}

/// One page of organizations as returned by the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_elements: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u32>,
}

impl PagedResult {
    /// Zero matching records; rendered as an empty state, not an error.
    pub fn is_empty(&self) -> bool {
        self.organizations.is_empty()
    }
}
