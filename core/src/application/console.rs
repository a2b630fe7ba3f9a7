//! State owner for an interactive organizations console.
//!
//! A view layer turns user events into [`ConsoleAction`]s, feeds them to
//! [`Console::dispatch`] and renders the returned [`ConsoleOutcome`].

use tracing::{debug, warn};

use crate::domain::{
    common::{PagingConfig, entities::app_errors::CoreError},
    organization::{entities::Organization, ports::OrganizationService},
    query::{
        fields::OrganizationField,
        filter::{FilterClause, FilterOperator, FilterSet},
        pagination::PageControls,
        request::{PagedResult, SearchRequest},
        sort::SortSpec,
    },
};

#[derive(Debug, Clone, PartialEq)]
pub struct ConsoleState {
    pub filters: FilterSet,
    pub sort: SortSpec,
    /// Page last echoed by the backend
    pub page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub search_page_size: u32,
    /// Rows of the organizations table
    pub rows: Vec<Organization>,
}

impl ConsoleState {
    pub fn new(paging: &PagingConfig) -> Self {
        Self {
            filters: FilterSet::new(),
            sort: SortSpec::default(),
            page: 0,
            total_pages: 0,
            page_size: paging.page_size,
            search_page_size: paging.search_page_size,
            rows: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleAction {
    LoadPage(u32),
    SortClick {
        field: OrganizationField,
        multi_sort: bool,
    },
    ClearSorts,
    SelectFilterField(OrganizationField),
    AddFilter {
        field: String,
        operator: String,
        raw_value: String,
    },
    RemoveFilter(usize),
    ClearFilters,
    Search,
    NextPage,
    PreviousPage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleOutcome {
    Table {
        result: PagedResult,
        controls: PageControls,
    },
    SearchResults(PagedResult),
    /// Zero matching records
    Empty,
    Filters(Vec<FilterClause>),
    Operators(Vec<FilterOperator>),
}

pub struct Console<S: OrganizationService> {
    service: S,
    state: ConsoleState,
}

impl<S: OrganizationService> Console<S> {
    pub fn new(service: S, paging: &PagingConfig) -> Self {
        Self {
            service,
            state: ConsoleState::new(paging),
        }
    }

    pub fn state(&self) -> &ConsoleState {
        &self.state
    }

    pub async fn dispatch(&mut self, action: ConsoleAction) -> Result<ConsoleOutcome, CoreError> {
        debug!(?action, "console action");

        match action {
            ConsoleAction::LoadPage(page) => self.load_page(page).await,
            ConsoleAction::SortClick { field, multi_sort } => {
                self.state.sort.handle_click(field, multi_sort);
                self.load_page(0).await
            }
            ConsoleAction::ClearSorts => {
                self.state.sort.clear();
                self.load_page(0).await
            }
            ConsoleAction::SelectFilterField(field) => {
                Ok(ConsoleOutcome::Operators(field.operators().to_vec()))
            }
            ConsoleAction::AddFilter {
                field,
                operator,
                raw_value,
            } => {
                if let Err(e) = self.state.filters.add(&field, &operator, &raw_value) {
                    warn!(field = %field, operator = %operator, "rejected filter: {}", e);
                    return Err(CoreError::Query(e));
                }
                Ok(self.filters())
            }
            ConsoleAction::RemoveFilter(index) => {
                self.state.filters.remove(index);
                Ok(self.filters())
            }
            ConsoleAction::ClearFilters => {
                self.state.filters.clear();
                Ok(self.filters())
            }
            ConsoleAction::Search => self.search().await,
            ConsoleAction::NextPage => match self.controls().next {
                Some(page) => self.load_page(page).await,
                None => Ok(self.table()),
            },
            ConsoleAction::PreviousPage => match self.controls().previous {
                Some(page) => self.load_page(page).await,
                None => Ok(self.table()),
            },
        }
    }

    async fn load_page(&mut self, page: u32) -> Result<ConsoleOutcome, CoreError> {
        let request = SearchRequest::table(page, self.state.page_size, &self.state.sort);
        let result = self.service.search(request).await?;

        self.state.page = result.page;
        self.state.total_pages = result.total_pages;
        self.state.rows = result.organizations.clone();

        if result.is_empty() {
            return Ok(ConsoleOutcome::Empty);
        }

        Ok(ConsoleOutcome::Table {
            controls: self.controls(),
            result,
        })
    }

    async fn search(&mut self) -> Result<ConsoleOutcome, CoreError> {
        let request = SearchRequest::panel(self.state.search_page_size, &self.state.filters);
        let result = self.service.search(request).await?;

        if result.is_empty() {
            return Ok(ConsoleOutcome::Empty);
        }
        Ok(ConsoleOutcome::SearchResults(result))
    }

    fn controls(&self) -> PageControls {
        PageControls::new(self.state.page, self.state.total_pages)
    }

    /// Current table without a round trip, used when a page control is disabled.
    fn table(&self) -> ConsoleOutcome {
        if self.state.rows.is_empty() {
            return ConsoleOutcome::Empty;
        }

        ConsoleOutcome::Table {
            result: PagedResult {
                organizations: self.state.rows.clone(),
                page: self.state.page,
                total_pages: self.state.total_pages,
                total_elements: None,
                size: Some(self.state.page_size),
            },
            controls: self.controls(),
        }
    }

    fn filters(&self) -> ConsoleOutcome {
        ConsoleOutcome::Filters(self.state.filters.clauses().to_vec())
    }
}
