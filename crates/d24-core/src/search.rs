//! # Driver Search Query Contract
//!
//! Turns a city, optional salary/experience bounds and a page number into a
//! deterministic query description, and interprets the paginated result
//! envelope into a render-ready page.
//!
//! ## Rules
//!
//! - The city is required; an empty (or whitespace) city is rejected locally
//!   with "Please enter a city".
//! - Only filters that carry a value are emitted. Absent filters are never
//!   sent as empty strings.
//! - A min bound greater than its max bound is sent as-is; the backend is
//!   authoritative for range semantics.
//! - The page size is fixed at [`PAGE_SIZE`].
//! - Applying or clearing filters resets to page 1. Changing page keeps the
//!   active filters.
//! - Results replace the current list wholesale; an empty result is a normal
//!   outcome reported as [`SearchFeedback::NoDrivers`], not an error.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// Fixed number of drivers per page.
pub const PAGE_SIZE: u32 = 10;

/// Feedback shown when a search succeeds with no matches.
pub const NO_DRIVERS_MESSAGE: &str = "No drivers found matching your criteria";

/// Pagination block of the backend response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Page number, 1-based.
    #[serde(default = "first_page")]
    pub page: u32,
    /// Page size the backend applied.
    #[serde(default)]
    pub limit: u32,
    /// Total number of matching records.
    #[serde(default)]
    pub total_count: u64,
    /// Total number of pages.
    #[serde(default)]
    pub total_pages: u32,
    /// Whether a next page exists.
    #[serde(default)]
    pub has_next_page: bool,
    /// Whether a previous page exists.
    #[serde(default)]
    pub has_prev_page: bool,
}

fn first_page() -> u32 {
    1
}

/// Optional numeric filters for driver search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverFilters {
    /// Lower bound on monthly salary expectation.
    pub min_salary: Option<u64>,
    /// Upper bound on monthly salary expectation.
    pub max_salary: Option<u64>,
    /// Lower bound on years of experience.
    pub min_experience: Option<u32>,
    /// Upper bound on years of experience.
    pub max_experience: Option<u32>,
}

impl DriverFilters {
    /// Build filters from raw text inputs. Empty or non-numeric inputs leave
    /// the corresponding bound unset.
    pub fn from_inputs(
        min_salary: &str,
        max_salary: &str,
        min_experience: &str,
        max_experience: &str,
    ) -> Self {
        Self {
            min_salary: parse_bound(min_salary),
            max_salary: parse_bound(max_salary),
            min_experience: parse_bound(min_experience),
            max_experience: parse_bound(max_experience),
        }
    }

    /// Whether no bound is set.
    pub fn is_empty(&self) -> bool {
        self.min_salary.is_none()
            && self.max_salary.is_none()
            && self.min_experience.is_none()
            && self.max_experience.is_none()
    }

    /// Whether either pair has min greater than max.
    pub fn has_inverted_range(&self) -> bool {
        let inverted = |min: Option<u64>, max: Option<u64>| matches!((min, max), (Some(a), Some(b)) if a > b);
        inverted(self.min_salary, self.max_salary)
            || inverted(
                self.min_experience.map(u64::from),
                self.max_experience.map(u64::from),
            )
    }
}

fn parse_bound<T: std::str::FromStr>(input: &str) -> Option<T> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse().ok()
}

/// A single, fully specified driver search request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchQuery {
    city: String,
    filters: DriverFilters,
    page: u32,
}

impl SearchQuery {
    /// Start a query for `city` at page 1 with no filters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCity`] if the city is blank.
    pub fn new(city: &str) -> Result<Self, SearchError> {
        let city = city.trim();
        if city.is_empty() {
            return Err(SearchError::MissingCity);
        }
        Ok(Self {
            city: city.to_string(),
            filters: DriverFilters::default(),
            page: 1,
        })
    }

    /// Replace the filters. Resets to page 1.
    pub fn with_filters(mut self, filters: DriverFilters) -> Self {
        if filters.has_inverted_range() {
            tracing::debug!(?filters, "search filters have min above max; sending as-is");
        }
        self.filters = filters;
        self.page = 1;
        self
    }

    /// Move to `page`, keeping city and filters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ZeroPage`] for page 0.
    pub fn at_page(mut self, page: u32) -> Result<Self, SearchError> {
        if page == 0 {
            return Err(SearchError::ZeroPage);
        }
        self.page = page;
        Ok(self)
    }

    /// The trimmed city.
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The active filters.
    pub fn filters(&self) -> &DriverFilters {
        &self.filters
    }

    /// The requested page.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// The fixed page size.
    pub fn limit(&self) -> u32 {
        PAGE_SIZE
    }

    /// Path segments of the search endpoint. The city is a raw segment; the
    /// HTTP layer is responsible for percent-encoding it.
    pub fn path_segments(&self) -> [&str; 4] {
        ["api", "drivers", "city", &self.city]
    }

    /// Query parameters in a fixed order: `page`, `limit`, then whichever
    /// filters are set.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", PAGE_SIZE.to_string()),
        ];
        let f = &self.filters;
        if let Some(v) = f.min_salary {
            pairs.push(("minSalary", v.to_string()));
        }
        if let Some(v) = f.max_salary {
            pairs.push(("maxSalary", v.to_string()));
        }
        if let Some(v) = f.min_experience {
            pairs.push(("minExperience", v.to_string()));
        }
        if let Some(v) = f.max_experience {
            pairs.push(("maxExperience", v.to_string()));
        }
        pairs
    }
}

/// What the results area should say after the last search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchFeedback {
    /// No search has run yet.
    Idle,
    /// A request is outstanding.
    Searching,
    /// The last search returned at least one driver.
    Results,
    /// The last search succeeded with zero drivers.
    NoDrivers,
    /// The last search failed; the message is shown as an error banner.
    Failed(String),
}

impl SearchFeedback {
    /// Message to display, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NoDrivers => Some(NO_DRIVERS_MESSAGE),
            Self::Failed(msg) => Some(msg),
            Self::Idle | Self::Searching | Self::Results => None,
        }
    }

    /// Whether the message is an error rather than an informational note.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Search screen state: inputs, the last successful page and feedback.
#[derive(Debug, Clone)]
pub struct SearchState<T> {
    city: String,
    filters: DriverFilters,
    results: Vec<T>,
    current_page: u32,
    total_pages: u32,
    total_count: u64,
    feedback: SearchFeedback,
}

impl<T> Default for SearchState<T> {
    fn default() -> Self {
        Self {
            city: String::new(),
            filters: DriverFilters::default(),
            results: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: 0,
            feedback: SearchFeedback::Idle,
        }
    }
}

impl<T> SearchState<T> {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the city input.
    pub fn set_city(&mut self, city: impl Into<String>) {
        self.city = city.into();
    }

    /// Query for a fresh search from the current inputs, at page 1.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MissingCity`] if no city was entered; the
    /// error is also recorded as feedback.
    pub fn search(&mut self) -> Result<SearchQuery, SearchError> {
        self.query_at(1)
    }

    /// Replace the filters and search again from page 1.
    ///
    /// # Errors
    ///
    /// See [`SearchState::search`].
    pub fn apply_filters(&mut self, filters: DriverFilters) -> Result<SearchQuery, SearchError> {
        self.filters = filters;
        self.query_at(1)
    }

    /// Drop all filters and search again from page 1.
    ///
    /// # Errors
    ///
    /// See [`SearchState::search`].
    pub fn clear_filters(&mut self) -> Result<SearchQuery, SearchError> {
        self.filters = DriverFilters::default();
        self.query_at(1)
    }

    /// Query for another page with the active filters.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::ZeroPage`] for page 0, or
    /// [`SearchError::MissingCity`] if no city was entered.
    pub fn page_query(&mut self, page: u32) -> Result<SearchQuery, SearchError> {
        self.query_at(page)
    }

    fn query_at(&mut self, page: u32) -> Result<SearchQuery, SearchError> {
        let query = SearchQuery::new(&self.city)
            .map(|q| q.with_filters(self.filters))
            .and_then(|q| q.at_page(page));
        match &query {
            Ok(_) => self.feedback = SearchFeedback::Searching,
            Err(e) => self.feedback = SearchFeedback::Failed(e.to_string()),
        }
        query
    }

    /// Record a successful response: replace the list wholesale and take
    /// the page counters from the envelope.
    pub fn apply_success(
        &mut self,
        query: &SearchQuery,
        drivers: Vec<T>,
        pagination: Option<Pagination>,
    ) {
        self.current_page = query.page();
        match pagination {
            Some(p) => {
                self.total_pages = p.total_pages.max(1);
                self.total_count = p.total_count;
            }
            None => {
                self.total_pages = self.current_page;
                self.total_count = drivers.len() as u64;
            }
        }
        self.feedback = if drivers.is_empty() {
            SearchFeedback::NoDrivers
        } else {
            SearchFeedback::Results
        };
        self.results = drivers;
    }

    /// Record a failed request. The previous results stay on screen.
    pub fn apply_failure(&mut self, message: impl Into<String>) {
        self.feedback = SearchFeedback::Failed(message.into());
    }

    /// The drivers on the current page.
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Current page, 1-based.
    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    /// Total pages reported by the last successful search.
    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    /// Total matches reported by the last successful search.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// The active filters.
    pub fn filters(&self) -> &DriverFilters {
        &self.filters
    }

    /// Feedback for the last action.
    pub fn feedback(&self) -> &SearchFeedback {
        &self.feedback
    }

    /// Whether the "Previous" control is enabled.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Whether the "Next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }
}
