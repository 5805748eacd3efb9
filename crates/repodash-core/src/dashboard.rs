use tracing::{debug, info, warn};

use crate::{
    error::FetchError,
    filter::matching_indices,
    models::Repository,
    pagination::{paginate, total_pages, PageState, PAGE_SIZE},
};

/// Who we are loading and who we last loaded successfully
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchState {
    pub pending: Option<String>,
    pub last_completed: Option<String>,
}

/// Handed out by `begin_fetch` and given back with the result.
///
/// Only the ticket from the most recent `begin_fetch` is honored, so a slow
/// response for an older search cannot overwrite a newer one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    username: String,
}

impl FetchTicket {
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// The page currently on screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<'a> {
    pub items: Vec<&'a Repository>,
    pub number: usize,
    pub total_pages: usize,
}

impl PageView<'_> {
    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }

    pub fn has_next(&self) -> bool {
        self.number < self.total_pages
    }
}

/// What the main content area should show
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content<'a> {
    /// A fetch is running and there is nothing to show yet
    Loading { username: &'a str },
    /// Repositories exist but none match the filter term
    NoMatches { term: &'a str },
    /// Nothing loaded (error, empty account, or before the first fetch)
    Empty,
    Page(PageView<'a>),
}

/// Single owner of all dashboard state.
///
/// The filtered list and page are derived. Every mutation that changes the
/// full list or the filter term recomputes them on the spot and puts the
/// user back on page 1.
#[derive(Debug, Clone)]
pub struct Dashboard {
    search: SearchState,
    repositories: Vec<Repository>,
    filter_term: String,
    /// Indices into `repositories`, ascending
    visible: Vec<usize>,
    page: PageState,
    loading: bool,
    error: Option<FetchError>,
    notice: Option<String>,
    generation: u64,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: SearchState::default(),
            repositories: Vec::new(),
            filter_term: String::new(),
            visible: Vec::new(),
            page: PageState::new(page_size),
            loading: false,
            error: None,
            notice: None,
            generation: 0,
        }
    }

    /// Start a search for `username`.
    ///
    /// A blank name sets `EmptyInput` and leaves everything else alone.
    /// Otherwise the previous results, error and filter are cleared and the
    /// dashboard enters the loading state.
    pub fn begin_fetch(&mut self, username: &str) -> Result<FetchTicket, FetchError> {
        let username = username.trim();
        if username.is_empty() {
            warn!("Ignoring search with empty username");
            self.error = Some(FetchError::EmptyInput);
            self.notice = None;
            return Err(FetchError::EmptyInput);
        }

        self.generation += 1;
        self.search.pending = Some(username.to_string());
        self.repositories.clear();
        self.filter_term.clear();
        self.error = None;
        self.notice = None;
        self.loading = true;
        self.recompute();

        debug!("Fetch #{} started for {}", self.generation, username);

        Ok(FetchTicket {
            generation: self.generation,
            username: username.to_string(),
        })
    }

    /// Apply the result of a fetch. Returns false if the ticket was
    /// superseded by a newer `begin_fetch` and the result was dropped.
    pub fn finish_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Repository>, FetchError>,
    ) -> bool {
        if ticket.generation != self.generation {
            debug!(
                "Dropping stale result for {} (fetch #{}, latest #{})",
                ticket.username, ticket.generation, self.generation
            );
            return false;
        }

        self.loading = false;
        self.search.pending = None;

        match result {
            Ok(repos) => {
                info!("Loaded {} repositories for {}", repos.len(), ticket.username);
                if repos.is_empty() {
                    self.notice = Some(format!(
                        "{} has no public original repositories.",
                        ticket.username
                    ));
                }
                self.repositories = repos;
                self.error = None;
                self.filter_term.clear();
                self.search.last_completed = Some(ticket.username);
                self.recompute();
            }
            Err(e) => {
                warn!("Fetch for {} failed: {}", ticket.username, e);
                self.error = Some(e);
            }
        }

        true
    }

    pub fn set_filter_term(&mut self, term: impl Into<String>) {
        self.filter_term = term.into();
        self.recompute();
    }

    pub fn push_filter_char(&mut self, c: char) {
        self.filter_term.push(c);
        self.recompute();
    }

    pub fn pop_filter_char(&mut self) {
        if self.filter_term.pop().is_some() {
            self.recompute();
        }
    }

    pub fn next_page(&mut self) -> bool {
        self.page.next(self.total_pages())
    }

    pub fn previous_page(&mut self) -> bool {
        self.page.previous()
    }

    /// Re-derive the filtered list and go back to page 1
    fn recompute(&mut self) {
        self.visible = matching_indices(&self.repositories, &self.filter_term);
        self.page.reset();
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn has_repositories(&self) -> bool {
        !self.repositories.is_empty()
    }

    pub fn filter_term(&self) -> &str {
        &self.filter_term
    }

    pub fn filtered(&self) -> Vec<&Repository> {
        self.visible.iter().map(|&i| &self.repositories[i]).collect()
    }

    pub fn filtered_len(&self) -> usize {
        self.visible.len()
    }

    pub fn current_page_number(&self) -> usize {
        self.page.current()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.visible.len(), self.page.page_size())
    }

    pub fn current_page(&self) -> PageView<'_> {
        let page = paginate(&self.visible, self.page.current(), self.page.page_size());
        PageView {
            items: page.items.iter().map(|&i| &self.repositories[i]).collect(),
            number: page.number,
            total_pages: page.total_pages,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&FetchError> {
        self.error.as_ref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn content(&self) -> Content<'_> {
        if self.loading && self.repositories.is_empty() {
            let username = self.search.pending.as_deref().unwrap_or_default();
            return Content::Loading { username };
        }

        if self.repositories.is_empty() {
            return Content::Empty;
        }

        if self.visible.is_empty() {
            return Content::NoMatches {
                term: &self.filter_term,
            };
        }

        Content::Page(self.current_page())
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}
