use log::warn;

use crate::client::{CaseClient, CaseSummary, ClientError};

/// Rows fetched per page.
pub const PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadKind {
    /// First page for the current search term; replaces the loaded rows.
    Refresh,
    /// Next page; appends to the loaded rows.
    More,
}

/// One page fetch the state machine has asked the host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub kind: LoadKind,
    /// `None` for a plain listing, `Some` for a substring search.
    pub term: Option<String>,
    pub offset: usize,
    pub limit: usize,
}

/// Pagination and search state for the case list.
///
/// The state machine itself performs no I/O: `begin_*` hands out a
/// [`PageRequest`], the host runs it against a [`CaseClient`] however it
/// likes, and [`complete`] folds the outcome back in. [`refresh`] and
/// [`load_more`] wire the two steps together for hosts with a blocking
/// client.
///
/// [`complete`]: CaseListState::complete
/// [`refresh`]: CaseListState::refresh
/// [`load_more`]: CaseListState::load_more
#[derive(Debug, Default)]
pub struct CaseListState {
    cases: Vec<CaseSummary>,
    term: String,
    offset: usize,
    has_more: bool,
    in_flight: Option<LoadKind>,
    last_error: Option<ClientError>,
}

impl CaseListState {
    pub fn new() -> Self {
        Self {
            has_more: true,
            ..Self::default()
        }
    }

    pub fn cases(&self) -> &[CaseSummary] {
        &self.cases
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn last_error(&self) -> Option<&ClientError> {
        self.last_error.as_ref()
    }

    /// Starts over for `term`: loaded rows and any previous error are
    /// dropped and the first page is requested.
    pub fn begin_refresh(&mut self, term: &str) -> PageRequest {
        self.term = term.to_string();
        self.cases.clear();
        self.offset = 0;
        self.has_more = true;
        self.last_error = None;
        self.in_flight = Some(LoadKind::Refresh);
        PageRequest {
            kind: LoadKind::Refresh,
            term: self.request_term(),
            offset: 0,
            limit: PAGE_SIZE,
        }
    }

    /// Requests the next page, or `None` while a load is already in flight
    /// or the backend has no further rows.
    pub fn begin_load_more(&mut self) -> Option<PageRequest> {
        if self.in_flight.is_some() || !self.has_more {
            return None;
        }
        self.in_flight = Some(LoadKind::More);
        Some(PageRequest {
            kind: LoadKind::More,
            term: self.request_term(),
            offset: self.offset,
            limit: PAGE_SIZE,
        })
    }

    /// Folds a finished fetch back into the state. A full page means more
    /// rows may follow; a short or empty page ends the listing. A failure is
    /// kept for the host to display and stops further load-more attempts
    /// until the next refresh.
    pub fn complete(&mut self, kind: LoadKind, result: Result<Vec<CaseSummary>, ClientError>) {
        self.in_flight = None;
        match result {
            Ok(rows) => {
                let full_page = rows.len() == PAGE_SIZE;
                let empty = rows.is_empty();
                match kind {
                    LoadKind::Refresh => self.cases = rows,
                    LoadKind::More => self.cases.extend(rows),
                }
                self.has_more = full_page && !empty;
                if !empty {
                    self.offset = match kind {
                        LoadKind::Refresh => PAGE_SIZE,
                        LoadKind::More => self.offset + PAGE_SIZE,
                    };
                }
            }
            Err(err) => {
                warn!("case list load failed: {err}");
                self.has_more = false;
                self.last_error = Some(err);
            }
        }
    }

    /// Replaces the list with the first page for `term` using a blocking
    /// client.
    pub fn refresh<C: CaseClient>(&mut self, term: &str, client: &C) {
        let request = self.begin_refresh(term);
        let result = run(client, &request);
        self.complete(request.kind, result);
    }

    /// Fetches and appends the next page. Returns `false` when nothing was
    /// requested (already loading, or no further rows).
    pub fn load_more<C: CaseClient>(&mut self, client: &C) -> bool {
        let Some(request) = self.begin_load_more() else {
            return false;
        };
        let result = run(client, &request);
        self.complete(request.kind, result);
        true
    }

    fn request_term(&self) -> Option<String> {
        if self.term.is_empty() {
            None
        } else {
            Some(self.term.clone())
        }
    }
}

fn run<C: CaseClient>(
    client: &C,
    request: &PageRequest,
) -> Result<Vec<CaseSummary>, ClientError> {
    match &request.term {
        Some(term) => client.search_cases(term, request.offset, request.limit),
        None => client.load_cases(request.offset, request.limit),
    }
}
