//! Listing feed pagination
//!
//! One `Feed` per listing session: seeded from the statically fetched
//! first page, grown append-only by loading the next-page cursor. Loads
//! are serialized by an explicit in-flight guard, so a re-entrant call
//! observes `Busy` instead of racing a second fetch. A null cursor means
//! the last fetched page was final; loading past it is a no-op, not an
//! error.

use crate::api::{ApiError, ContentSource, PageResponse};
use crate::content::PostSummary;

/// Fetches one page of documents from a cursor URL. Any `ContentSource`
/// qualifies; stub implementations keep the feed testable offline.
pub trait PageFetcher {
    fn fetch_page(
        &self,
        cursor: &str,
    ) -> impl std::future::Future<Output = Result<PageResponse, ApiError>> + Send;
}

impl<C: ContentSource> PageFetcher for C {
    async fn fetch_page(&self, cursor: &str) -> Result<PageResponse, ApiError> {
        ContentSource::fetch_page(self, cursor).await
    }
}

/// What `begin_load` decided
#[derive(Debug, Clone, PartialEq)]
pub enum BeginLoad {
    /// Fetch this cursor URL, then call `complete` (or `abort` on failure)
    Fetch(String),
    /// No further pages; nothing to do
    Exhausted,
    /// A load is already in flight
    Busy,
}

/// Result of a full `load_next` round trip
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// This many summaries were appended
    Appended(usize),
    Exhausted,
    Busy,
}

/// Accumulated listing state for one session
#[derive(Debug, Clone)]
pub struct Feed {
    next_page: Option<String>,
    posts: Vec<PostSummary>,
    loading: bool,
}

impl Feed {
    /// Establish the feed from the first fetched page
    pub fn new(first_page: &PageResponse) -> Self {
        Self {
            next_page: first_page.next_page.clone(),
            posts: first_page
                .results
                .iter()
                .map(PostSummary::from_document)
                .collect(),
            loading: false,
        }
    }

    /// Resume a session from a cursor the view carried. The view keeps
    /// its accumulated posts; this feed only collects what the next load
    /// appends.
    pub fn resume(cursor: &str) -> Self {
        Self {
            next_page: Some(cursor.to_string()),
            posts: Vec::new(),
            loading: false,
        }
    }

    /// Posts accumulated so far, in fetch order
    pub fn posts(&self) -> &[PostSummary] {
        &self.posts
    }

    /// Cursor for the next page, if any
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Start a load. On `Fetch` the in-flight guard is set and must be
    /// released through `complete` or `abort`; the fetch itself can then
    /// happen without holding any lock on the feed.
    pub fn begin_load(&mut self) -> BeginLoad {
        if self.loading {
            return BeginLoad::Busy;
        }
        match &self.next_page {
            Some(cursor) => {
                self.loading = true;
                BeginLoad::Fetch(cursor.clone())
            }
            None => BeginLoad::Exhausted,
        }
    }

    /// Append a fetched page and release the guard. Prior posts keep
    /// their positions; the new cursor replaces the old one.
    pub fn complete(&mut self, page: &PageResponse) -> usize {
        let appended = page.results.len();
        self.posts
            .extend(page.results.iter().map(PostSummary::from_document));
        self.next_page = page.next_page.clone();
        self.loading = false;
        appended
    }

    /// Release the guard after a failed fetch, leaving the feed in its
    /// last valid state.
    pub fn abort(&mut self) {
        self.loading = false;
    }

    /// One full load round trip against a fetcher. Fetch failures release
    /// the guard and propagate; there are no retries.
    pub async fn load_next<F: PageFetcher>(&mut self, fetcher: &F) -> Result<LoadOutcome, ApiError> {
        let cursor = match self.begin_load() {
            BeginLoad::Busy => return Ok(LoadOutcome::Busy),
            BeginLoad::Exhausted => return Ok(LoadOutcome::Exhausted),
            BeginLoad::Fetch(cursor) => cursor,
        };

        match fetcher.fetch_page(&cursor).await {
            Ok(page) => Ok(LoadOutcome::Appended(self.complete(&page))),
            Err(e) => {
                self.abort();
                Err(e)
            }
        }
    }
}
