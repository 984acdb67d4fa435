use std::cell::RefCell;
use std::time::{Duration, Instant};

use crate::client::{CaseClient, CaseSummary, ClientError};

/// How long a cached most-recently-used list stays valid.
pub const TOP_CASES_CACHE_TTL: Duration = Duration::from_secs(2 * 60 * 60);

/// Time source for cache expiry. Injected so tests can move the clock.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct CachedEntry {
    cases: Vec<CaseSummary>,
    fetched_at: Instant,
}

/// Caching wrapper over any [`CaseClient`].
///
/// Only `top_latest_used` is cached; the list itself is always read fresh so
/// paging and search never serve stale rows. A failed refresh is returned to
/// the caller and leaves no cache entry behind.
pub struct CachedCaseClient<C, K = SystemClock> {
    inner: C,
    clock: K,
    ttl: Duration,
    top_cache: RefCell<Option<CachedEntry>>,
}

impl<C: CaseClient> CachedCaseClient<C, SystemClock> {
    pub fn new(inner: C) -> Self {
        Self::with_clock(inner, SystemClock)
    }
}

impl<C: CaseClient, K: Clock> CachedCaseClient<C, K> {
    pub fn with_clock(inner: C, clock: K) -> Self {
        Self {
            inner,
            clock,
            ttl: TOP_CASES_CACHE_TTL,
            top_cache: RefCell::new(None),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Drops the cached entry so the next read goes to the backend.
    pub fn invalidate(&self) {
        self.top_cache.borrow_mut().take();
    }

    fn cached_top(&self, now: Instant) -> Option<Vec<CaseSummary>> {
        let cache = self.top_cache.borrow();
        let entry = cache.as_ref()?;
        if now.duration_since(entry.fetched_at) < self.ttl {
            Some(entry.cases.clone())
        } else {
            None
        }
    }
}

impl<C: CaseClient, K: Clock> CaseClient for CachedCaseClient<C, K> {
    fn load_cases(&self, offset: usize, limit: usize) -> Result<Vec<CaseSummary>, ClientError> {
        self.inner.load_cases(offset, limit)
    }

    fn search_cases(
        &self,
        term: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CaseSummary>, ClientError> {
        self.inner.search_cases(term, offset, limit)
    }

    fn top_latest_used(&self) -> Result<Vec<CaseSummary>, ClientError> {
        let now = self.clock.now();
        if let Some(cases) = self.cached_top(now) {
            return Ok(cases);
        }
        let cases = self.inner.top_latest_used()?;
        *self.top_cache.borrow_mut() = Some(CachedEntry {
            cases: cases.clone(),
            fetched_at: now,
        });
        Ok(cases)
    }
}
