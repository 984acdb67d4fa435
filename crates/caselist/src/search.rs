use std::time::{Duration, Instant};

/// Pause after the last keystroke before a search is actually issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// A search the scheduler has released for execution.
///
/// The generation orders tickets: whichever ticket was issued last wins, and
/// results that come back tagged with an older generation are dropped by
/// [`SearchScheduler::accept`]. That keeps a slow response for "com" from
/// overwriting the rows for "compartment 12".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub term: String,
    pub generation: u64,
}

/// Debounce and ordering for search-as-you-type.
///
/// The scheduler is a plain deadline machine: it never sleeps or spawns
/// anything. The host calls [`type_ahead`] on every keystroke and [`poll`]
/// on its own cadence; a ticket comes out once the debounce window has
/// passed without further typing.
///
/// [`type_ahead`]: SearchScheduler::type_ahead
/// [`poll`]: SearchScheduler::poll
#[derive(Debug)]
pub struct SearchScheduler {
    debounce: Duration,
    pending: Option<(String, Instant)>,
    latest_generation: u64,
}

impl SearchScheduler {
    pub fn new() -> Self {
        Self::with_debounce(SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            debounce,
            pending: None,
            latest_generation: 0,
        }
    }

    /// Records a keystroke. Any pending search is replaced and the debounce
    /// window restarts from `now`.
    pub fn type_ahead(&mut self, term: &str, now: Instant) {
        self.pending = Some((term.to_string(), now + self.debounce));
    }

    /// Drops the pending search without issuing it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Next instant at which [`poll`](SearchScheduler::poll) can fire, if a
    /// search is pending.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Releases the pending search once its debounce window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<SearchTicket> {
        let due = matches!(&self.pending, Some((_, deadline)) if now >= *deadline);
        if !due {
            return None;
        }
        let (term, _) = self.pending.take()?;
        self.latest_generation += 1;
        Some(SearchTicket {
            term,
            generation: self.latest_generation,
        })
    }

    /// Whether results for `generation` are still current. Stale generations
    /// are rejected so out-of-order responses cannot clobber newer rows.
    pub fn accept(&self, generation: u64) -> bool {
        generation == self.latest_generation
    }
}

impl Default for SearchScheduler {
    fn default() -> Self {
        Self::new()
    }
}
