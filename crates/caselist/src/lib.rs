//! Case list state management for the FinDesk back office.
//!
//! The crate owns everything between the UI and the case backend: a client
//! trait with an explicit constructor (no process-wide singleton), a TTL
//! cache over the most-recently-used list, debounced search-as-you-type
//! with generation-tagged tickets, and the paging state machine the list
//! view drives.

pub mod cache;
pub mod client;
pub mod search;
pub mod state;
pub mod status;

pub use cache::{CachedCaseClient, Clock, SystemClock, TOP_CASES_CACHE_TTL};
pub use client::{CaseClient, CaseSummary, ClientError};
pub use search::{SearchScheduler, SearchTicket, SEARCH_DEBOUNCE};
pub use state::{CaseListState, LoadKind, PageRequest, PAGE_SIZE};
pub use status::CompartmentStatus;
