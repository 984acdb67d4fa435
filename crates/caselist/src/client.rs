use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::CompartmentStatus;

/// One row of the case list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSummary {
    pub id: String,
    pub compartment_name: String,
    pub status: CompartmentStatus,
    #[serde(default)]
    pub compartment_id: Option<u32>,
    /// Last time the case was opened, preformatted by the backend.
    #[serde(default)]
    pub last_used: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// The backend could not be reached or dropped the connection.
    #[error("case backend unreachable: {0}")]
    Transport(String),
    /// The backend answered but the payload could not be interpreted.
    #[error("malformed case response: {0}")]
    Malformed(String),
}

/// Data access for the case list.
///
/// Constructed explicitly and handed to whatever needs it; test doubles
/// implement the trait directly. Paged reads take an offset and a limit and
/// return the rows in backend order.
pub trait CaseClient {
    fn load_cases(&self, offset: usize, limit: usize) -> Result<Vec<CaseSummary>, ClientError>;

    /// Substring search over compartment names, paged like [`load_cases`].
    ///
    /// [`load_cases`]: CaseClient::load_cases
    fn search_cases(
        &self,
        term: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CaseSummary>, ClientError>;

    /// The most recently used cases, newest first.
    fn top_latest_used(&self) -> Result<Vec<CaseSummary>, ClientError>;
}

impl<T: CaseClient + ?Sized> CaseClient for &T {
    fn load_cases(&self, offset: usize, limit: usize) -> Result<Vec<CaseSummary>, ClientError> {
        (**self).load_cases(offset, limit)
    }

    fn search_cases(
        &self,
        term: &str,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<CaseSummary>, ClientError> {
        (**self).search_cases(term, offset, limit)
    }

    fn top_latest_used(&self) -> Result<Vec<CaseSummary>, ClientError> {
        (**self).top_latest_used()
    }
}
