use crate::db::{DocumentStore, StoreError};
use crate::grading::StudyAdvisor;
use std::time::Instant;

/// State shared by every request handler.
pub struct AppState {
    /// `None` when the store could not be opened at startup
    pub store: Option<DocumentStore>,
    pub advisor: StudyAdvisor,
    pub database_url_set: bool,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: Option<DocumentStore>, advisor: StudyAdvisor, database_url_set: bool) -> Self {
        Self {
            store,
            advisor,
            database_url_set,
            started_at: Instant::now(),
        }
    }

    /// Returns the store, or `StoreError::Unavailable` if there is none.
    pub fn store(&self) -> Result<&DocumentStore, StoreError> {
        self.store.as_ref().ok_or(StoreError::Unavailable)
    }
}
