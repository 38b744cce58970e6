//! Storage seam used by the importer.

use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::AppResult;
use crate::models::{DateRange, SessionRecord};

/// Where built sessions go. The importer only needs these two operations,
/// so tests can supply an in-memory or failing implementation.
pub trait SessionStore {
    /// Persist one record and return its id.
    fn insert_session(&mut self, session: &SessionRecord) -> AppResult<i64>;

    /// Remove all stored sessions dated inside `range`, for every site.
    fn delete_sessions_in_range(&mut self, range: &DateRange) -> AppResult<usize>;
}

impl SessionStore for DbPool {
    fn insert_session(&mut self, session: &SessionRecord) -> AppResult<i64> {
        queries::insert_session(&self.conn, session)
    }

    fn delete_sessions_in_range(&mut self, range: &DateRange) -> AppResult<usize> {
        queries::delete_sessions_in_range(&self.conn, range)
    }
}
