//! Bridge from async handlers to the synchronous store.

use crate::error::{AppError, QueryError};

/// Run a store-backed query on the blocking pool so SQLite I/O and the
/// connection lock never hold a runtime worker.
pub(crate) async fn run_query<T, F>(query: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, QueryError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(query).await??)
}
