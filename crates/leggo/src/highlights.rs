//! Highlighted bills per legislative house.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use tracing::debug;

use crate::blocking::run_query;
use crate::domain::Highlight;
use crate::error::{AppError, QueryError};
use crate::store::LeggoStore;

pub struct HighlightService<S> {
    store: Arc<S>,
}

impl<S> HighlightService<S>
where
    S: LeggoStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Highlights registered for `casa`. Unknown houses simply have none.
    pub fn by_house(&self, casa: &str) -> Result<Vec<Highlight>, QueryError> {
        let highlights = self.store.highlights_by_house(casa)?;
        debug!(casa, rows = highlights.len(), "listed highlights");
        Ok(highlights)
    }
}

pub fn highlights_router<S>(service: Arc<HighlightService<S>>) -> Router
where
    S: LeggoStore + 'static,
{
    Router::new()
        .route("/destaques/:casa", get(house_handler::<S>))
        .with_state(service)
}

pub(crate) async fn house_handler<S>(
    State(service): State<Arc<HighlightService<S>>>,
    Path(casa): Path<String>,
) -> Result<Json<Vec<Highlight>>, AppError>
where
    S: LeggoStore + 'static,
{
    let highlights = run_query(move || service.by_house(&casa)).await?;
    Ok(Json(highlights))
}
