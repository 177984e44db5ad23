use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use super::service::AuthorshipService;
use super::views::{AuthorAggregate, AuthorshipRow, OriginalProposalRow};
use crate::blocking::run_query;
use crate::domain::{ActionRank, PropositionAuthorship, TabularRow};
use crate::error::AppError;
use crate::interest::InterestFilter;
use crate::store::LeggoStore;

/// Router builder exposing the authorship endpoints.
pub fn authorship_router<S>(service: Arc<AuthorshipService<S>>) -> Router
where
    S: LeggoStore + 'static,
{
    Router::new()
        .route("/autorias/agregadas", get(aggregated_handler::<S>))
        .route(
            "/autorias/agregadas/:id_autor",
            get(aggregated_author_handler::<S>),
        )
        .route("/autorias/autor/:id_autor", get(author_handler::<S>))
        .route("/autorias/originais/:id_autor", get(originals_handler::<S>))
        .route("/autorias/tabela", get(table_handler::<S>))
        .route("/autorias/:id_leggo", get(proposition_handler::<S>))
        .route("/acoes", get(actions_handler::<S>))
        .with_state(service)
}

/// Ids arrive as raw segments so a non-numeric id is a missing resource,
/// not a malformed request.
fn parse_id(raw: &str) -> Result<i64, AppError> {
    raw.parse::<i64>().map_err(|_| AppError::InvalidPath {
        value: raw.to_string(),
    })
}

pub(crate) async fn proposition_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Path(id_leggo): Path<String>,
) -> Result<Json<Vec<PropositionAuthorship>>, AppError>
where
    S: LeggoStore + 'static,
{
    let id_leggo = parse_id(&id_leggo)?;
    let rows = run_query(move || service.by_proposition(id_leggo)).await?;
    Ok(Json(rows))
}

pub(crate) async fn author_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Path(id_autor): Path<String>,
    Query(filter): Query<InterestFilter>,
) -> Result<Json<Vec<AuthorshipRow>>, AppError>
where
    S: LeggoStore + 'static,
{
    let id_autor = parse_id(&id_autor)?;
    let rows = run_query(move || service.by_author(id_autor, &filter)).await?;
    Ok(Json(rows))
}

pub(crate) async fn aggregated_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Query(filter): Query<InterestFilter>,
) -> Result<Json<Vec<AuthorAggregate>>, AppError>
where
    S: LeggoStore + 'static,
{
    let rows = run_query(move || service.aggregated(&filter)).await?;
    Ok(Json(rows))
}

pub(crate) async fn aggregated_author_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Path(id_autor): Path<String>,
    Query(filter): Query<InterestFilter>,
) -> Result<Json<Vec<AuthorAggregate>>, AppError>
where
    S: LeggoStore + 'static,
{
    let id_autor = parse_id(&id_autor)?;
    let rows = run_query(move || service.aggregated_for_author(id_autor, &filter)).await?;
    Ok(Json(rows))
}

pub(crate) async fn actions_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Query(filter): Query<InterestFilter>,
) -> Result<Json<Vec<ActionRank>>, AppError>
where
    S: LeggoStore + 'static,
{
    let rows = run_query(move || service.ranked_actions(&filter)).await?;
    Ok(Json(rows))
}

pub(crate) async fn originals_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Path(id_autor): Path<String>,
    Query(filter): Query<InterestFilter>,
) -> Result<Json<Vec<OriginalProposalRow>>, AppError>
where
    S: LeggoStore + 'static,
{
    let id_autor = parse_id(&id_autor)?;
    let rows = run_query(move || service.original_proposals(id_autor, &filter)).await?;
    Ok(Json(rows))
}

pub(crate) async fn table_handler<S>(
    State(service): State<Arc<AuthorshipService<S>>>,
    Query(filter): Query<InterestFilter>,
) -> Result<Json<Vec<TabularRow>>, AppError>
where
    S: LeggoStore + 'static,
{
    let rows = run_query(move || service.table(&filter)).await?;
    Ok(Json(rows))
}
