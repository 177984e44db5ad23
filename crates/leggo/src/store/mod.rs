//! Read-only access to the tables produced by the ingestion pipeline.

mod sqlite;
#[cfg(test)]
pub(crate) mod testing;

use std::collections::BTreeSet;

use crate::domain::{
    ActionRank, AuthorDocument, AuthorTotals, DateBound, Highlight, PropositionAuthorship,
    TabularRow,
};

pub use sqlite::SqliteStore;

/// Propositions and date bound every scoped authorship query is restricted to.
#[derive(Debug, Clone, Copy)]
pub struct AuthorshipScope<'a> {
    pub propositions: &'a BTreeSet<i64>,
    pub bound: DateBound,
}

/// Storage abstraction so the query services can be exercised in isolation.
pub trait LeggoStore: Send + Sync {
    /// Members of an interest, optionally narrowed to one theme slug.
    /// `None` when no interest with that name exists at all.
    fn interest_members(
        &self,
        interest: &str,
        theme: Option<&str>,
    ) -> Result<Option<BTreeSet<i64>>, StoreError>;

    fn proposition_authorships(&self, id_leggo: i64)
        -> Result<Vec<PropositionAuthorship>, StoreError>;

    /// Documents of one author, optionally restricted to a `tipo_documento`.
    fn author_documents(
        &self,
        scope: &AuthorshipScope<'_>,
        id_autor_parlametria: i64,
        tipo_documento: Option<&str>,
    ) -> Result<Vec<AuthorDocument>, StoreError>;

    /// Count and weight grouped by `(id_autor, id_autor_parlametria)`.
    fn author_totals(
        &self,
        scope: &AuthorshipScope<'_>,
        action_types: &[&str],
    ) -> Result<Vec<AuthorTotals>, StoreError>;

    /// Totals grouped by `(id_autor_parlametria, tipo_acao)` and ranked within
    /// each action type, ordered by `(ranking_documentos, tipo_acao)`.
    fn action_ranking(&self, scope: &AuthorshipScope<'_>) -> Result<Vec<ActionRank>, StoreError>;

    fn tabular_rows(&self, scope: &AuthorshipScope<'_>) -> Result<Vec<TabularRow>, StoreError>;

    fn highlights_by_house(&self, casa: &str) -> Result<Vec<Highlight>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
