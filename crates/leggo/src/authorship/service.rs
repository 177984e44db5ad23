use std::sync::Arc;

use tracing::debug;

use super::views::{AuthorAggregate, AuthorshipRow, OriginalProposalRow};
use crate::domain::{
    ActionRank, AuthorTotals, DateBound, PropositionAuthorship, TabularRow,
    AGGREGATED_ACTION_TYPES, ORIGINAL_PROPOSAL_DOCUMENT,
};
use crate::error::QueryError;
use crate::interest::InterestFilter;
use crate::store::{AuthorshipScope, LeggoStore};

/// Service composing interest resolution and the authorship queries of the store.
pub struct AuthorshipService<S> {
    store: Arc<S>,
}

impl<S> AuthorshipService<S>
where
    S: LeggoStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every document authored for one proposition, regardless of interest or date.
    pub fn by_proposition(&self, id_leggo: i64) -> Result<Vec<PropositionAuthorship>, QueryError> {
        Ok(self.store.proposition_authorships(id_leggo)?)
    }

    /// Documents of one author within the interest, labelled with their bill.
    pub fn by_author(
        &self,
        id_autor: i64,
        filter: &InterestFilter,
    ) -> Result<Vec<AuthorshipRow>, QueryError> {
        let propositions = filter.resolve(self.store.as_ref())?;
        let scope = AuthorshipScope {
            propositions: &propositions,
            bound: DateBound::inclusive_cutoff(),
        };

        let documents = self.store.author_documents(&scope, id_autor, None)?;
        debug!(id_autor, rows = documents.len(), "listed author documents");
        Ok(documents.into_iter().map(AuthorshipRow::from).collect())
    }

    /// Count and weight of proposals and appeals per author.
    pub fn aggregated(&self, filter: &InterestFilter) -> Result<Vec<AuthorAggregate>, QueryError> {
        let totals = self.author_totals(filter)?;
        Ok(with_population_bounds(totals))
    }

    /// Same as [`Self::aggregated`] narrowed to one author. The bounds still
    /// describe every author in scope.
    pub fn aggregated_for_author(
        &self,
        id_autor: i64,
        filter: &InterestFilter,
    ) -> Result<Vec<AuthorAggregate>, QueryError> {
        let totals = self.author_totals(filter)?;
        Ok(with_population_bounds(totals)
            .into_iter()
            .filter(|aggregate| aggregate.id_autor_parlametria == id_autor)
            .collect())
    }

    pub fn ranked_actions(&self, filter: &InterestFilter) -> Result<Vec<ActionRank>, QueryError> {
        let propositions = filter.resolve(self.store.as_ref())?;
        let scope = AuthorshipScope {
            propositions: &propositions,
            bound: DateBound::inclusive_cutoff(),
        };

        Ok(self.store.action_ranking(&scope)?)
    }

    pub fn original_proposals(
        &self,
        id_autor: i64,
        filter: &InterestFilter,
    ) -> Result<Vec<OriginalProposalRow>, QueryError> {
        let propositions = filter.resolve(self.store.as_ref())?;
        let scope = AuthorshipScope {
            propositions: &propositions,
            bound: DateBound::inclusive_cutoff(),
        };

        let documents =
            self.store
                .author_documents(&scope, id_autor, Some(ORIGINAL_PROPOSAL_DOCUMENT))?;
        Ok(documents.into_iter().map(OriginalProposalRow::from).collect())
    }

    /// Flat dump of every record in scope. Unlike the other queries the
    /// cutoff day itself is excluded.
    pub fn table(&self, filter: &InterestFilter) -> Result<Vec<TabularRow>, QueryError> {
        let propositions = filter.resolve(self.store.as_ref())?;
        let scope = AuthorshipScope {
            propositions: &propositions,
            bound: DateBound::exclusive_cutoff(),
        };

        let rows = self.store.tabular_rows(&scope)?;
        debug!(interest = %filter.interesse, rows = rows.len(), "built authorship table");
        Ok(rows)
    }

    fn author_totals(&self, filter: &InterestFilter) -> Result<Vec<AuthorTotals>, QueryError> {
        let propositions = filter.resolve(self.store.as_ref())?;
        let scope = AuthorshipScope {
            propositions: &propositions,
            bound: DateBound::inclusive_cutoff(),
        };

        Ok(self
            .store
            .author_totals(&scope, &AGGREGATED_ACTION_TYPES)?)
    }
}

/// Derive min/max of the summed weights once and stamp them on every row.
pub(crate) fn with_population_bounds(totals: Vec<AuthorTotals>) -> Vec<AuthorAggregate> {
    let Some(first) = totals.first() else {
        return Vec::new();
    };

    let seed = (first.peso_documentos, first.peso_documentos);
    let (min, max) = totals.iter().fold(seed, |(min, max), entry| {
        (min.min(entry.peso_documentos), max.max(entry.peso_documentos))
    });

    totals
        .into_iter()
        .map(|entry| AuthorAggregate::from_totals(entry, min, max))
        .collect()
}
