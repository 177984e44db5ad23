//! Resolution of interest groups into the propositions they track.

use std::collections::BTreeSet;

use serde::Deserialize;
use tracing::warn;

use crate::domain::DEFAULT_INTEREST;
use crate::error::QueryError;
use crate::store::LeggoStore;

/// Interest (and optional theme) a query is scoped to, as given in the query string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InterestFilter {
    #[serde(default = "default_interest")]
    pub interesse: String,
    #[serde(default)]
    pub tema: Option<String>,
}

fn default_interest() -> String {
    DEFAULT_INTEREST.to_string()
}

impl Default for InterestFilter {
    fn default() -> Self {
        Self {
            interesse: default_interest(),
            tema: None,
        }
    }
}

impl InterestFilter {
    pub fn new(interesse: impl Into<String>) -> Self {
        Self {
            interesse: interesse.into(),
            tema: None,
        }
    }

    pub fn with_theme(mut self, tema: impl Into<String>) -> Self {
        self.tema = Some(tema.into());
        self
    }

    /// Ids of the propositions the filter admits.
    ///
    /// An interest that does not exist is an error; an existing interest with
    /// no propositions under the theme yields an empty set.
    pub fn resolve<S>(&self, store: &S) -> Result<BTreeSet<i64>, QueryError>
    where
        S: LeggoStore + ?Sized,
    {
        match store.interest_members(&self.interesse, self.tema.as_deref())? {
            Some(members) => Ok(members),
            None => {
                warn!(interest = %self.interesse, "unknown interest requested");
                Err(QueryError::InterestNotFound {
                    interest: self.interesse.clone(),
                })
            }
        }
    }
}
