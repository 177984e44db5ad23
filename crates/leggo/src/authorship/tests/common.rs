use std::collections::BTreeSet;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use serde_json::Value;
use tower::ServiceExt;

use crate::authorship::{authorship_router, AuthorshipService};
use crate::domain::{
    ActionRank, AuthorDocument, AuthorTotals, Highlight, PropositionAuthorship, TabularRow,
};
use crate::store::testing::{AuthorshipSeed, Fixture};
use crate::store::{AuthorshipScope, LeggoStore, SqliteStore, StoreError};

pub(super) const AUTHOR_WITH_PROPOSALS: i64 = 42;
pub(super) const AUTHOR_ON_CUTOFF: i64 = 7;
pub(super) const SENATOR: i64 = 9;
pub(super) const REMOTE_ONLY_AUTHOR: i64 = 11;

/// Interest "leggo" tracks propositions 1 and 2; "congresso-remoto" tracks 1 and 4.
///
/// | row | parlametria | prop | tipo_acao  | peso  | data       |
/// |-----|-------------|------|------------|-------|------------|
/// | 1   | 42          | 1    | Proposição | 10.0  | 2019-03-01 |
/// | 2   | 42          | 2    | Recurso    | 30.0  | 2019-04-10 |
/// | 3   | 42          | 1    | Emenda     | 4.0   | 2019-05-01 |
/// | 4   | 7           | 1    | Proposição | 5.0   | 2019-01-31 |
/// | 5   | 7           | 2    | Emenda     | 4.0   | 2019-06-01 |
/// | 6   | 9           | 2    | Proposição | 55.0  | 2019-02-15 |
/// | 7   | 9           | 1    | Emenda     | 1.0   | 2018-12-01 |
/// | 8   | 11          | 4    | Proposição | 100.0 | 2019-07-01 |
pub(super) fn seeded_store() -> SqliteStore {
    let fixture = Fixture::new();
    fixture.proposition(1, "leggo", Some("meio-ambiente"));
    fixture.proposition(2, "leggo", Some("educacao"));
    fixture.proposition(1, "congresso-remoto", Some("saude"));
    fixture.proposition(4, "congresso-remoto", None);
    fixture.stage(10, 1, "PL", 123, "2019-02-20");
    fixture.stage(20, 2, "PEC", 6, "2019-02-05");

    fixture.authorship(
        AuthorshipSeed::new(1, AUTHOR_WITH_PROPOSALS)
            .author(4200)
            .document(1001)
            .document_type("Prop. Original / Apensada")
            .weight(10.0)
            .on("2019-03-01")
            .stage(10),
    );
    fixture.authorship(
        AuthorshipSeed::new(2, AUTHOR_WITH_PROPOSALS)
            .author(4200)
            .document(1002)
            .document_type("Requerimento")
            .action("Recurso")
            .weight(30.0)
            .on("2019-04-10")
            .stage(20),
    );
    fixture.authorship(
        AuthorshipSeed::new(1, AUTHOR_WITH_PROPOSALS)
            .author(4200)
            .document(1003)
            .action("Emenda")
            .weight(4.0)
            .on("2019-05-01"),
    );
    fixture.authorship(
        AuthorshipSeed::new(1, AUTHOR_ON_CUTOFF)
            .document(2001)
            .weight(5.0)
            .on("2019-01-31")
            .stage(10),
    );
    fixture.authorship(
        AuthorshipSeed::new(2, AUTHOR_ON_CUTOFF)
            .document(2002)
            .action("Emenda")
            .weight(4.0)
            .on("2019-06-01"),
    );
    fixture.authorship(
        AuthorshipSeed::new(2, SENATOR)
            .document(3001)
            .weight(55.0)
            .on("2019-02-15")
            .stage(20)
            .senate(),
    );
    fixture.authorship(
        AuthorshipSeed::new(1, SENATOR)
            .document(3002)
            .action("Emenda")
            .weight(1.0)
            .on("2018-12-01")
            .senate(),
    );
    fixture.authorship(
        AuthorshipSeed::new(4, REMOTE_ONLY_AUTHOR)
            .document(4001)
            .weight(100.0)
            .on("2019-07-01"),
    );

    fixture.into_store()
}

pub(super) fn build_service() -> AuthorshipService<SqliteStore> {
    AuthorshipService::new(Arc::new(seeded_store()))
}

pub(super) fn authorship_router_with_service<S>(service: AuthorshipService<S>) -> axum::Router
where
    S: LeggoStore + 'static,
{
    authorship_router(Arc::new(service))
}

pub(super) async fn get(router: axum::Router, uri: &str) -> Response {
    router
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .expect("router responds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_not_found(response: &Response) {
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Store whose backing database is gone.
pub(super) struct UnavailableStore;

fn offline<T>() -> Result<T, StoreError> {
    Err(StoreError::Unavailable("database offline".to_string()))
}

impl LeggoStore for UnavailableStore {
    fn interest_members(
        &self,
        _interest: &str,
        _theme: Option<&str>,
    ) -> Result<Option<BTreeSet<i64>>, StoreError> {
        offline()
    }

    fn proposition_authorships(
        &self,
        _id_leggo: i64,
    ) -> Result<Vec<PropositionAuthorship>, StoreError> {
        offline()
    }

    fn author_documents(
        &self,
        _scope: &AuthorshipScope<'_>,
        _id_autor_parlametria: i64,
        _tipo_documento: Option<&str>,
    ) -> Result<Vec<AuthorDocument>, StoreError> {
        offline()
    }

    fn author_totals(
        &self,
        _scope: &AuthorshipScope<'_>,
        _action_types: &[&str],
    ) -> Result<Vec<AuthorTotals>, StoreError> {
        offline()
    }

    fn action_ranking(&self, _scope: &AuthorshipScope<'_>) -> Result<Vec<ActionRank>, StoreError> {
        offline()
    }

    fn tabular_rows(&self, _scope: &AuthorshipScope<'_>) -> Result<Vec<TabularRow>, StoreError> {
        offline()
    }

    fn highlights_by_house(&self, _casa: &str) -> Result<Vec<Highlight>, StoreError> {
        offline()
    }
}

/// Store whose proposition lookup blocks until the paired sender fires.
/// Every other query fails immediately.
pub(super) struct GatedStore {
    release: Mutex<Receiver<()>>,
}

impl GatedStore {
    pub(super) fn new() -> (Self, Sender<()>) {
        let (release, gate) = mpsc::channel();
        (
            Self {
                release: Mutex::new(gate),
            },
            release,
        )
    }
}

impl LeggoStore for GatedStore {
    fn interest_members(
        &self,
        interest: &str,
        theme: Option<&str>,
    ) -> Result<Option<BTreeSet<i64>>, StoreError> {
        UnavailableStore.interest_members(interest, theme)
    }

    fn proposition_authorships(
        &self,
        _id_leggo: i64,
    ) -> Result<Vec<PropositionAuthorship>, StoreError> {
        let gate = self
            .release
            .lock()
            .map_err(|_| StoreError::Unavailable("gate poisoned".to_string()))?;
        gate.recv_timeout(Duration::from_secs(5))
            .map_err(|_| StoreError::Unavailable("gate never opened".to_string()))?;
        Ok(Vec::new())
    }

    fn author_documents(
        &self,
        scope: &AuthorshipScope<'_>,
        id_autor_parlametria: i64,
        tipo_documento: Option<&str>,
    ) -> Result<Vec<AuthorDocument>, StoreError> {
        UnavailableStore.author_documents(scope, id_autor_parlametria, tipo_documento)
    }

    fn author_totals(
        &self,
        scope: &AuthorshipScope<'_>,
        action_types: &[&str],
    ) -> Result<Vec<AuthorTotals>, StoreError> {
        UnavailableStore.author_totals(scope, action_types)
    }

    fn action_ranking(&self, scope: &AuthorshipScope<'_>) -> Result<Vec<ActionRank>, StoreError> {
        UnavailableStore.action_ranking(scope)
    }

    fn tabular_rows(&self, scope: &AuthorshipScope<'_>) -> Result<Vec<TabularRow>, StoreError> {
        UnavailableStore.tabular_rows(scope)
    }

    fn highlights_by_house(&self, casa: &str) -> Result<Vec<Highlight>, StoreError> {
        UnavailableStore.highlights_by_house(casa)
    }
}
