//! SQLite-backed store. Grouping and ranking are pushed down into SQL.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension, Row};
use tracing::debug;

use super::{AuthorshipScope, LeggoStore, StoreError};
use crate::domain::{
    ActionRank, AuthorDocument, AuthorTotals, DateBound, Highlight, PropositionAuthorship,
    TabularRow,
};

const SCHEMA: &str = include_str!("../../schema/leggo.sql");

/// `?1` is the cutoff date and `?2` the JSON array of admitted `id_leggo`s.
/// Stored dates may carry a time suffix, so only the calendar day is compared.
const SCOPE_ON_OR_AFTER: &str =
    "substr(a.data, 1, 10) >= ?1 AND a.id_leggo IN (SELECT value FROM json_each(?2))";
const SCOPE_AFTER: &str =
    "substr(a.data, 1, 10) > ?1 AND a.id_leggo IN (SELECT value FROM json_each(?2))";

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the pipeline database. The API never writes, so the handle is read-only.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.execute_batch("PRAGMA query_only = ON;")?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }

    /// Create the tables the queries expect. Used by tests and local tooling.
    pub fn apply_schema(conn: &Connection) -> Result<(), StoreError> {
        conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    fn connection(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Unavailable("connection lock poisoned".to_string()))
    }
}

impl LeggoStore for SqliteStore {
    fn interest_members(
        &self,
        interest: &str,
        theme: Option<&str>,
    ) -> Result<Option<BTreeSet<i64>>, StoreError> {
        let conn = self.connection()?;

        let known = conn
            .query_row(
                "SELECT 1 FROM interesse WHERE interesse = ?1 LIMIT 1",
                params![interest],
                |row| row.get::<_, i64>(0),
            )
            .optional()?;
        if known.is_none() {
            return Ok(None);
        }

        let mut stmt = conn.prepare(
            "SELECT DISTINCT id_leggo FROM interesse
             WHERE interesse = ?1
               AND (?2 IS NULL
                    OR instr(';' || COALESCE(tema_slug, '') || ';', ';' || ?2 || ';') > 0)",
        )?;
        let members = stmt
            .query_map(params![interest, theme], |row| row.get::<_, i64>(0))?
            .collect::<Result<BTreeSet<_>, _>>()?;

        debug!(interest, ?theme, members = members.len(), "resolved interest");
        Ok(Some(members))
    }

    fn proposition_authorships(
        &self,
        id_leggo: i64,
    ) -> Result<Vec<PropositionAuthorship>, StoreError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id_leggo, id_documento, id_autor, descricao_tipo_documento, data,
                    url_inteiro_teor, autores
             FROM autoria
             WHERE id_leggo = ?1
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![id_leggo], |row| {
                Ok(PropositionAuthorship {
                    id_leggo: row.get(0)?,
                    id_documento: row.get(1)?,
                    id_autor: row.get(2)?,
                    descricao_tipo_documento: row.get(3)?,
                    data: date_column(row, 4)?,
                    url_inteiro_teor: row.get(5)?,
                    autores: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn author_documents(
        &self,
        scope: &AuthorshipScope<'_>,
        id_autor_parlametria: i64,
        tipo_documento: Option<&str>,
    ) -> Result<Vec<AuthorDocument>, StoreError> {
        let sql = format!(
            "SELECT a.id_autor_parlametria, a.id_documento, a.id_leggo, a.data,
                    a.descricao_tipo_documento, a.url_inteiro_teor, a.tipo_documento,
                    a.tipo_acao, a.peso_autor_documento,
                    e.sigla_tipo || ' ' || e.numero || '/' || strftime('%Y', e.data_apresentacao)
             FROM autoria a
             LEFT JOIN etapa_proposicao e ON e.id = a.etapa_proposicao_id
             WHERE {}
               AND a.id_autor_parlametria = ?3
               AND (?4 IS NULL OR a.tipo_documento = ?4)
             ORDER BY a.id",
            scope_clause(&scope.bound)
        );
        let (cutoff, members) = scope_params(scope)?;

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(
                params![cutoff, members, id_autor_parlametria, tipo_documento],
                |row| {
                    Ok(AuthorDocument {
                        id_autor_parlametria: row.get(0)?,
                        id_documento: row.get(1)?,
                        id_leggo: row.get(2)?,
                        data: date_column(row, 3)?,
                        descricao_tipo_documento: row.get(4)?,
                        url_inteiro_teor: row.get(5)?,
                        tipo_documento: row.get(6)?,
                        tipo_acao: row.get(7)?,
                        peso_autor_documento: row.get(8)?,
                        sigla: row.get(9)?,
                    })
                },
            )?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn author_totals(
        &self,
        scope: &AuthorshipScope<'_>,
        action_types: &[&str],
    ) -> Result<Vec<AuthorTotals>, StoreError> {
        let sql = format!(
            "SELECT a.id_autor, a.id_autor_parlametria,
                    COUNT(a.id_autor), SUM(a.peso_autor_documento)
             FROM autoria a
             WHERE {}
               AND a.tipo_acao IN (SELECT value FROM json_each(?3))
             GROUP BY a.id_autor, a.id_autor_parlametria
             ORDER BY a.id_autor, a.id_autor_parlametria",
            scope_clause(&scope.bound)
        );
        let (cutoff, members) = scope_params(scope)?;
        let action_types = serde_json::to_string(action_types)?;

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![cutoff, members, action_types], |row| {
                Ok(AuthorTotals {
                    id_autor: row.get(0)?,
                    id_autor_parlametria: row.get(1)?,
                    quantidade_autorias: row.get(2)?,
                    peso_documentos: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn action_ranking(&self, scope: &AuthorshipScope<'_>) -> Result<Vec<ActionRank>, StoreError> {
        // MIN(a.id) keeps ties in storage order: the group whose first record
        // was stored earlier ranks higher.
        let sql = format!(
            "SELECT a.id_autor_parlametria, COUNT(a.tipo_acao) AS num_documentos,
                    ROW_NUMBER() OVER (
                        PARTITION BY a.tipo_acao
                        ORDER BY SUM(a.peso_autor_documento) DESC, MIN(a.id) ASC
                    ) AS ranking_documentos,
                    SUM(a.peso_autor_documento) AS peso_total,
                    a.tipo_acao
             FROM autoria a
             WHERE {}
             GROUP BY a.id_autor_parlametria, a.tipo_acao
             ORDER BY ranking_documentos, a.tipo_acao",
            scope_clause(&scope.bound)
        );
        let (cutoff, members) = scope_params(scope)?;

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![cutoff, members], |row| {
                Ok(ActionRank {
                    id_autor_parlametria: row.get(0)?,
                    num_documentos: row.get(1)?,
                    ranking_documentos: row.get(2)?,
                    peso_total: row.get(3)?,
                    tipo_acao: row.get(4)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn tabular_rows(&self, scope: &AuthorshipScope<'_>) -> Result<Vec<TabularRow>, StoreError> {
        let sql = format!(
            "SELECT a.id_autor, a.casa_autor, a.id_documento, a.id_leggo, a.id_principal,
                    a.casa, a.data, a.descricao_tipo_documento, a.tipo_documento,
                    a.tipo_acao, a.peso_autor_documento
             FROM autoria a
             WHERE {}
             ORDER BY a.id",
            scope_clause(&scope.bound)
        );
        let (cutoff, members) = scope_params(scope)?;

        let conn = self.connection()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
            .query_map(params![cutoff, members], |row| {
                Ok(TabularRow {
                    id_autor: row.get(0)?,
                    casa_autor: row.get(1)?,
                    id_documento: row.get(2)?,
                    id_leggo: row.get(3)?,
                    id_principal: row.get(4)?,
                    casa: row.get(5)?,
                    data: date_column(row, 6)?,
                    descricao_tipo_documento: row.get(7)?,
                    tipo_documento: row.get(8)?,
                    tipo_acao: row.get(9)?,
                    peso_autor_documento: row.get(10)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn highlights_by_house(&self, casa: &str) -> Result<Vec<Highlight>, StoreError> {
        let conn = self.connection()?;
        let mut stmt = conn.prepare(
            "SELECT id_leggo, id_ext, casa, sigla, criterio_aprovada_em_uma_casa, fase_global,
                    local, local_casa, data_inicio, data_fim,
                    criterio_parecer_aprovado_comissao, comissoes_aprovadas,
                    criterio_pressao_alta, maximo_pressao_periodo, agendas
             FROM destaques
             WHERE casa = ?1
             ORDER BY id",
        )?;
        let rows = stmt
            .query_map(params![casa], |row| {
                Ok(Highlight {
                    id_leggo: row.get(0)?,
                    id_ext: row.get(1)?,
                    casa: row.get(2)?,
                    sigla: row.get(3)?,
                    criterio_aprovada_em_uma_casa: row.get(4)?,
                    fase_global: row.get(5)?,
                    local: row.get(6)?,
                    local_casa: row.get(7)?,
                    data_inicio: optional_date_column(row, 8)?,
                    data_fim: optional_date_column(row, 9)?,
                    criterio_parecer_aprovado_comissao: row.get(10)?,
                    comissoes_aprovadas: row.get(11)?,
                    criterio_pressao_alta: row.get(12)?,
                    maximo_pressao_periodo: row.get(13)?,
                    agendas: row.get(14)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn scope_clause(bound: &DateBound) -> &'static str {
    match bound {
        DateBound::OnOrAfter(_) => SCOPE_ON_OR_AFTER,
        DateBound::After(_) => SCOPE_AFTER,
    }
}

fn scope_params(scope: &AuthorshipScope<'_>) -> Result<(String, String), StoreError> {
    let cutoff = scope.bound.date().format("%Y-%m-%d").to_string();
    let members = serde_json::to_string(scope.propositions)?;
    Ok((cutoff, members))
}

/// Dates may carry a time suffix; only the calendar day is kept.
fn parse_day(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
}

fn date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveDate> {
    let raw: String = row.get(idx)?;
    parse_day(&raw)
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err)))
}

fn optional_date_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<Option<NaiveDate>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        parse_day(&value).map_err(|err| {
            rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
        })
    })
    .transpose()
}
