use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{as_text, AuthorDocument, AuthorTotals};

/// Document of one author, labelled with the bill it belongs to.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorshipRow {
    pub id_autor_parlametria: i64,
    pub id_documento: i64,
    #[serde(serialize_with = "as_text")]
    pub id_leggo: i64,
    pub data: NaiveDate,
    pub descricao_tipo_documento: String,
    pub url_inteiro_teor: Option<String>,
    pub tipo_documento: String,
    pub tipo_acao: String,
    pub peso_autor_documento: f64,
    pub sigla: Option<String>,
}

impl From<AuthorDocument> for AuthorshipRow {
    fn from(document: AuthorDocument) -> Self {
        Self {
            id_autor_parlametria: document.id_autor_parlametria,
            id_documento: document.id_documento,
            id_leggo: document.id_leggo,
            data: document.data,
            descricao_tipo_documento: document.descricao_tipo_documento,
            url_inteiro_teor: document.url_inteiro_teor,
            tipo_documento: document.tipo_documento,
            tipo_acao: document.tipo_acao,
            peso_autor_documento: document.peso_autor_documento,
            sigla: document.sigla,
        }
    }
}

/// Same as [`AuthorshipRow`] without the document weight.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OriginalProposalRow {
    pub id_autor_parlametria: i64,
    pub id_documento: i64,
    #[serde(serialize_with = "as_text")]
    pub id_leggo: i64,
    pub data: NaiveDate,
    pub descricao_tipo_documento: String,
    pub url_inteiro_teor: Option<String>,
    pub tipo_documento: String,
    pub tipo_acao: String,
    pub sigla: Option<String>,
}

impl From<AuthorDocument> for OriginalProposalRow {
    fn from(document: AuthorDocument) -> Self {
        Self {
            id_autor_parlametria: document.id_autor_parlametria,
            id_documento: document.id_documento,
            id_leggo: document.id_leggo,
            data: document.data,
            descricao_tipo_documento: document.descricao_tipo_documento,
            url_inteiro_teor: document.url_inteiro_teor,
            tipo_documento: document.tipo_documento,
            tipo_acao: document.tipo_acao,
            sigla: document.sigla,
        }
    }
}

/// Per-author totals annotated with the bounds of the whole population.
///
/// `min_peso_documentos` and `max_peso_documentos` are identical on every row
/// of a response so clients can scale weights without a second request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorAggregate {
    pub id_autor: i64,
    pub id_autor_parlametria: i64,
    pub quantidade_autorias: i64,
    pub peso_documentos: f64,
    pub min_peso_documentos: f64,
    pub max_peso_documentos: f64,
}

impl AuthorAggregate {
    pub(crate) fn from_totals(totals: AuthorTotals, min: f64, max: f64) -> Self {
        Self {
            id_autor: totals.id_autor,
            id_autor_parlametria: totals.id_autor_parlametria,
            quantidade_autorias: totals.quantidade_autorias,
            peso_documentos: totals.peso_documentos,
            min_peso_documentos: min,
            max_peso_documentos: max,
        }
    }
}
