//! Records read from the Leggo database and the constants that scope them.

use chrono::NaiveDate;
use serde::{Serialize, Serializer};

/// Interest used when a request does not name one.
pub const DEFAULT_INTEREST: &str = "leggo";

/// Action types that count towards the aggregated authorship totals.
pub const AGGREGATED_ACTION_TYPES: [&str; 2] = ["Proposição", "Recurso"];

/// Document type marking an original (or attached) bill proposal.
pub const ORIGINAL_PROPOSAL_DOCUMENT: &str = "Prop. Original / Apensada";

const DATA_MODEL_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2019, 1, 31) {
    Some(day) => day,
    None => panic!("invalid data model cutoff"),
};

/// Day the current authorship data model went live. Older records are
/// structurally incompatible and never enter a query.
pub fn data_model_cutoff() -> NaiveDate {
    DATA_MODEL_CUTOFF
}

/// Lower bound applied to `autoria.data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateBound {
    OnOrAfter(NaiveDate),
    After(NaiveDate),
}

impl DateBound {
    /// Bound shared by the listing and aggregation queries (`>=`).
    pub fn inclusive_cutoff() -> Self {
        Self::OnOrAfter(data_model_cutoff())
    }

    /// Bound used by the tabular dump (`>`).
    pub fn exclusive_cutoff() -> Self {
        Self::After(data_model_cutoff())
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::OnOrAfter(date) | Self::After(date) => *date,
        }
    }

    pub fn admits(&self, candidate: NaiveDate) -> bool {
        match self {
            Self::OnOrAfter(date) => candidate >= *date,
            Self::After(date) => candidate > *date,
        }
    }
}

/// Authorship document as listed for a single proposition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropositionAuthorship {
    pub id_leggo: i64,
    pub id_documento: i64,
    pub id_autor: i64,
    pub descricao_tipo_documento: String,
    pub data: NaiveDate,
    pub url_inteiro_teor: Option<String>,
    pub autores: Option<String>,
}

/// Authorship document of one author joined with its stage label.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorDocument {
    pub id_autor_parlametria: i64,
    pub id_documento: i64,
    pub id_leggo: i64,
    pub data: NaiveDate,
    pub descricao_tipo_documento: String,
    pub url_inteiro_teor: Option<String>,
    pub tipo_documento: String,
    pub tipo_acao: String,
    pub peso_autor_documento: f64,
    pub sigla: Option<String>,
}

/// Per-author document count and weight, before the population bounds are known.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthorTotals {
    pub id_autor: i64,
    pub id_autor_parlametria: i64,
    pub quantidade_autorias: i64,
    pub peso_documentos: f64,
}

/// Per-author, per-action-type totals ranked within the action type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionRank {
    pub id_autor_parlametria: i64,
    pub num_documentos: i64,
    pub ranking_documentos: i64,
    pub peso_total: f64,
    pub tipo_acao: String,
}

/// Flat authorship record carrying both the author's and the bill's house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabularRow {
    pub id_autor: i64,
    pub casa_autor: String,
    pub id_documento: i64,
    #[serde(serialize_with = "as_text")]
    pub id_leggo: i64,
    #[serde(serialize_with = "as_text")]
    pub id_principal: i64,
    pub casa: String,
    pub data: NaiveDate,
    pub descricao_tipo_documento: String,
    pub tipo_documento: String,
    pub tipo_acao: String,
    pub peso_autor_documento: f64,
}

/// Bill flagged as noteworthy in one house.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    pub id_leggo: i64,
    pub id_ext: i64,
    pub casa: String,
    pub sigla: Option<String>,
    pub criterio_aprovada_em_uma_casa: Option<bool>,
    pub fase_global: Option<String>,
    pub local: Option<String>,
    pub local_casa: Option<String>,
    pub data_inicio: Option<NaiveDate>,
    pub data_fim: Option<NaiveDate>,
    pub criterio_parecer_aprovado_comissao: Option<bool>,
    pub comissoes_aprovadas: Option<String>,
    pub criterio_pressao_alta: Option<bool>,
    pub maximo_pressao_periodo: Option<f64>,
    pub agendas: Option<String>,
}

/// Some ids are published as strings to keep the response contract stable.
pub(crate) fn as_text<S>(value: &i64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(value)
}
