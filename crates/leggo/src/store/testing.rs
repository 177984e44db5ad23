use rusqlite::{params, Connection};

use super::SqliteStore;

/// In-memory database seeded row by row, then handed over as a store.
pub(crate) struct Fixture {
    conn: Connection,
}

impl Fixture {
    pub(crate) fn new() -> Self {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        SqliteStore::apply_schema(&conn).expect("apply schema");
        Self { conn }
    }

    /// Registers the proposition (once) and adds it to `interest`.
    pub(crate) fn proposition(&self, id_leggo: i64, interest: &str, theme_slugs: Option<&str>) {
        self.conn
            .execute(
                "INSERT OR IGNORE INTO proposicao (id_leggo, casa_origem) VALUES (?1, 'camara')",
                params![id_leggo],
            )
            .expect("insert proposicao");
        self.conn
            .execute(
                "INSERT INTO interesse (interesse, id_leggo, tema, tema_slug)
                 VALUES (?1, ?2, ?3, ?3)",
                params![interest, id_leggo, theme_slugs],
            )
            .expect("insert interesse");
    }

    pub(crate) fn stage(
        &self,
        id: i64,
        id_leggo: i64,
        sigla_tipo: &str,
        numero: i64,
        data_apresentacao: &str,
    ) {
        self.conn
            .execute(
                "INSERT INTO etapa_proposicao (id, id_leggo, id_ext, casa, sigla_tipo, numero,
                                               data_apresentacao)
                 VALUES (?1, ?2, ?1, 'camara', ?3, ?4, ?5)",
                params![id, id_leggo, sigla_tipo, numero, data_apresentacao],
            )
            .expect("insert etapa_proposicao");
    }

    pub(crate) fn authorship(&self, seed: AuthorshipSeed) {
        self.conn
            .execute(
                "INSERT INTO autoria (id_leggo, id_principal, casa, id_documento, id_autor,
                                      id_autor_parlametria, casa_autor,
                                      descricao_tipo_documento, data, url_inteiro_teor,
                                      tipo_documento, tipo_acao, peso_autor_documento,
                                      autores, etapa_proposicao_id)
                 VALUES (?1, ?2, 'camara', ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                params![
                    seed.id_leggo,
                    seed.id_leggo * 1000,
                    seed.id_documento,
                    seed.id_autor,
                    seed.id_autor_parlametria,
                    seed.casa_autor,
                    seed.descricao_tipo_documento,
                    seed.data,
                    format!("https://www.camara.leg.br/documento/{}", seed.id_documento),
                    seed.tipo_documento,
                    seed.tipo_acao,
                    seed.peso,
                    format!("Deputado {}", seed.id_autor),
                    seed.etapa,
                ],
            )
            .expect("insert autoria");
    }

    pub(crate) fn highlight(&self, id_leggo: i64, id_ext: i64, casa: &str, data_inicio: Option<&str>) {
        self.conn
            .execute(
                "INSERT INTO destaques (id_leggo, id_ext, casa, sigla,
                                        criterio_aprovada_em_uma_casa, fase_global, local,
                                        local_casa, data_inicio, data_fim,
                                        criterio_parecer_aprovado_comissao,
                                        comissoes_aprovadas, criterio_pressao_alta,
                                        maximo_pressao_periodo, agendas)
                 VALUES (?1, ?2, ?3, 'PL 6299/2002', 0, 'Construção', 'Plenário', ?3, ?4, NULL,
                         1, 'CCJC', 1, 87.5, NULL)",
                params![id_leggo, id_ext, casa, data_inicio],
            )
            .expect("insert destaques");
    }

    pub(crate) fn into_store(self) -> SqliteStore {
        SqliteStore::from_connection(self.conn)
    }
}

/// Builder for one `autoria` row with sensible defaults.
#[derive(Debug, Clone)]
pub(crate) struct AuthorshipSeed {
    id_leggo: i64,
    id_autor: i64,
    id_autor_parlametria: i64,
    id_documento: i64,
    casa_autor: String,
    descricao_tipo_documento: String,
    tipo_documento: String,
    tipo_acao: String,
    peso: f64,
    data: String,
    etapa: Option<i64>,
}

impl AuthorshipSeed {
    pub(crate) fn new(id_leggo: i64, id_autor_parlametria: i64) -> Self {
        Self {
            id_leggo,
            id_autor: id_autor_parlametria,
            id_autor_parlametria,
            id_documento: id_leggo * 100 + id_autor_parlametria,
            casa_autor: "camara".to_string(),
            descricao_tipo_documento: "Projeto de Lei".to_string(),
            tipo_documento: "Emenda".to_string(),
            tipo_acao: "Proposição".to_string(),
            peso: 1.0,
            data: "2019-06-01".to_string(),
            etapa: None,
        }
    }

    pub(crate) fn author(mut self, id_autor: i64) -> Self {
        self.id_autor = id_autor;
        self
    }

    pub(crate) fn document(mut self, id_documento: i64) -> Self {
        self.id_documento = id_documento;
        self
    }

    pub(crate) fn document_type(mut self, tipo_documento: &str) -> Self {
        self.tipo_documento = tipo_documento.to_string();
        self
    }

    pub(crate) fn action(mut self, tipo_acao: &str) -> Self {
        self.tipo_acao = tipo_acao.to_string();
        self
    }

    pub(crate) fn weight(mut self, peso: f64) -> Self {
        self.peso = peso;
        self
    }

    pub(crate) fn on(mut self, data: &str) -> Self {
        self.data = data.to_string();
        self
    }

    pub(crate) fn stage(mut self, etapa: i64) -> Self {
        self.etapa = Some(etapa);
        self
    }

    pub(crate) fn senate(mut self) -> Self {
        self.casa_autor = "senado".to_string();
        self
    }
}
