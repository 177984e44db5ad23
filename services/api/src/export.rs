use crate::infra::open_store;
use clap::Args;
use leggo::config::AppConfig;
use leggo::domain::{TabularRow, DEFAULT_INTEREST};
use leggo::error::AppError;
use leggo::{AuthorshipService, InterestFilter};
use std::io::Write;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct TabelaArgs {
    /// Interest group whose propositions are exported
    #[arg(long, default_value = DEFAULT_INTEREST)]
    pub(crate) interesse: String,
    /// Optional theme slug narrowing the interest
    #[arg(long)]
    pub(crate) tema: Option<String>,
    /// Override the configured SQLite database path
    #[arg(long)]
    pub(crate) database: Option<PathBuf>,
}

pub(crate) fn run_table_export(args: TabelaArgs) -> Result<(), AppError> {
    let TabelaArgs {
        interesse,
        tema,
        database,
    } = args;

    let mut config = AppConfig::load()?;
    if let Some(path) = database {
        config.database.path = path;
    }

    let service = AuthorshipService::new(open_store(&config.database)?);
    let filter = InterestFilter { interesse, tema };
    let rows = service.table(&filter)?;

    let stdout = std::io::stdout();
    write_table(stdout.lock(), &rows)
}

/// CSV records in query order, headed by the column names. An empty table writes nothing.
pub(crate) fn write_table<W: Write>(writer: W, rows: &[TabularRow]) -> Result<(), AppError> {
    let mut csv = csv::Writer::from_writer(writer);
    for row in rows {
        csv.serialize(row).map_err(std::io::Error::from)?;
    }
    csv.flush()?;
    Ok(())
}
