//! Query layer of the Leggo API: interest resolution, authorship
//! aggregations and highlights over the pipeline's SQLite database.

pub mod authorship;
mod blocking;
pub mod config;
pub mod domain;
pub mod error;
pub mod highlights;
pub mod interest;
pub mod store;
pub mod telemetry;

pub use authorship::{authorship_router, AuthorshipService};
pub use error::{AppError, QueryError};
pub use highlights::{highlights_router, HighlightService};
pub use interest::InterestFilter;
pub use store::{LeggoStore, SqliteStore, StoreError};
