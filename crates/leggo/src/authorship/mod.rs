//! Authorship listings and aggregations scoped by interest group.

pub mod router;
pub mod service;
pub mod views;

#[cfg(test)]
mod tests;

pub use router::authorship_router;
pub use service::AuthorshipService;
pub use views::{AuthorAggregate, AuthorshipRow, OriginalProposalRow};
