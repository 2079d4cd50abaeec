//! Query construction and result aggregation.
//!
//! The search path is split in two stages: [`aggregate`] projects every
//! object onto its aggregated columns, and [`predicate`] turns sparse
//! criteria into bound filters that [`search`] applies on top of that
//! projection. [`detail`] assembles the full record for a single object.

pub mod aggregate;
pub mod detail;
pub mod predicate;
pub mod search;

pub use detail::fetch_detail;
pub use predicate::build_predicates;
pub use search::{search_objects, MAX_RESULTS};
