//! Service layer for the catalog (offers, categories, tags) and customers.
//! - Repository traits per entity keep persistence behind an explicit seam.
//! - SeaORM implementations live under `repo::seaorm`; in-memory ones under
//!   `memory` behind the `test-support` feature.
//! - Services own the existence checks and hand typed errors to the HTTP layer.

pub mod errors;
pub mod catalog;
pub mod customer;
#[cfg(test)]
pub mod test_support;
