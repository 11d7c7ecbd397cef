//! Customers: an entity independent of the catalog, with name lookups.

pub mod domain;
pub mod repository;
pub mod repo;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod service;

pub use domain::{Customer, NewCustomer};
pub use service::CustomerService;
