//! Catalog: offers with their category and tag set, plus category and tag CRUD.

pub mod domain;
pub mod repository;
pub mod repo;
#[cfg(any(test, feature = "test-support"))]
pub mod memory;
pub mod offer_service;
pub mod category_service;
pub mod tag_service;

pub use category_service::CategoryService;
pub use offer_service::OfferService;
pub use tag_service::TagService;
