//! SeaORM entities for the catalog (categories, tags, offers and their tag links)
//! and the customer table, plus connection helpers.

pub mod errors;
pub mod db;
pub mod category;
pub mod tag;
pub mod offer;
pub mod offer_tag;
pub mod customer;

#[cfg(test)]
mod tests;
