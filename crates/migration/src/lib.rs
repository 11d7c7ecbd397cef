//! Migrator registering catalog and customer tables in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_category;
mod m20240301_000002_create_tag;
mod m20240301_000003_create_offer;
mod m20240301_000004_create_offer_tag;
mod m20240301_000005_create_customer;
mod m20240301_000006_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_category::Migration),
            Box::new(m20240301_000002_create_tag::Migration),
            Box::new(m20240301_000003_create_offer::Migration),
            Box::new(m20240301_000004_create_offer_tag::Migration),
            Box::new(m20240301_000005_create_customer::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000006_add_indexes::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_are_registered_in_order() {
        let names: Vec<String> = Migrator::migrations().iter().map(|m| m.name().to_string()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert_eq!(names.len(), 6);
    }
}
