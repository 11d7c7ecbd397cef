use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::catalog::repo::seaorm::{SeaOrmCategoryRepository, SeaOrmOfferRepository, SeaOrmTagRepository};
use service::catalog::repository::{CategoryRepository, OfferRepository, TagRepository};
use service::catalog::{CategoryService, OfferService, TagService};
use service::customer::repo::seaorm::SeaOrmCustomerRepository;
use service::customer::repository::CustomerRepository;
use service::customer::CustomerService;

/// Shared handler state; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub offers: Arc<OfferService>,
    pub categories: Arc<CategoryService>,
    pub tags: Arc<TagService>,
    pub customers: Arc<CustomerService>,
}

impl AppState {
    pub fn from_repositories(
        offers: Arc<dyn OfferRepository>,
        categories: Arc<dyn CategoryRepository>,
        tags: Arc<dyn TagRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            offers: Arc::new(OfferService::new(offers, categories.clone(), tags.clone())),
            categories: Arc::new(CategoryService::new(categories)),
            tags: Arc::new(TagService::new(tags)),
            customers: Arc::new(CustomerService::new(customers)),
        }
    }

    pub fn from_db(db: DatabaseConnection) -> Self {
        Self::from_repositories(
            Arc::new(SeaOrmOfferRepository { db: db.clone() }),
            Arc::new(SeaOrmCategoryRepository { db: db.clone() }),
            Arc::new(SeaOrmTagRepository { db: db.clone() }),
            Arc::new(SeaOrmCustomerRepository { db }),
        )
    }
}
