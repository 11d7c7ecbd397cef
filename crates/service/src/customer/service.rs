use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Customer, NewCustomer};
use super::repository::CustomerRepository;
use crate::errors::ServiceError;

pub struct CustomerService {
    repo: Arc<dyn CustomerRepository>,
}

impl CustomerService {
    pub fn new(repo: Arc<dyn CustomerRepository>) -> Self { Self { repo } }

    pub async fn find_by_id(&self, id: i64) -> Result<Customer, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("customer", id))
    }

    pub async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        self.repo.find_all().await
    }

    /// Customers whose first name equals `name` exactly.
    pub async fn find_by_name(&self, name: &str) -> Result<Vec<Customer>, ServiceError> {
        let found = self.repo.find_by_first_name(name).await?;
        debug!(count = found.len(), "customers by first name");
        Ok(found)
    }

    pub async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError> {
        let found = self.repo.find_by_last_name(last_name).await?;
        debug!(count = found.len(), "customers by last name");
        Ok(found)
    }

    #[instrument(skip(self, input))]
    pub async fn save(&self, input: NewCustomer) -> Result<Customer, ServiceError> {
        let created = self.repo.insert(&input).await?;
        info!(customer_id = created.id, "customer_created");
        Ok(created)
    }

    #[instrument(skip(self, customer), fields(customer_id = customer.id))]
    pub async fn update(&self, customer: Customer) -> Result<Customer, ServiceError> {
        let id = customer.id;
        let updated = self.repo.update(&customer).await?.ok_or_else(|| ServiceError::not_found("customer", id))?;
        info!("customer_updated");
        Ok(updated)
    }

    pub async fn delete(&self, customer: &Customer) -> Result<(), ServiceError> {
        self.delete_by_id(customer.id).await
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("customer", id));
        }
        info!(customer_id = id, "customer_deleted");
        Ok(())
    }
}
