use async_trait::async_trait;

use super::domain::{Customer, NewCustomer};
use crate::errors::ServiceError;

/// Name lookups are exact and case-sensitive; lists come back ordered by id.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError>;
    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Customer>, ServiceError>;
    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError>;
    async fn insert(&self, input: &NewCustomer) -> Result<Customer, ServiceError>;
    async fn update(&self, customer: &Customer) -> Result<Option<Customer>, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}
