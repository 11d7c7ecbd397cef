use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::domain::{Customer, NewCustomer};
use super::repository::CustomerRepository;
use crate::errors::ServiceError;

#[derive(Default)]
struct Rows {
    last_id: i64,
    by_id: BTreeMap<i64, Customer>,
}

#[derive(Default)]
pub struct InMemoryCustomerRepository {
    rows: Mutex<Rows>,
}

impl InMemoryCustomerRepository {
    async fn matching(&self, pred: impl Fn(&Customer) -> bool + Send) -> Vec<Customer> {
        self.rows.lock().await.by_id.values().filter(|c| pred(c)).cloned().collect()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        Ok(self.rows.lock().await.by_id.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.matching(|_| true).await)
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.matching(|c| c.first_name == first_name).await)
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError> {
        Ok(self.matching(|c| c.last_name == last_name).await)
    }

    async fn insert(&self, input: &NewCustomer) -> Result<Customer, ServiceError> {
        let mut rows = self.rows.lock().await;
        rows.last_id += 1;
        let c = Customer { id: rows.last_id, first_name: input.first_name.clone(), last_name: input.last_name.clone() };
        rows.by_id.insert(c.id, c.clone());
        Ok(c)
    }

    async fn update(&self, customer: &Customer) -> Result<Option<Customer>, ServiceError> {
        let mut rows = self.rows.lock().await;
        Ok(rows.by_id.get_mut(&customer.id).map(|slot| {
            *slot = customer.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        Ok(self.rows.lock().await.by_id.remove(&id).is_some())
    }
}
