use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

use models::customer;

use crate::customer::domain::{Customer, NewCustomer};
use crate::customer::repository::CustomerRepository;
use crate::errors::ServiceError;

pub struct SeaOrmCustomerRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CustomerRepository for SeaOrmCustomerRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Customer>, ServiceError> {
        Ok(customer::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_all(&self) -> Result<Vec<Customer>, ServiceError> {
        Ok(customer::Entity::find().order_by_asc(customer::Column::Id).all(&self.db).await?)
    }

    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Customer>, ServiceError> {
        Ok(customer::Entity::find()
            .filter(customer::Column::FirstName.eq(first_name))
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn find_by_last_name(&self, last_name: &str) -> Result<Vec<Customer>, ServiceError> {
        Ok(customer::Entity::find()
            .filter(customer::Column::LastName.eq(last_name))
            .order_by_asc(customer::Column::Id)
            .all(&self.db)
            .await?)
    }

    async fn insert(&self, input: &NewCustomer) -> Result<Customer, ServiceError> {
        Ok(customer::create(&self.db, &input.first_name, &input.last_name).await?)
    }

    async fn update(&self, c: &Customer) -> Result<Option<Customer>, ServiceError> {
        let Some(existing) = customer::Entity::find_by_id(c.id).one(&self.db).await? else { return Ok(None) };
        let mut am: customer::ActiveModel = existing.into();
        am.first_name = Set(c.first_name.clone());
        am.last_name = Set(c.last_name.clone());
        Ok(Some(am.update(&self.db).await?))
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = customer::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
