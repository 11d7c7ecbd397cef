use serde::Deserialize;

pub use models::customer::Model as Customer;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewCustomer {
    pub first_name: String,
    pub last_name: String,
}
