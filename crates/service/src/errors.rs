use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: i64) -> Self { Self::NotFound(format!("{} {} not found", entity, id)) }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Model(models::errors::ModelError::NotFound(_)))
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        match models::errors::ModelError::from(e) {
            models::errors::ModelError::Db(msg) => Self::Db(msg),
            not_found => Self::Model(not_found),
        }
    }
}
