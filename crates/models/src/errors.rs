use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("{0} not found")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl From<sea_orm::DbErr> for ModelError {
    fn from(e: sea_orm::DbErr) -> Self {
        // a write raced with the delete of a row it references
        match e.sql_err() {
            Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(detail)) => {
                ModelError::NotFound(format!("referenced row ({})", detail))
            }
            _ => ModelError::Db(e.to_string()),
        }
    }
}
