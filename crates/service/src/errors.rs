use models::validation::FieldErrors;
use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(FieldErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(models::errors::ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Field messages when this is a form error.
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ServiceError::Validation(e) => Some(e),
            ServiceError::Model(models::errors::ModelError::Validation(e)) => Some(e),
            _ => None,
        }
    }
}

impl From<FieldErrors> for ServiceError {
    fn from(e: FieldErrors) -> Self { Self::Validation(e) }
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self { Self::Db(e.to_string()) }
}

impl From<models::errors::ModelError> for ServiceError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Validation(fe) => Self::Validation(fe),
            other => Self::Model(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_validation_becomes_service_validation() {
        let e: ServiceError = models::errors::ModelError::Validation(FieldErrors::single("title", "bad")).into();
        assert!(matches!(e, ServiceError::Validation(_)));
        assert_eq!(e.field_errors().map(|f| f.get("title").len()), Some(1));
    }

    #[test]
    fn not_found_message() {
        assert_eq!(ServiceError::not_found("pet").to_string(), "not found: pet not found");
    }
}
