use thiserror::Error;

/// Message carried by the error returned when deleting an absent course.
pub const DELETE_NOT_FOUND: &str = "No record found to delete";

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    #[error("read error: {0}")]
    Read(String),
    #[error("write error: {0}")]
    Write(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
}

impl ServiceError {
    pub fn delete_not_found() -> Self { Self::NotFound(DELETE_NOT_FOUND.to_string()) }

    /// Message suitable for a 400 response when the error is a client input problem.
    pub fn validation_message(&self) -> Option<String> {
        match self {
            ServiceError::Validation(msg) => Some(msg.clone()),
            ServiceError::Model(models::errors::ModelError::Validation(msg)) => Some(msg.clone()),
            _ => None,
        }
    }
}
