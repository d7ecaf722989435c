use std::fmt;

use models::{errors::ModelError, validation::ValidationErrors};
use thiserror::Error;

/// Which lookup came back empty. Each has its own client-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Missing {
    /// `list` on an empty table
    NoRecords,
    /// get/update/delete of an id with no row
    Id,
    /// search with no matching rows
    Matches,
}

impl Missing {
    pub const fn message(self) -> &'static str {
        match self {
            Missing::NoRecords => "No Records Found",
            Missing::Id => "Not Found Such an ID",
            Missing::Matches => "Data Not Found",
        }
    }
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(ValidationErrors),
    #[error("not found: {0}")]
    NotFound(Missing),
    #[error("database error: {0}")]
    Db(String),
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(v) => Self::Validation(v),
            ModelError::Db(msg) => Self::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Db(e.to_string())
    }
}

impl ServiceError {
    /// Stable numeric code for logging, mirroring the HTTP status it maps to.
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 422,
            ServiceError::NotFound(_) => 404,
            ServiceError::Db(_) => 500,
        }
    }
}
