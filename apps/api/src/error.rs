//! Resolver-facing errors
//!
//! Store and loader failures are folded into [`ApiError`], which becomes a
//! GraphQL error entry through async-graphql's `ErrorExtensions`:
//! `extensions.code` carries [`ApiError::code`], and internal failures reach
//! the client only as [`INTERNAL_ERROR_MESSAGE`].

use std::sync::Arc;

use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::dataloader::LoadError;
use crate::store::StoreError;

/// Message returned to clients in place of any server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "An unexpected error occurred";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("{entity} already exists: {id}")]
    Conflict { entity: &'static str, id: String },

    /// Input rejected before touching the store
    #[error("invalid input: {0}")]
    ValidationError(String),

    /// A direct store write failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A batched read failed; every waiter of the batch shares this error
    #[error("batched read failed: {0}")]
    Store(Arc<StoreError>),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }

    pub fn conflict(entity: &'static str, id: impl Into<String>) -> Self {
        Self::Conflict {
            entity,
            id: id.into(),
        }
    }

    /// Value of `extensions.code` on the GraphQL error
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::Database(_) | Self::Store(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Server-side failure the client cannot act on
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Database(_) | Self::Store(_) | Self::Internal(_))
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            INTERNAL_ERROR_MESSAGE.to_string()
        } else {
            self.to_string()
        }
    }

    /// Internal failures at error level, client mistakes at debug
    pub fn log(&self) {
        if self.is_internal() {
            tracing::error!(error = %self, code = self.code(), "Resolver failed");
        } else {
            tracing::debug!(error = %self, code = self.code(), "Resolver rejected request");
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        let code = self.code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity, id } => Self::NotFound { entity, id },
            StoreError::Conflict { entity, id } => Self::Conflict { entity, id },
            StoreError::Database(err) => Self::Database(err),
        }
    }
}

impl From<LoadError<StoreError>> for ApiError {
    fn from(err: LoadError<StoreError>) -> Self {
        match err {
            LoadError::Fetch(err) => match err.as_ref() {
                StoreError::NotFound { entity, id } => Self::not_found(*entity, id.clone()),
                StoreError::Conflict { entity, id } => Self::conflict(*entity, id.clone()),
                StoreError::Database(_) => Self::Store(Arc::clone(&err)),
            },
            LoadError::Dropped => Self::Internal("batch load dropped before completing".to_string()),
        }
    }
}
