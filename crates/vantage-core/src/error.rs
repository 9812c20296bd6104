use thiserror::Error;

use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
