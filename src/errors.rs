use thiserror::Error;

use crate::domain::NodeError;

/// Crate-level errors: domain failures plus configuration loading.
#[derive(Error, Debug)]
pub enum TreeError {
    #[error("{0}")]
    Node(#[from] NodeError),

    #[error("config error: {message}")]
    Config { message: String },
}

pub type TreeResult<T> = Result<T, TreeError>;
