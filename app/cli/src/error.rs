//! FILENAME: app/cli/src/error.rs

use persistence::PersistenceError;
use thiserror::Error;
use treemap_engine::EngineError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl AppError {
    /// True for failures the user caused and can fix (bad input file,
    /// unresolvable value column, nothing left to plot). Everything else
    /// is reported as unexpected.
    pub fn is_input_error(&self) -> bool {
        match self {
            AppError::Engine(_) => true,
            AppError::Persistence(e) => matches!(
                e,
                PersistenceError::FileNotFound(_) | PersistenceError::EmptyFile(_)
            ),
        }
    }
}
