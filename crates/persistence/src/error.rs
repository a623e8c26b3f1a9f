use thiserror::Error;
use std::io;

#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("Image size mismatch: expected {expected} bytes, found {found}")]
    SizeMismatch {
        expected: usize,
        found: usize,
    },
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;
