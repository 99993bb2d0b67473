use thiserror::Error;

#[derive(Error, Debug)]
pub enum PcdError {
    #[error("Invalid lc_pcd container: {0}")]
    FormatError(String),

    #[error("Failed to parse detection report: {0}")]
    ParseError(String),

    #[error("Failed to read input: {0}")]
    InputReadError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PcdError>;
