//! Application-wide error types using thiserror.

/// Application-wide error type.
#[derive(thiserror::Error, Debug)]
pub enum SeamError {
    /// The input table is malformed: a required column is absent or a
    /// value cannot be interpreted.
    #[error("Data error: {0}")]
    Data(String),

    /// Filtering left nothing to analyse, so there is nothing to plot.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// Chart construction or drawing error.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Common result type for the application.
pub type Result<T> = std::result::Result<T, SeamError>;
