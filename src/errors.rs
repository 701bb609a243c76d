use thiserror::Error;

#[derive(Debug, Error)]
pub enum BenchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Db(#[from] tokio_postgres::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Usage(String),
}

impl BenchError {
    /// Process exit status for this error: 1 for argument errors, 2 for every fatal abort.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            BenchError::Usage(_) => 1,
            _ => 2,
        }
    }
}
