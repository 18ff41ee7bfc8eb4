use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store read failed for {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: anyhow::Error,
    },
    #[error("store write failed for {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: anyhow::Error,
    },
}

/// Every failure surfaced to the UI. None of these end the process; the action is
/// simply reported as failed and can be re-triggered.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("{0}")]
    ImportParse(String),
    #[error("{0}")]
    NotFound(String),
    #[error("select a workspace first")]
    NoWorkspace,
    #[error("{0}")]
    Authentication(String),
    #[error("{0}")]
    Backup(String),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "bad_params",
            AppError::Store(_) => "store_failed",
            AppError::ImportParse(_) => "import_parse_failed",
            AppError::NotFound(_) => "not_found",
            AppError::NoWorkspace => "no_workspace",
            AppError::Authentication(_) => "not_authenticated",
            AppError::Backup(_) => "backup_failed",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
