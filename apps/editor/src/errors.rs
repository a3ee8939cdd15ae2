use thiserror::Error;

/// Application-level error type. Nothing here is fatal: every failure
/// degrades to "document unchanged plus a user-visible message".
///
/// Silent no-op conditions (unknown entry id, out-of-range list index,
/// removing the last list element) are absorbed by the mutation layer and
/// never reported through this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Malformed CV data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for shells that key behavior off the
    /// error kind instead of the message text.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// User-facing message. Validation text is written for the user and
    /// passes through; parse and I/O details stay in the logs.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Parse(e) => {
                tracing::warn!("Import parse error: {e}");
                "O arquivo selecionado não contém um CV válido.".to_string()
            }
            AppError::Io(e) => {
                tracing::warn!("File I/O error: {e}");
                "Não foi possível ler o arquivo selecionado.".to_string()
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                "Ocorreu um erro inesperado.".to_string()
            }
        }
    }
}
