//! Domain error types.
//!
//! Missing market data is not an error: inside the engine it is `Option`
//! and degrades to zeros or skipped candidates. Errors here cover the
//! boundary: configuration, loading a snapshot, writing a report.

/// Top-level error type for themarank.
#[derive(Debug, thiserror::Error)]
pub enum ThemarankError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("failed to load {file}: {reason}")]
    DataLoad { file: String, reason: String },

    #[error("invalid data in {file}: {reason}")]
    DataFormat { file: String, reason: String },

    #[error("no monthly price files found under {dir}")]
    NoPriceData { dir: String },

    #[error("failed to write report {file}: {reason}")]
    ReportWrite { file: String, reason: String },

    #[error("unknown theme: {id}")]
    ThemeNotFound { id: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ThemarankError> for std::process::ExitCode {
    fn from(err: &ThemarankError) -> Self {
        let code: u8 = match err {
            ThemarankError::Io(_) | ThemarankError::ReportWrite { .. } => 1,
            ThemarankError::ConfigParse { .. }
            | ThemarankError::ConfigMissing { .. }
            | ThemarankError::ConfigInvalid { .. } => 2,
            ThemarankError::DataLoad { .. }
            | ThemarankError::DataFormat { .. }
            | ThemarankError::NoPriceData { .. } => 3,
            ThemarankError::ThemeNotFound { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
