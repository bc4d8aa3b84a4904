//! Domain error types.

/// A pair identifier that failed to parse, with the offending input.
#[derive(Debug, Clone, thiserror::Error)]
#[error("invalid pair identifier {input:?}: {reason}")]
pub struct PairParseError {
    pub input: String,
    pub reason: String,
}

/// Top-level error type for pairsift.
#[derive(Debug, thiserror::Error)]
pub enum PairsiftError {
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

    #[error("catalog load error in {file}: {reason}")]
    CatalogLoad { file: String, reason: String },

    #[error("invalid catalog: {reason}")]
    CatalogInvalid { reason: String },

    #[error(transparent)]
    PairParse(#[from] PairParseError),

    #[error("metrics provider error: {reason}")]
    Provider { reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PairsiftError> for std::process::ExitCode {
    fn from(err: &PairsiftError) -> Self {
        let code: u8 = match err {
            PairsiftError::Io(_) => 1,
            PairsiftError::ConfigParse { .. }
            | PairsiftError::ConfigMissing { .. }
            | PairsiftError::ConfigInvalid { .. } => 2,
            PairsiftError::CatalogLoad { .. } | PairsiftError::CatalogInvalid { .. } => 3,
            PairsiftError::Provider { .. } => 4,
            PairsiftError::PairParse(_) | PairsiftError::Data { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
