//! Error handling for the patient-case vectorization pipeline.

/// Specialized error type for reading and vectorizing patient-case data
#[derive(Debug, thiserror::Error)]
pub enum PcReaderError {
    /// Error opening or reading an input file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed row in a delimited input file
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number within the offending file
        line: usize,
        /// What was wrong with the row
        message: String,
    },

    /// Invalid run configuration, detected before any row is processed
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A case id has no entry in the DRG label map
    #[error("no DRG label for case id {0:?}")]
    UnknownCaseId(String),

    /// A token of a code's description has no embedding vector
    #[error("no embedding vector for token {token:?} of code {code:?}")]
    MissingToken {
        /// Code whose token list contained the unknown token
        code: String,
        /// The token without an embedding
        token: String,
    },

    /// A demographic field could not be converted to a scalar
    #[error("invalid value {value:?} for demographic variable {variable}")]
    InvalidDemographicValue {
        /// Name of the demographic variable
        variable: String,
        /// The raw field content
        value: String,
    },

    /// A code reached the encoder without a vector-store entry
    #[error("code {0:?} is not present in the vector store")]
    UnknownCode(String),
}

impl PcReaderError {
    /// Build a `Parse` error for a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PcReaderError>;
