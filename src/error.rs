use thiserror::Error;

/// Errors that can occur while importing a recipe
#[derive(Error, Debug)]
pub enum ImportError {
    /// A section the adapter cannot do without was not found in the document
    #[error("{source_name}: required section \"{section}\" not found in document")]
    MissingSection {
        source_name: String,
        section: String,
    },

    /// Step labels and instruction paragraphs could not be reconciled
    #[error("{source_name}: cannot reconcile {labels} step labels with {instructions} instructions")]
    CountMismatch {
        source_name: String,
        labels: usize,
        instructions: usize,
    },

    /// More than one embedded do-ahead marker in a single preparation block
    #[error("{source_name}: multiple embedded \"Do ahead\" markers are unsupported")]
    AmbiguousDoAhead { source_name: String },

    /// Steps/instructions parallelism broken at assembly - an adapter defect
    #[error("{source_name}: assembled {steps} step labels against {instructions} instructions")]
    InvariantViolation {
        source_name: String,
        steps: usize,
        instructions: usize,
    },

    /// A manually entered field failed validation
    #[error("manual entry: invalid {field}: {reason}")]
    InvalidField { field: String, reason: String },

    /// The URL does not match any known recipe source
    #[error("no known recipe source matches URL: {0}")]
    UnknownSource(String),

    /// Failed to fetch a page or image
    #[error("failed to fetch URL: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Error building HTTP headers
    #[error("header parse error: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    /// Filesystem error while persisting a record or image
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Canonical record (de)serialization error
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}
