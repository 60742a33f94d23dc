use thiserror::Error;

/// Errors that can occur while fitting, using or persisting a pipeline.
#[derive(Debug, Error)]
pub enum FocusGuardError {
    /// The training corpus produced no tokens at all.
    #[error("vocabulary is empty: training documents contain no tokens")]
    EmptyVocabulary,

    /// Classification needs at least two distinct labels.
    #[error("need samples of at least 2 classes, found {found}")]
    InsufficientClasses {
        /// Number of distinct labels in the training data.
        found: usize,
    },

    /// Samples and labels disagree, or some other caller error.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A feature vector refers to a column the model does not know about.
    #[error("feature index {index} out of range for {features} features")]
    FeatureOutOfRange {
        /// Offending column.
        index: usize,
        /// Width of the model.
        features: usize,
    },

    /// The artifact was written by an incompatible build.
    #[error("incompatible model artifact: format version {found}, expected {expected}")]
    IncompatibleArtifact {
        /// Version stored in the file.
        found: u32,
        /// Version this build reads.
        expected: u32,
    },

    /// Reading or writing the artifact failed.
    #[error("artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The artifact is not valid JSON or does not match the pipeline layout.
    #[error("artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for FocusGuard operations.
pub type Result<T> = std::result::Result<T, FocusGuardError>;
