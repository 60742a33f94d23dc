//! # FocusGuard Core
//!
//! Text classification engine for FocusGuard. Turns an application name and
//! window title into an activity label with a TF-IDF vectorizer followed by a
//! multinomial logistic-regression classifier, and persists the fitted
//! pipeline as a JSON artifact.
//!
//! ## Quick Start
//!
//! ```rust
//! use focusguard_core::Pipeline;
//!
//! let texts = ["chrome youtube", "chrome netflix", "code main.rs", "terminal cargo"];
//! let labels = ["distracting", "distracting", "productive", "productive"];
//!
//! let pipeline = Pipeline::fit(&texts, &labels, &Default::default()).unwrap();
//! assert_eq!(pipeline.predict("chrome youtube.com"), "distracting");
//! ```
pub mod artifact;
pub mod classifier;
pub mod error;
pub mod pipeline;
pub mod rules;
pub mod text;

// Re-export primary API
pub use artifact::{DEFAULT_MODEL_PATH, FORMAT_VERSION};
pub use classifier::{LogisticRegression, LogisticRegressionConfig};
pub use error::{FocusGuardError, Result};
pub use pipeline::Pipeline;
pub use rules::media_override;
pub use text::{SparseVector, TfidfVectorizer, Token, Tokenizer};

/// Body of the prediction service's liveness route.
pub const LIVENESS_MESSAGE: &str = "FocusGuard API is running";

/// Build the classifier input from an activity record.
///
/// Application name and window title joined by a single space, the same way
/// at training and at prediction time.
pub fn activity_text(app_name: &str, window_title: &str) -> String {
    format!("{app_name} {window_title}")
}
