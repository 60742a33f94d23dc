//! # TF-IDF Vectorizer
//!
//! Maps text to a fixed-width, L2-normalized sparse vector. The vocabulary is
//! every token seen during fitting, sorted alphabetically; each term is
//! weighted by raw count times the smoothed inverse document frequency
//! `ln((1 + n) / (1 + df)) + 1`.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{FocusGuardError, Result};
use crate::text::sparse::SparseVector;
use crate::text::tokenizer::Tokenizer;

/// Fitted TF-IDF transform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    /// Term -> column.
    vocabulary: BTreeMap<String, usize>,
    /// Inverse document frequency per column.
    idf: Vec<f64>,
    #[serde(skip)]
    tokenizer: Tokenizer,
}

impl TfidfVectorizer {
    /// Learn vocabulary and IDF weights from a corpus.
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Result<Self> {
        let tokenizer = Tokenizer::new();
        let n_documents = documents.len();

        let mut document_frequency: BTreeMap<String, usize> = BTreeMap::new();
        for doc in documents {
            let unique: BTreeSet<String> = tokenizer.terms(doc.as_ref()).into_iter().collect();
            for term in unique {
                *document_frequency.entry(term).or_insert(0) += 1;
            }
        }

        if document_frequency.is_empty() {
            return Err(FocusGuardError::EmptyVocabulary);
        }

        // BTreeMap iteration is sorted, so columns follow alphabetical order.
        let mut vocabulary = BTreeMap::new();
        let mut idf = Vec::with_capacity(document_frequency.len());
        for (idx, (term, df)) in document_frequency.into_iter().enumerate() {
            idf.push(((1.0 + n_documents as f64) / (1.0 + df as f64)).ln() + 1.0);
            vocabulary.insert(term, idx);
        }

        debug!(
            documents = n_documents,
            vocabulary = vocabulary.len(),
            "Fitted TF-IDF vocabulary"
        );

        Ok(Self {
            vocabulary,
            idf,
            tokenizer,
        })
    }

    /// Fit on the corpus and return it transformed.
    pub fn fit_transform<S: AsRef<str>>(documents: &[S]) -> Result<(Self, Vec<SparseVector>)> {
        let vectorizer = Self::fit(documents)?;
        let features = documents
            .iter()
            .map(|doc| vectorizer.transform(doc.as_ref()))
            .collect();
        Ok((vectorizer, features))
    }

    /// Transform a single document. Unknown terms are ignored.
    pub fn transform(&self, document: &str) -> SparseVector {
        let pairs = self
            .tokenizer
            .terms(document)
            .iter()
            .filter_map(|term| self.vocabulary.get(term).map(|&idx| (idx, 1.0)))
            .collect();

        let counts = SparseVector::from_pairs(pairs);
        let mut weighted = SparseVector::from_pairs(
            counts
                .iter()
                .map(|(idx, tf)| (idx, tf * self.idf[idx]))
                .collect(),
        );
        weighted.l2_normalize();
        weighted
    }

    /// Number of columns in the output vectors.
    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    /// Column assigned to a term, if it was seen during fitting.
    pub fn feature_index(&self, term: &str) -> Option<usize> {
        self.vocabulary.get(term).copied()
    }

    /// IDF weight of a term, if it was seen during fitting.
    pub fn idf(&self, term: &str) -> Option<f64> {
        self.feature_index(term).map(|idx| self.idf[idx])
    }

    /// Check the internal tables agree. Used after deserialization.
    pub(crate) fn validate(&self) -> Result<()> {
        if self.vocabulary.len() != self.idf.len() {
            return Err(FocusGuardError::InvalidInput(format!(
                "vocabulary has {} terms but {} idf weights",
                self.vocabulary.len(),
                self.idf.len()
            )));
        }
        if let Some(&index) = self.vocabulary.values().find(|&&idx| idx >= self.idf.len()) {
            return Err(FocusGuardError::FeatureOutOfRange {
                index,
                features: self.idf.len(),
            });
        }
        Ok(())
    }
}
