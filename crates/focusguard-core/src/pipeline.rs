//! # Classification Pipeline
//!
//! A TF-IDF vectorizer followed by a logistic-regression classifier, fitted
//! and applied as one unit so the same transform is used at prediction time.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::classifier::{LogisticRegression, LogisticRegressionConfig};
use crate::error::{FocusGuardError, Result};
use crate::text::TfidfVectorizer;

/// Fitted text classification pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    vectorizer: TfidfVectorizer,
    classifier: LogisticRegression,
}

impl Pipeline {
    /// Fit vectorizer and classifier on `texts` labeled by `labels`.
    pub fn fit<T, L>(texts: &[T], labels: &[L], config: &LogisticRegressionConfig) -> Result<Self>
    where
        T: AsRef<str>,
        L: AsRef<str>,
    {
        let (vectorizer, features) = TfidfVectorizer::fit_transform(texts)?;
        let classifier =
            LogisticRegression::fit(&features, labels, vectorizer.vocabulary_size(), config)?;

        info!(
            samples = texts.len(),
            vocabulary = vectorizer.vocabulary_size(),
            classes = classifier.classes().len(),
            iterations = classifier.n_iter(),
            "Pipeline fitted"
        );

        Ok(Self {
            vectorizer,
            classifier,
        })
    }

    /// Predict the label for one text. Always one of [`Pipeline::classes`].
    pub fn predict(&self, text: &str) -> &str {
        let features = self.vectorizer.transform(text);
        self.classifier.predict(&features)
    }

    /// Predict labels for many texts.
    pub fn predict_batch<T: AsRef<str>>(&self, texts: &[T]) -> Vec<String> {
        texts
            .iter()
            .map(|t| self.predict(t.as_ref()).to_string())
            .collect()
    }

    /// Labels paired with their probability for one text, in class order.
    pub fn predict_proba(&self, text: &str) -> Vec<(&str, f64)> {
        let features = self.vectorizer.transform(text);
        self.classifier
            .classes()
            .iter()
            .map(String::as_str)
            .zip(self.classifier.predict_proba(&features))
            .collect()
    }

    /// Label set fixed at training time.
    pub fn classes(&self) -> &[String] {
        self.classifier.classes()
    }

    pub fn vectorizer(&self) -> &TfidfVectorizer {
        &self.vectorizer
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    /// Check that vectorizer and classifier agree on the feature space.
    pub(crate) fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.classifier.validate()?;
        if self.vectorizer.vocabulary_size() != self.classifier.n_features() {
            return Err(FocusGuardError::InvalidInput(format!(
                "vectorizer emits {} features but classifier expects {}",
                self.vectorizer.vocabulary_size(),
                self.classifier.n_features()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn training_set() -> (Vec<&'static str>, Vec<&'static str>) {
        let texts = vec![
            "chrome YouTube - cat videos",
            "chrome Netflix - Stranger Things",
            "chrome reddit - r/funny",
            "Code main.rs - focusguard",
            "Code lib.rs - focusguard",
            "Terminal cargo build",
            "Slack #general",
            "Spotify lofi beats",
        ];
        let labels = vec![
            "distracting",
            "distracting",
            "distracting",
            "productive",
            "productive",
            "productive",
            "neutral",
            "neutral",
        ];
        (texts, labels)
    }

    #[test]
    fn test_fit_and_predict() {
        let (texts, labels) = training_set();
        let pipeline = Pipeline::fit(&texts, &labels, &Default::default()).unwrap();

        assert_eq!(pipeline.classes(), &["distracting", "neutral", "productive"]);
        assert_eq!(pipeline.predict("chrome youtube.com"), "distracting");
        assert_eq!(pipeline.predict("Code focusguard"), "productive");
    }

    #[test]
    fn test_prediction_is_always_a_training_label() {
        let (texts, labels) = training_set();
        let pipeline = Pipeline::fit(&texts, &labels, &Default::default()).unwrap();

        for input in ["", "   ", "completely unseen words", "ñ 日本語"] {
            let label = pipeline.predict(input);
            assert!(labels.contains(&label), "unexpected label {label}");
        }
    }

    #[test]
    fn test_predict_batch_matches_predict() {
        let (texts, labels) = training_set();
        let pipeline = Pipeline::fit(&texts, &labels, &Default::default()).unwrap();

        let batch = pipeline.predict_batch(&texts);
        for (text, label) in texts.iter().zip(&batch) {
            assert_eq!(pipeline.predict(text), label.as_str());
        }
    }

    #[test]
    fn test_predict_proba_labels() {
        let (texts, labels) = training_set();
        let pipeline = Pipeline::fit(&texts, &labels, &Default::default()).unwrap();

        let proba = pipeline.predict_proba("chrome netflix");
        let names: Vec<_> = proba.iter().map(|(l, _)| *l).collect();
        assert_eq!(names, vec!["distracting", "neutral", "productive"]);
        let best = proba
            .iter()
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(l, _)| *l);
        assert_eq!(best, Some("distracting"));
    }
}
