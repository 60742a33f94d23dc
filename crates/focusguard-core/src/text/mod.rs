pub mod sparse;
pub mod tfidf;
pub mod tokenizer;

pub use sparse::SparseVector;
pub use tfidf::TfidfVectorizer;
pub use tokenizer::{Token, Tokenizer};
