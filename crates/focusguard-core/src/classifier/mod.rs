pub mod lbfgs;
pub mod logistic;

pub use lbfgs::{LbfgsOptions, LbfgsResult};
pub use logistic::{LogisticRegression, LogisticRegressionConfig};
