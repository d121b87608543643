//! Regression model: tree, forest, and the persisted artifacts.

pub mod artifact;
pub mod forest;
pub mod tree;

pub use artifact::Predictor;
pub use forest::{MaxFeatures, RandomForestRegressor};
pub use tree::RegressionTree;
