//! 服务模块

pub mod aggregation;
pub mod cache;
pub mod classifier;
pub mod prediction;
pub mod stats;

pub use aggregation::AggregateSnapshot;
pub use cache::{CacheStats, PredictionCache};
pub use classifier::{HeuristicClassifier, RiskClassifier, create_classifier};
pub use prediction::{PredictionService, create_prediction_service};
