//! 核心数据模型模块
//!
//! 定义 Riskboard 的核心数据结构：PatientRecord, SymptomSchema, RecordStore，
//! 派生聚合视图（AgeRiskEntry, SymptomStat, CorrelationRow, BoxPlotStat,
//! SummaryStats）以及预测相关类型（PredictionQuery, PredictionResult）。

pub mod aggregates;
pub mod prediction;
pub mod record;

pub use aggregates::*;
pub use prediction::*;
pub use record::*;
