//! 数据集模块
//!
//! 记录存储的数据来源。真实数据集的摄取（CSV 等分隔格式）由外部协作方
//! 负责；未提供数据集时，使用固定种子生成确定性的样本数据。

pub mod sample;

pub use sample::{default_schema, generate_sample_records, risk_weights};
