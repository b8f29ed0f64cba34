//! Riskboard - 卒中风险仪表盘后端
//!
//! 在启动时将患者记录表一次性归约为多个派生统计视图（年龄-风险序列、
//! 症状患病率、相关性矩阵、箱线图统计、全局摘要），并通过有界 LRU
//! 缓存对重复的风险预测请求做记忆化，避免重复调用分类器。

pub mod api;
pub mod config;
pub mod dataset;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
