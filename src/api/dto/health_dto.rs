//! 健康检查 DTO

use crate::services::cache::CacheStats;
use serde::Serialize;

/// 健康检查响应
///
/// 对聚合快照各视图大小的只读自省，字段沿用原仪表盘 API 的命名。
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub uptime_seconds: f64,
    /// 记录存储是否已加载
    pub data_loaded: bool,
    /// 分类器是否可用
    pub model_loaded: bool,
    /// 记录总数
    pub total_records: usize,
    /// 记录存储内存估算（MB）
    pub memory_usage_mb: f64,
    /// 缓存的年龄组数（每组两条条目）
    pub cached_age_groups: usize,
    /// 缓存的症状统计条数
    pub cached_symptoms: usize,
    /// 缓存的相关性矩阵行数
    pub cached_correlation_matrix: usize,
    /// 缓存的箱线图条数
    pub cached_box_plot_data: usize,
    /// 预测缓存统计
    pub prediction_cache: CacheStats,
}
