use crate::models::record::RecordStore;
use crate::observability::AppMetrics;
use crate::services::aggregation::AggregateSnapshot;
use crate::services::prediction::PredictionService;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Application state containing the frozen aggregate snapshot and shared services
///
/// 启动时构建一次的显式不可变上下文对象，注入到每个 handler，
/// 不使用任何进程级可变全局状态。
#[derive(Clone)]
pub struct AppState {
    /// 只读记录存储
    pub store: Arc<RecordStore>,
    /// 冻结的聚合快照
    pub snapshot: Arc<AggregateSnapshot>,
    /// 预测服务（规范化编码 + LRU 缓存 + 分类器）
    pub prediction_service: Arc<PredictionService>,
    /// 应用指标
    pub metrics: Arc<AppMetrics>,
    /// 进程启动时间
    pub started_at: DateTime<Utc>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("records", &self.store.len())
            .field("snapshot", &"Arc<AggregateSnapshot>")
            .field("prediction_service", &"Arc<PredictionService>")
            .field("started_at", &self.started_at)
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<RecordStore>,
        snapshot: Arc<AggregateSnapshot>,
        prediction_service: Arc<PredictionService>,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            store,
            snapshot,
            prediction_service,
            metrics,
            started_at: Utc::now(),
        }
    }
}
