//! 预测服务
//!
//! 每请求路径：输入 → 规范化键编码 → 预测缓存命中，或 → 分类器调用
//! →（成功时）写入缓存 → 响应。分类器调用受超时约束，超时作为失败
//! 传播给调用方，不写入缓存。

use crate::error::{AppError, Result};
use crate::models::prediction::{PredictionQuery, PredictionResult};
use crate::models::record::SymptomSchema;
use crate::services::cache::{CacheStats, PredictionCache};
use crate::services::classifier::RiskClassifier;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// 预测服务
pub struct PredictionService {
    schema: Arc<SymptomSchema>,
    cache: PredictionCache,
    classifier: Arc<dyn RiskClassifier>,
    classifier_timeout: Duration,
}

impl PredictionService {
    pub fn new(
        schema: Arc<SymptomSchema>,
        classifier: Arc<dyn RiskClassifier>,
        cache_capacity: usize,
        classifier_timeout: Duration,
    ) -> Self {
        Self {
            schema,
            cache: PredictionCache::new(cache_capacity),
            classifier,
            classifier_timeout,
        }
    }

    /// 对 (年龄, 症状名称序列) 给出风险预测
    ///
    /// 未知症状名称被静默忽略；集合相等的输入命中同一缓存条目。
    pub async fn predict(&self, age: u32, symptoms: &[String]) -> Result<PredictionResult> {
        let (query, features) = PredictionQuery::encode(&self.schema, age, symptoms);
        debug!("Prediction query: age={}, key={:?}", age, query.key.as_str());

        let classifier = self.classifier.clone();
        let deadline = self.classifier_timeout;
        self.cache
            .get_or_compute(query, || async move {
                tokio::time::timeout(deadline, classifier.classify(&features))
                    .await
                    .map_err(|_| AppError::Timeout("分类器调用超过时限".to_string()))?
            })
            .await
    }

    /// 缓存统计快照（用于健康检查）
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// 创建预测服务
pub fn create_prediction_service(
    schema: Arc<SymptomSchema>,
    classifier: Arc<dyn RiskClassifier>,
    cache_capacity: usize,
    classifier_timeout: Duration,
) -> Arc<PredictionService> {
    Arc::new(PredictionService::new(
        schema,
        classifier,
        cache_capacity,
        classifier_timeout,
    ))
}
