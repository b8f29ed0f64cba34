//! 风险分类器协作方契约
//!
//! 分类器是外部黑盒：给定固定模式的完整特征向量（年龄加每个模式症状
//! 的指示位，未列出的症状默认为 0），返回正类概率与类别标签。契约前提：
//! 确定性且无副作用——预测缓存的命中/未命中除延迟外不可观测区分，
//! 正是建立在这一前提之上。模型训练不在本服务范围内。

use crate::dataset::sample::age_base_risk;
use crate::error::{AppError, Result};
use crate::models::prediction::{FeatureVector, PredictionResult};
use async_trait::async_trait;
use std::sync::Arc;

/// 分类器契约
#[async_trait]
pub trait RiskClassifier: Send + Sync {
    /// 对完整特征向量分类，返回正类概率与标签
    async fn classify(&self, features: &FeatureVector) -> Result<PredictionResult>;
}

/// 启发式分类器
///
/// 用样本数据的风险公式实现契约：年龄基础风险加固定症状权重之和，
/// 阈值 50。与样本生成器共享同一组权重，保证解释一致。
pub struct HeuristicClassifier {
    weights: Vec<f64>,
}

impl HeuristicClassifier {
    pub fn new(weights: Vec<f64>) -> Self {
        Self { weights }
    }
}

#[async_trait]
impl RiskClassifier for HeuristicClassifier {
    async fn classify(&self, features: &FeatureVector) -> Result<PredictionResult> {
        if features.symptoms.len() != self.weights.len() {
            return Err(AppError::Classifier(format!(
                "特征向量长度 {} 与权重数 {} 不一致",
                features.symptoms.len(),
                self.weights.len()
            )));
        }

        let symptom_risk: f64 = features
            .symptoms
            .iter()
            .zip(&self.weights)
            .filter(|(present, _)| **present)
            .map(|(_, w)| *w)
            .sum();
        let raw = (age_base_risk(features.age) + symptom_risk).clamp(0.0, 100.0);

        Ok(PredictionResult {
            risk_probability: raw / 100.0,
            is_high_risk: raw > 50.0,
        })
    }
}

/// 创建分类器
pub fn create_classifier(weights: Vec<f64>) -> Arc<dyn RiskClassifier> {
    Arc::new(HeuristicClassifier::new(weights))
}
