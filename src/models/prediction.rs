//! 预测相关类型与规范化键编码
//!
//! 将 (年龄, 任意症状名称序列) 编码为顺序无关、去重后的规范化查询键。
//! 集合相等的输入必须产生相同的键，预测缓存的去重依赖这一点。

use crate::models::record::SymptomSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 规范化症状键
///
/// 去重、丢弃模式外名称、按字典序排序后以 `,` 连接的确定性编码。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymptomKey(String);

impl SymptomKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// 预测查询键
///
/// 记忆化缓存的查找键。对任意输入完全、可哈希、顺序无关。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredictionQuery {
    /// 年龄
    pub age: u32,
    /// 规范化症状键
    pub key: SymptomKey,
}

impl PredictionQuery {
    /// 规范化编码
    ///
    /// 重复名称被去重，模式之外的未知名称被静默忽略（文档化策略，
    /// 不视为错误），剩余名称按字典序排序。同时产出分类器所需的
    /// 固定模式特征向量（未出现的症状置 0）。
    pub fn encode(
        schema: &SymptomSchema,
        age: u32,
        symptoms: &[String],
    ) -> (Self, FeatureVector) {
        let known: BTreeSet<&str> = symptoms
            .iter()
            .map(String::as_str)
            .filter(|name| schema.index_of(name).is_some())
            .collect();

        let mut flags = vec![false; schema.len()];
        for name in &known {
            // index_of 在上面的过滤中已验证命中
            if let Some(idx) = schema.index_of(name) {
                flags[idx] = true;
            }
        }

        let key = SymptomKey(known.into_iter().collect::<Vec<_>>().join(","));

        (
            Self { age, key },
            FeatureVector {
                age,
                symptoms: flags,
            },
        )
    }
}

/// 分类器输入特征向量
///
/// 年龄加上按模式顺序对齐的症状指示位。
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    pub age: u32,
    pub symptoms: Vec<bool>,
}

/// 预测结果
///
/// 对相同的 PredictionQuery，结果恒定（分类器确定性为外部契约前提）。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 正类概率，[0, 1]
    #[serde(rename = "risk")]
    pub risk_probability: f64,
    /// 是否高风险
    #[serde(rename = "isHighRisk")]
    pub is_high_risk: bool,
}
