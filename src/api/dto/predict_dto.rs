//! 预测 DTO

use serde::Deserialize;

/// 预测请求
///
/// `symptoms` 可包含重复或未知名称：重复被去重，未知名称被静默忽略。
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    /// 年龄
    pub age: u32,
    /// 症状名称序列（任意顺序）
    pub symptoms: Vec<String>,
}
