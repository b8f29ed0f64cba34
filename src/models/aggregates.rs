//! 派生聚合视图类型
//!
//! 五个归约器的输出结构。序列化字段名与前端仪表盘的 JSON 约定保持一致。

use serde::{Deserialize, Serialize};

/// 风险分类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "High Risk")]
    HighRisk,
    #[serde(rename = "Low Risk")]
    LowRisk,
}

/// 年龄-风险条目
///
/// 每个在数据中实际出现的年龄产生两条：高风险计数与低风险计数，
/// 两条共享该年龄组的平均风险评分。数据中不存在的年龄不会被合成。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRiskEntry {
    /// 年龄
    pub age: u32,
    /// 该年龄组的平均风险评分
    #[serde(rename = "risk")]
    pub mean_risk: f64,
    /// 风险分类
    pub category: RiskCategory,
    /// 该分类下的记录数
    pub count: u64,
}

/// 症状患病率统计
///
/// 百分比分母为全量记录数。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymptomStat {
    /// 症状名称
    pub name: String,
    /// 症状存在且高风险的记录占比（%）
    #[serde(rename = "highRisk")]
    pub high_risk: f64,
    /// 症状存在且低风险的记录占比（%）
    #[serde(rename = "lowRisk")]
    pub low_risk: f64,
}

/// 相关性矩阵的一行
///
/// `correlations` 按症状模式顺序对齐，构成完整的对称矩阵。
/// 对角线恒为 1.0；零方差列产生的未定义值以 NaN 表示并保留。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationRow {
    /// 症状名称
    pub symptom: String,
    /// 与各症状的 Pearson 相关系数（模式顺序）
    pub correlations: Vec<f64>,
}

/// 箱线图统计
///
/// 仅针对该症状存在的记录子集计算；没有任何记录携带该症状时不产生条目。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotStat {
    /// 症状名称
    pub symptom: String,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub mean: f64,
}

/// 全局摘要统计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// 平均风险评分
    #[serde(rename = "averageRisk")]
    pub average_risk: f64,
    /// 高风险记录数
    #[serde(rename = "highRiskCases")]
    pub high_risk_cases: u64,
    /// 风险因子数（模式大小）
    #[serde(rename = "riskFactors")]
    pub risk_factors: usize,
    /// 记录总数
    #[serde(rename = "totalPatients")]
    pub total_patients: usize,
}
