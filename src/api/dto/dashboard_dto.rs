//! 仪表盘 DTO
//!
//! 响应字段名与前端仪表盘的 JSON 约定一致。

use crate::models::aggregates::{
    AgeRiskEntry, BoxPlotStat, CorrelationRow, SummaryStats, SymptomStat,
};
use serde::{Deserialize, Serialize};

/// 仪表盘查询参数
///
/// 两端均可省略，省略表示该侧无界。
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// 年龄下界（闭区间）
    pub age_min: Option<u32>,
    /// 年龄上界（闭区间），存在时不得超过 100
    pub age_max: Option<u32>,
}

/// 仪表盘响应
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    /// 按年龄范围过滤后的年龄-风险序列
    #[serde(rename = "ageRiskData")]
    pub age_risk_data: Vec<AgeRiskEntry>,
    /// 症状患病率统计
    #[serde(rename = "symptomData")]
    pub symptom_data: Vec<SymptomStat>,
    /// 全局摘要
    pub stats: SummaryStats,
    /// 相关性矩阵
    #[serde(rename = "correlationMatrix")]
    pub correlation_matrix: Vec<CorrelationRow>,
    /// 箱线图统计
    #[serde(rename = "boxPlotData")]
    pub box_plot_data: Vec<BoxPlotStat>,
}
