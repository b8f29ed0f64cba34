//! 聚合管道
//!
//! 五个相互独立的归约器，各自是记录存储上的纯函数，在启动时顺序执行
//! 一次，结果冻结为 AggregateSnapshot。快照随后以 Arc 共享给所有请求，
//! 进程生命周期内不再变更；除非整个进程重启，归约器不会被再次执行。

use crate::error::{AppError, Result};
use crate::models::aggregates::{
    AgeRiskEntry, BoxPlotStat, CorrelationRow, RiskCategory, SummaryStats, SymptomStat,
};
use crate::models::record::RecordStore;
use crate::services::stats;
use std::collections::BTreeMap;
use tracing::info;

/// 聚合快照
///
/// 五个归约器输出的冻结集合。只读查询层：年龄范围过滤在冻结数据上
/// 进行，从不修改快照本身。
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateSnapshot {
    age_risk: Vec<AgeRiskEntry>,
    symptom_stats: Vec<SymptomStat>,
    correlation: Vec<CorrelationRow>,
    box_plots: Vec<BoxPlotStat>,
    summary: SummaryStats,
}

impl AggregateSnapshot {
    /// 运行全部归约器并冻结结果
    ///
    /// 空记录存储是致命的启动条件：摘要与患病率归约器的分母为记录
    /// 总数，必须快速失败而不是静默除零。
    pub fn build(store: &RecordStore) -> Result<Self> {
        info!("Building aggregate snapshot from {} records", store.len());

        let summary = reduce_summary(store)?;
        let symptom_stats = reduce_symptom_prevalence(store)?;
        let age_risk = reduce_age_risk(store);
        let correlation = reduce_correlation(store);
        let box_plots = reduce_box_plots(store);

        info!(
            "Aggregate snapshot frozen: {} age entries, {} symptoms, {} correlation rows, {} box plots",
            age_risk.len(),
            symptom_stats.len(),
            correlation.len(),
            box_plots.len()
        );

        Ok(Self {
            age_risk,
            symptom_stats,
            correlation,
            box_plots,
            summary,
        })
    }

    /// 年龄-风险序列（全量）
    pub fn age_risk(&self) -> &[AgeRiskEntry] {
        &self.age_risk
    }

    /// 症状患病率统计
    pub fn symptom_stats(&self) -> &[SymptomStat] {
        &self.symptom_stats
    }

    /// 相关性矩阵
    pub fn correlation(&self) -> &[CorrelationRow] {
        &self.correlation
    }

    /// 箱线图统计
    pub fn box_plots(&self) -> &[BoxPlotStat] {
        &self.box_plots
    }

    /// 全局摘要
    pub fn summary(&self) -> &SummaryStats {
        &self.summary
    }

    /// 按闭区间 [min_age, max_age] 过滤年龄-风险条目
    ///
    /// 任一端可省略表示该侧无界；min > max 时定义为返回空结果而非
    /// 错误（文档化策略）。
    pub fn filter_age_range(&self, min_age: Option<u32>, max_age: Option<u32>) -> Vec<AgeRiskEntry> {
        self.age_risk
            .iter()
            .filter(|entry| {
                min_age.is_none_or(|min| entry.age >= min)
                    && max_age.is_none_or(|max| entry.age <= max)
            })
            .cloned()
            .collect()
    }
}

/// 年龄-风险归约器
///
/// 按精确年龄值分组，每组计算平均风险评分，并按风险标签拆分计数，
/// 产出高/低风险各一条。数据中不存在的年龄不会被合成。
fn reduce_age_risk(store: &RecordStore) -> Vec<AgeRiskEntry> {
    // BTreeMap 保证输出按年龄有序且逐次运行逐位一致
    let mut groups: BTreeMap<u32, (f64, u64, u64)> = BTreeMap::new();
    for record in store.records() {
        let entry = groups.entry(record.age).or_insert((0.0, 0, 0));
        entry.0 += record.risk_score;
        if record.at_risk {
            entry.1 += 1;
        } else {
            entry.2 += 1;
        }
    }

    let mut out = Vec::with_capacity(groups.len() * 2);
    for (age, (risk_sum, high, low)) in groups {
        let mean_risk = risk_sum / (high + low) as f64;
        out.push(AgeRiskEntry {
            age,
            mean_risk,
            category: RiskCategory::HighRisk,
            count: high,
        });
        out.push(AgeRiskEntry {
            age,
            mean_risk,
            category: RiskCategory::LowRisk,
            count: low,
        });
    }
    out
}

/// 症状患病率归约器
///
/// 分母为全量记录数，空存储快速失败。
fn reduce_symptom_prevalence(store: &RecordStore) -> Result<Vec<SymptomStat>> {
    if store.is_empty() {
        return Err(AppError::Dataset(
            "记录存储为空，无法计算症状患病率".to_string(),
        ));
    }
    let total = store.len() as f64;
    let schema = store.schema();

    let stats = (0..schema.len())
        .map(|idx| {
            let mut high = 0u64;
            let mut low = 0u64;
            for record in store.records() {
                if record.symptoms[idx] {
                    if record.at_risk {
                        high += 1;
                    } else {
                        low += 1;
                    }
                }
            }
            SymptomStat {
                name: schema.name(idx).to_string(),
                high_risk: high as f64 / total * 100.0,
                low_risk: low as f64 / total * 100.0,
            }
        })
        .collect();

    Ok(stats)
}

/// 相关性归约器
///
/// 对模式内每对症状计算 Pearson 相关系数（不含年龄/风险列）。
/// 只计算上三角后镜像，对称性由构造保证；对角线固定为 1.0。
/// 零方差列产生的 NaN 按原样保留，不做特殊处理。
fn reduce_correlation(store: &RecordStore) -> Vec<CorrelationRow> {
    let schema = store.schema();
    let n = schema.len();

    let columns: Vec<Vec<f64>> = (0..n)
        .map(|idx| {
            store
                .records()
                .iter()
                .map(|r| if r.symptoms[idx] { 1.0 } else { 0.0 })
                .collect()
        })
        .collect();

    let mut matrix = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let corr = stats::pearson(&columns[i], &columns[j]);
            matrix[i][j] = corr;
            matrix[j][i] = corr;
        }
    }

    matrix
        .into_iter()
        .enumerate()
        .map(|(i, correlations)| CorrelationRow {
            symptom: schema.name(i).to_string(),
            correlations,
        })
        .collect()
}

/// 箱线图归约器
///
/// 按症状存在与否划分风险评分，对存在子集计算 min/Q1/中位数/Q3/max/均值。
/// 分位数使用顺序统计量间的线性插值（见 stats::quantile_sorted）。
/// 没有任何记录携带某症状时，该症状不产生条目（不隐式补零）。
fn reduce_box_plots(store: &RecordStore) -> Vec<BoxPlotStat> {
    let schema = store.schema();

    (0..schema.len())
        .filter_map(|idx| {
            let mut values: Vec<f64> = store
                .records()
                .iter()
                .filter(|r| r.symptoms[idx])
                .map(|r| r.risk_score)
                .collect();
            if values.is_empty() {
                return None;
            }
            values.sort_by(|a, b| a.total_cmp(b));

            Some(BoxPlotStat {
                symptom: schema.name(idx).to_string(),
                min: values[0],
                q1: stats::quantile_sorted(&values, 0.25),
                median: stats::quantile_sorted(&values, 0.5),
                q3: stats::quantile_sorted(&values, 0.75),
                max: values[values.len() - 1],
                mean: stats::mean(&values),
            })
        })
        .collect()
}

/// 摘要归约器
fn reduce_summary(store: &RecordStore) -> Result<SummaryStats> {
    if store.is_empty() {
        return Err(AppError::Dataset(
            "记录存储为空，无法计算摘要统计".to_string(),
        ));
    }

    let risks: Vec<f64> = store.records().iter().map(|r| r.risk_score).collect();
    Ok(SummaryStats {
        average_risk: stats::mean(&risks),
        high_risk_cases: store.records().iter().filter(|r| r.at_risk).count() as u64,
        risk_factors: store.schema().len(),
        total_patients: store.len(),
    })
}
