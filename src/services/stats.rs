//! 基础统计函数
//!
//! 聚合管道使用的纯函数：均值、线性插值分位数、Pearson 相关系数。

/// 算术均值，空切片返回 NaN
pub fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return f64::NAN;
    }
    xs.iter().sum::<f64>() / (xs.len() as f64)
}

/// 已排序序列的分位数，p ∈ [0, 1]
///
/// 顺序统计量之间的线性插值：h = (n-1)·p，在第 ⌊h⌋ 与 ⌊h⌋+1 个
/// 顺序统计量之间按小数部分插值（numpy `percentile` 的默认规则，
/// 不同插值规则会产生不同的 Q1/Q3，此处固定为这一种）。
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

/// Pearson 相关系数
///
/// 任一序列方差为零时结果未定义，返回 NaN（调用方负责保留而非抑制）。
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ys.len());
    let n = xs.len() as f64;
    if xs.is_empty() {
        return f64::NAN;
    }

    let sum_x: f64 = xs.iter().sum();
    let sum_y: f64 = ys.iter().sum();
    let sum_xy: f64 = xs.iter().zip(ys).map(|(x, y)| x * y).sum();
    let sum_x2: f64 = xs.iter().map(|x| x * x).sum();
    let sum_y2: f64 = ys.iter().map(|y| y * y).sum();

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = ((n * sum_x2 - sum_x * sum_x) * (n * sum_y2 - sum_y * sum_y)).sqrt();

    if denominator == 0.0 {
        f64::NAN
    } else {
        numerator / denominator
    }
}
