use axum::{
    Json,
    extract::{Query, State},
    response::IntoResponse,
};
use tracing::debug;

use crate::{
    api::{app_state::AppState, dto::dashboard_dto::*},
    error::AppError,
};

/// `GET /api/v1/dashboard-data`
///
/// 返回冻结快照的全部视图，其中年龄-风险序列按 [age_min, age_max]
/// 闭区间过滤。过滤在冻结数据上进行，从不修改快照。
pub async fn get_dashboard_data(
    State(state): State<AppState>,
    Query(params): Query<DashboardParams>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Dashboard query: age_min={:?}, age_max={:?}",
        params.age_min, params.age_max
    );

    if let Some(max) = params.age_max {
        if max > 100 {
            return Err(AppError::Validation(format!(
                "age_max 不能超过 100，收到 {}",
                max
            )));
        }
    }

    let snapshot = &state.snapshot;
    let response = DashboardResponse {
        age_risk_data: snapshot.filter_age_range(params.age_min, params.age_max),
        symptom_data: snapshot.symptom_stats().to_vec(),
        stats: snapshot.summary().clone(),
        correlation_matrix: snapshot.correlation().to_vec(),
        box_plot_data: snapshot.box_plots().to_vec(),
    };

    Ok(Json(response))
}
