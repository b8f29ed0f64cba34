use axum::{Json, extract::State, response::IntoResponse};
use chrono::Utc;

use crate::api::{app_state::AppState, dto::health_dto::HealthResponse};

/// `GET /health`
///
/// 聚合快照大小与预测缓存统计的只读自省视图。
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = &state.snapshot;
    let uptime = (Utc::now() - state.started_at).num_milliseconds() as f64 / 1000.0;

    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: uptime,
        data_loaded: !state.store.is_empty(),
        model_loaded: true,
        total_records: state.store.len(),
        memory_usage_mb: state.store.memory_estimate_bytes() as f64 / 1024.0 / 1024.0,
        cached_age_groups: snapshot.age_risk().len() / 2,
        cached_symptoms: snapshot.symptom_stats().len(),
        cached_correlation_matrix: snapshot.correlation().len(),
        cached_box_plot_data: snapshot.box_plots().len(),
        prediction_cache: state.prediction_service.cache_stats(),
    })
}
