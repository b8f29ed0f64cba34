use axum::{Json, extract::State, response::IntoResponse};
use tracing::{debug, error};

use crate::{
    api::{app_state::AppState, dto::predict_dto::PredictRequest},
    error::AppError,
};

/// `POST /api/v1/predict`
///
/// 规范化编码请求后走预测缓存；分类器失败或超时只影响本次请求，
/// 对外返回通用错误消息，不泄露内部细节。
pub async fn predict(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<impl IntoResponse, AppError> {
    debug!(
        "Predict request: age={}, {} symptom names",
        request.age,
        request.symptoms.len()
    );

    state.metrics.record_prediction();
    match state
        .prediction_service
        .predict(request.age, &request.symptoms)
        .await
    {
        Ok(result) => Ok(Json(result)),
        Err(e) => {
            // 详细原因只进日志
            error!("Prediction failed: {}", e);
            state.metrics.record_prediction_failure();
            Err(AppError::Prediction)
        }
    }
}
