//! API 模块
//!
//! 提供 REST API 支持。

pub mod app_state;
pub mod dto;
pub mod handlers;
pub mod routes;

use crate::api::app_state::AppState;
use crate::api::handlers::health_handler::health_check;
use axum::{
    Router,
    extract::Request,
    middleware::Next,
    routing::get,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn create_router(app_state: AppState) -> Router {
    let metrics = app_state.metrics.clone();

    let api = Router::new()
        .merge(routes::dashboard_routes::create_dashboard_router())
        .merge(routes::predict_routes::create_predict_router());

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_check))
        // 请求计数/耗时指标
        .layer(axum::middleware::from_fn(move |req: Request, next: Next| {
            let metrics = metrics.clone();
            async move {
                let start = std::time::Instant::now();
                let response = next.run(req).await;
                metrics.record_http_request(start.elapsed().as_millis() as u64);
                response
            }
        }))
        // 仪表盘前端跨域访问
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
