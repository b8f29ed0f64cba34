//! Dashboard Routes
//!
//! 定义仪表盘聚合数据的 API 路由。

use crate::api::handlers::dashboard_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建仪表盘路由器
pub fn create_dashboard_router() -> Router<AppState> {
    Router::new().route("/dashboard-data", get(get_dashboard_data))
}
