//! API 路由模块

pub mod dashboard_routes;
pub mod predict_routes;
