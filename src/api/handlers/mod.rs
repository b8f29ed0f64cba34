//! API Handler 模块

pub mod dashboard_handler;
pub mod health_handler;
pub mod predict_handler;
