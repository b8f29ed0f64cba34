//! API DTO 模块
//!
//! 定义各端点的请求和响应数据结构。

pub mod dashboard_dto;
pub mod health_dto;
pub mod predict_dto;
