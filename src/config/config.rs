use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 服务地址
    pub host: String,
    /// 服务端口
    pub port: u16,
    /// 请求超时（秒）
    pub request_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout: 30,
        }
    }
}

/// 数据集配置
///
/// 未提供真实数据集时，使用固定种子生成确定性的样本数据。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    /// 数据集路径（摄取由外部协作方负责，此处仅透传）
    pub path: Option<PathBuf>,
    /// 样本数据记录数
    pub sample_size: usize,
    /// 样本数据随机种子
    pub seed: u64,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: None,
            sample_size: 1000,
            seed: 42,
        }
    }
}

/// 预测服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    /// 预测缓存最大条目数
    pub cache_capacity: usize,
    /// 单次分类器调用超时（毫秒）
    pub classifier_timeout_ms: u64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1000,
            classifier_timeout_ms: 2000,
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 数据集配置
    pub dataset: DatasetConfig,
    /// 预测服务配置
    pub prediction: PredictionConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.dataset.sample_size, 1000);
        assert_eq!(config.dataset.seed, 42);
        assert_eq!(config.prediction.cache_capacity, 1000);
    }
}
