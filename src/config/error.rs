// ==========================================
// 人力资源分配系统 - 配置模块错误类型
// ==========================================

use crate::engine::AllocationError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 {path}: {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件写入失败 {path}: {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件格式错误: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    #[error("运行参数无效: {0}")]
    InvalidRunParameters(#[from] AllocationError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
