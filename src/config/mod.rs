// ==========================================
// 人力资源分配系统 - 配置层
// ==========================================
// 职责: 运行参数与输入输出路径配置，支持环境变量覆写
// 存储: JSON 文件
// ==========================================

pub mod allocation_config_trait;
pub mod config_manager;
pub mod error;

// 重导出核心配置管理器
pub use allocation_config_trait::AllocationConfigReader;
pub use config_manager::{config_keys, ConfigManager, ENV_PREFIX};
pub use error::{ConfigError, ConfigResult};
