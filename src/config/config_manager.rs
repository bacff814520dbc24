// ==========================================
// 人力资源分配系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: JSON 文件 (key → value)
// 覆写: 环境变量 RESOURCE_ALLOCATION_<KEY> 优先于文件
// ==========================================

use crate::config::allocation_config_trait::AllocationConfigReader;
use crate::config::error::{ConfigError, ConfigResult};
use crate::engine::params::defaults;
use crate::engine::AllocationStrategy;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "RESOURCE_ALLOCATION";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
    env_prefix: Option<String>,
    source: Option<PathBuf>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self {
            values: BTreeMap::new(),
            env_prefix: Some(ENV_PREFIX.to_string()),
            source: None,
        }
    }
}

impl ConfigManager {
    /// 默认配置文件位置: <config_dir>/resource-allocation/config.json
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("resource-allocation").join("config.json"))
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径（必须存在）
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut manager = Self::from_json_str(&content)?;
        manager.source = Some(path.to_path_buf());
        info!(path = %path.display(), keys = manager.values.len(), "配置文件已加载");
        Ok(manager)
    }

    /// 文件存在则加载，否则使用空配置（全部取默认值）
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            debug!(path = %path.display(), "配置文件不存在，使用默认配置");
            Ok(Self::default())
        }
    }

    /// 从 JSON 对象文本创建
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let raw: BTreeMap<String, Value> = serde_json::from_str(content)?;
        let values = raw
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect();

        Ok(Self {
            values,
            ..Self::default()
        })
    }

    /// 关闭环境变量覆写（测试用）
    pub fn without_env_override(mut self) -> Self {
        self.env_prefix = None;
        self
    }

    /// 自定义环境变量前缀
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// 写入配置值（仅内存）
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// 保存为 JSON 文件
    pub fn save<P: AsRef<Path>>(&self, path: P) -> ConfigResult<()> {
        let path = path.as_ref();
        let content = serde_json::to_string_pretty(&self.values)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::FileWriteError {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::FileWriteError {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// 读取配置值（环境变量优先）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> Option<String> {
        if let Some(prefix) = &self.env_prefix {
            let var = format!("{}_{}", prefix, key.to_uppercase());
            if let Ok(value) = std::env::var(&var) {
                debug!(config_key = key, env_var = %var, "使用环境变量覆写配置");
                return Some(value);
            }
        }
        self.values.get(key).cloned()
    }

    /// 读取配置值，带默认值
    pub fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .unwrap_or_else(|| default.to_string())
    }

    /// 配置快照（JSON，仅文件值）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    // ===== 路径配置 =====

    pub fn get_employees_path(&self) -> PathBuf {
        PathBuf::from(self.get_config_or_default(config_keys::EMPLOYEES_PATH, "employees.csv"))
    }

    pub fn get_projects_path(&self) -> PathBuf {
        PathBuf::from(self.get_config_or_default(config_keys::PROJECTS_PATH, "projects.csv"))
    }

    pub fn get_report_path(&self) -> PathBuf {
        PathBuf::from(
            self.get_config_or_default(config_keys::REPORT_PATH, "allocation_report.csv"),
        )
    }

    /// 解析数值类配置
    fn parse_value<T: FromStr>(&self, key: &str, default: T) -> ConfigResult<T> {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw.clone(),
                message: "无法解析".to_string(),
            }),
        }
    }

    fn parse_flag(&self, key: &str, default: bool) -> ConfigResult<bool> {
        let Some(raw) = self.get_config_value(key) else {
            return Ok(default);
        };
        match raw.trim().to_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: raw,
                message: "期望布尔值".to_string(),
            }),
        }
    }
}

// ==========================================
// AllocationConfigReader Trait 实现
// ==========================================
#[async_trait]
impl AllocationConfigReader for ConfigManager {
    async fn get_haircut_pct(&self) -> ConfigResult<f64> {
        self.parse_value(config_keys::HAIRCUT_PCT, defaults::HAIRCUT_PCT)
    }

    async fn get_project_tolerance_pct(&self) -> ConfigResult<f64> {
        self.parse_value(
            config_keys::PROJECT_TOLERANCE_PCT,
            defaults::PROJECT_TOLERANCE_PCT,
        )
    }

    async fn get_overall_tolerance_pct(&self) -> ConfigResult<f64> {
        self.parse_value(
            config_keys::OVERALL_TOLERANCE_PCT,
            defaults::OVERALL_TOLERANCE_PCT,
        )
    }

    async fn get_strategy(&self) -> ConfigResult<AllocationStrategy> {
        match self.get_config_value(config_keys::STRATEGY) {
            None => Ok(AllocationStrategy::default()),
            Some(raw) => raw.parse().map_err(|e: String| ConfigError::InvalidValue {
                key: config_keys::STRATEGY.to_string(),
                value: raw.clone(),
                message: e,
            }),
        }
    }

    async fn get_lead_seed_fraction(&self) -> ConfigResult<f64> {
        self.parse_value(config_keys::LEAD_SEED_FRACTION, defaults::LEAD_SEED_FRACTION)
    }

    async fn get_lead_min_projects(&self) -> ConfigResult<usize> {
        self.parse_value(config_keys::LEAD_MIN_PROJECTS, defaults::LEAD_MIN_PROJECTS)
    }

    async fn get_enforce_lead_participation(&self) -> ConfigResult<bool> {
        self.parse_flag(config_keys::ENFORCE_LEAD_PARTICIPATION, true)
    }

    async fn get_solver_timeout_secs(&self) -> ConfigResult<u64> {
        self.parse_value(config_keys::SOLVER_TIMEOUT_SECS, defaults::SOLVER_TIMEOUT_SECS)
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 预算
    pub const HAIRCUT_PCT: &str = "haircut_pct";
    pub const PROJECT_TOLERANCE_PCT: &str = "project_tolerance_pct";
    pub const OVERALL_TOLERANCE_PCT: &str = "overall_tolerance_pct";

    // 策略
    pub const STRATEGY: &str = "strategy";
    pub const LEAD_SEED_FRACTION: &str = "lead_seed_fraction";
    pub const LEAD_MIN_PROJECTS: &str = "lead_min_projects";
    pub const ENFORCE_LEAD_PARTICIPATION: &str = "enforce_lead_participation";
    pub const SOLVER_TIMEOUT_SECS: &str = "solver_timeout_secs";

    // 输入输出
    pub const EMPLOYEES_PATH: &str = "employees_path";
    pub const PROJECTS_PATH: &str = "projects_path";
    pub const REPORT_PATH: &str = "report_path";
}
