// ==========================================
// 人力资源分配系统 - 分配配置读取 Trait
// ==========================================
// 职责: 定义引擎运行所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::error::ConfigResult;
use crate::engine::{AllocationStrategy, RunParameters};
use async_trait::async_trait;

// ==========================================
// AllocationConfigReader Trait
// ==========================================
// 实现者: ConfigManager（JSON 文件 + 环境变量覆写）
#[async_trait]
pub trait AllocationConfigReader: Send + Sync {
    // ===== 预算配置 =====

    /// 预算扣减百分比
    ///
    /// # 默认值
    /// - 5
    async fn get_haircut_pct(&self) -> ConfigResult<f64>;

    /// 单项目预算容差（%）
    ///
    /// # 默认值
    /// - 3
    async fn get_project_tolerance_pct(&self) -> ConfigResult<f64>;

    /// 组合总预算容差（%）
    ///
    /// # 默认值
    /// - 5
    async fn get_overall_tolerance_pct(&self) -> ConfigResult<f64>;

    // ===== 策略配置 =====

    /// 分配策略
    ///
    /// # 默认值
    /// - heuristic
    async fn get_strategy(&self) -> ConfigResult<AllocationStrategy>;

    /// 骨干每月预置 FTE
    ///
    /// # 默认值
    /// - 0.2
    async fn get_lead_seed_fraction(&self) -> ConfigResult<f64>;

    /// 骨干最少参与项目数
    ///
    /// # 默认值
    /// - 2
    async fn get_lead_min_projects(&self) -> ConfigResult<usize>;

    /// 是否启用骨干参与约束
    ///
    /// # 默认值
    /// - true
    async fn get_enforce_lead_participation(&self) -> ConfigResult<bool>;

    /// 求解器超时（秒）
    ///
    /// # 默认值
    /// - 30
    async fn get_solver_timeout_secs(&self) -> ConfigResult<u64>;

    /// 汇总为运行参数（并校验）
    async fn load_run_parameters(&self) -> ConfigResult<RunParameters> {
        let params = RunParameters {
            haircut_pct: self.get_haircut_pct().await?,
            project_tolerance_pct: self.get_project_tolerance_pct().await?,
            overall_tolerance_pct: self.get_overall_tolerance_pct().await?,
            strategy: self.get_strategy().await?,
            lead_seed_fraction: self.get_lead_seed_fraction().await?,
            lead_min_projects: self.get_lead_min_projects().await?,
            enforce_lead_participation: self.get_enforce_lead_participation().await?,
            solver_timeout_secs: self.get_solver_timeout_secs().await?,
        };
        params.validate()?;
        Ok(params)
    }
}
