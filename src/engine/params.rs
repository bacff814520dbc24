// ==========================================
// 人力资源分配系统 - 运行参数
// ==========================================
// 职责: 单次分配运行的全部可调参数及其默认值
// ==========================================

use crate::engine::error::{AllocationError, AllocationResult};
use crate::engine::strategy::AllocationStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 运行参数默认值
pub mod defaults {
    pub const HAIRCUT_PCT: f64 = 5.0;
    pub const PROJECT_TOLERANCE_PCT: f64 = 3.0;
    pub const OVERALL_TOLERANCE_PCT: f64 = 5.0;
    pub const LEAD_SEED_FRACTION: f64 = 0.2;
    pub const LEAD_MIN_PROJECTS: usize = 2;
    pub const SOLVER_TIMEOUT_SECS: u64 = 30;
}

// ==========================================
// RunParameters - 运行参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParameters {
    /// 预算扣减百分比
    pub haircut_pct: f64,

    /// 单项目预算容差（%）
    pub project_tolerance_pct: f64,

    /// 组合总预算容差（%）
    pub overall_tolerance_pct: f64,

    /// 分配策略
    pub strategy: AllocationStrategy,

    /// 骨干每月预置 FTE
    pub lead_seed_fraction: f64,

    /// 骨干最少参与项目数（仅 optimal 策略约束）
    pub lead_min_projects: usize,

    /// 是否启用指派变量与骨干参与约束（optimal 策略）
    pub enforce_lead_participation: bool,

    /// 求解器超时（秒）
    pub solver_timeout_secs: u64,
}

impl Default for RunParameters {
    fn default() -> Self {
        Self {
            haircut_pct: defaults::HAIRCUT_PCT,
            project_tolerance_pct: defaults::PROJECT_TOLERANCE_PCT,
            overall_tolerance_pct: defaults::OVERALL_TOLERANCE_PCT,
            strategy: AllocationStrategy::default(),
            lead_seed_fraction: defaults::LEAD_SEED_FRACTION,
            lead_min_projects: defaults::LEAD_MIN_PROJECTS,
            enforce_lead_participation: true,
            solver_timeout_secs: defaults::SOLVER_TIMEOUT_SECS,
        }
    }
}

impl RunParameters {
    /// 指定策略的默认参数
    pub fn with_strategy(strategy: AllocationStrategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    pub fn solver_timeout(&self) -> Duration {
        Duration::from_secs(self.solver_timeout_secs)
    }

    /// 参数合法性校验
    pub fn validate(&self) -> AllocationResult<()> {
        check_percent("haircut_pct", self.haircut_pct, 100.0)?;
        check_percent("project_tolerance_pct", self.project_tolerance_pct, f64::MAX)?;
        check_percent("overall_tolerance_pct", self.overall_tolerance_pct, f64::MAX)?;

        if !(self.lead_seed_fraction > 0.0 && self.lead_seed_fraction <= 1.0) {
            return Err(AllocationError::invalid_parameter(
                "lead_seed_fraction",
                format!("必须位于 (0, 1]，实际 {}", self.lead_seed_fraction),
            ));
        }
        if self.solver_timeout_secs == 0 {
            return Err(AllocationError::invalid_parameter(
                "solver_timeout_secs",
                "必须大于 0",
            ));
        }
        Ok(())
    }
}

fn check_percent(field: &str, value: f64, max: f64) -> AllocationResult<()> {
    if !value.is_finite() || value < 0.0 || value > max {
        return Err(AllocationError::invalid_parameter(
            field,
            format!("百分比超出范围 [0, {}]: {}", max, value),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let params = RunParameters::default();
        assert_eq!(params.haircut_pct, 5.0);
        assert_eq!(params.project_tolerance_pct, 3.0);
        assert_eq!(params.overall_tolerance_pct, 5.0);
        assert_eq!(params.strategy, AllocationStrategy::Heuristic);
        assert_eq!(params.lead_seed_fraction, 0.2);
        assert_eq!(params.lead_min_projects, 2);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut params = RunParameters::default();
        params.haircut_pct = 120.0;
        assert!(params.validate().is_err());

        let mut params = RunParameters::default();
        params.project_tolerance_pct = -1.0;
        assert!(params.validate().is_err());

        let mut params = RunParameters::default();
        params.lead_seed_fraction = 0.0;
        assert!(params.validate().is_err());

        let mut params = RunParameters::default();
        params.overall_tolerance_pct = f64::NAN;
        assert!(params.validate().is_err());
    }
}
