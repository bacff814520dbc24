// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use async_trait::async_trait;
use resource_allocation::config::{AllocationConfigReader, ConfigResult};
use resource_allocation::engine::{AllocationStrategy, RunParameters};

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub params: RunParameters,
}

impl MockConfig {
    /// 创建默认配置
    pub fn default() -> Self {
        Self {
            params: RunParameters::default(),
        }
    }

    pub fn with_strategy(strategy: AllocationStrategy) -> Self {
        Self {
            params: RunParameters::with_strategy(strategy),
        }
    }

    pub fn with_haircut(mut self, haircut_pct: f64) -> Self {
        self.params.haircut_pct = haircut_pct;
        self
    }
}

#[async_trait]
impl AllocationConfigReader for MockConfig {
    async fn get_haircut_pct(&self) -> ConfigResult<f64> {
        Ok(self.params.haircut_pct)
    }

    async fn get_project_tolerance_pct(&self) -> ConfigResult<f64> {
        Ok(self.params.project_tolerance_pct)
    }

    async fn get_overall_tolerance_pct(&self) -> ConfigResult<f64> {
        Ok(self.params.overall_tolerance_pct)
    }

    async fn get_strategy(&self) -> ConfigResult<AllocationStrategy> {
        Ok(self.params.strategy)
    }

    async fn get_lead_seed_fraction(&self) -> ConfigResult<f64> {
        Ok(self.params.lead_seed_fraction)
    }

    async fn get_lead_min_projects(&self) -> ConfigResult<usize> {
        Ok(self.params.lead_min_projects)
    }

    async fn get_enforce_lead_participation(&self) -> ConfigResult<bool> {
        Ok(self.params.enforce_lead_participation)
    }

    async fn get_solver_timeout_secs(&self) -> ConfigResult<u64> {
        Ok(self.params.solver_timeout_secs)
    }
}
