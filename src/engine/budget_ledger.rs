// ==========================================
// 人力资源分配系统 - 预算台账
// ==========================================
// 红线: 台账是分配列表的只读视图，不单独存储成本
// 职责: 项目成本、组合总成本、容差带判定
// ==========================================

use crate::domain::Allocation;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 运行后校验的相对成本容差（吸收求和与求解器的浮点尾差）
pub const COST_CHECK_EPSILON: f64 = 1e-6;

// ==========================================
// ToleranceBand - 容差带
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    pub lower: f64,
    pub upper: f64,
}

impl ToleranceBand {
    /// 以名义值和百分比构造容差带
    ///
    /// lower = nominal × (1 − t/100), upper = nominal × (1 + t/100)
    pub fn from_percent(nominal: f64, tolerance_pct: f64) -> Self {
        Self {
            lower: nominal * (1.0 - tolerance_pct / 100.0),
            upper: nominal * (1.0 + tolerance_pct / 100.0),
        }
    }

    /// 闭区间判定
    pub fn contains(&self, actual: f64) -> bool {
        self.lower <= actual && actual <= self.upper
    }

    /// 带浮点余量的闭区间判定
    ///
    /// 两端各放宽 max(|lower|, |upper|, 1) × COST_CHECK_EPSILON
    pub fn contains_approx(&self, actual: f64) -> bool {
        let slack = self.lower.abs().max(self.upper.abs()).max(1.0) * COST_CHECK_EPSILON;
        self.lower - slack <= actual && actual <= self.upper + slack
    }
}

// ==========================================
// BudgetLedger - 预算台账（只读视图）
// ==========================================
pub struct BudgetLedger<'a> {
    allocations: &'a [Allocation],
}

impl<'a> BudgetLedger<'a> {
    pub fn new(allocations: &'a [Allocation]) -> Self {
        Self { allocations }
    }

    /// 项目已分配成本
    pub fn project_cost(&self, project_id: &str) -> f64 {
        self.allocations
            .iter()
            .filter(|a| a.project_id == project_id)
            .map(|a| a.cost)
            .sum()
    }

    /// 组合总成本
    pub fn portfolio_cost(&self) -> f64 {
        self.allocations.iter().map(|a| a.cost).sum()
    }

    /// 各项目成本（按项目编号排序）
    pub fn project_costs(&self) -> BTreeMap<String, f64> {
        let mut costs = BTreeMap::new();
        for allocation in self.allocations {
            *costs.entry(allocation.project_id.clone()).or_insert(0.0) += allocation.cost;
        }
        costs
    }

    /// 容差判定
    ///
    /// nominal × (1 − t/100) <= actual <= nominal × (1 + t/100)
    pub fn within_tolerance(actual: f64, nominal: f64, tolerance_pct: f64) -> bool {
        ToleranceBand::from_percent(nominal, tolerance_pct).contains(actual)
    }
}
