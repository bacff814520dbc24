// ==========================================
// 人力资源分配系统 - 运行结果
// ==========================================
// 红线: 非致命问题以结构化列表返回，由调用方决定如何呈现
// ==========================================

use crate::domain::{Allocation, Project};
use crate::engine::budget_ledger::ToleranceBand;
use crate::engine::strategy::AllocationStrategy;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 预算校验范围
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "project_id", rename_all = "snake_case")]
pub enum BudgetScope {
    Project(String),
    Portfolio,
}

impl fmt::Display for BudgetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BudgetScope::Project(project_id) => write!(f, "project:{}", project_id),
            BudgetScope::Portfolio => write!(f, "portfolio"),
        }
    }
}

// ==========================================
// RunWarning - 非致命告警
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunWarning {
    /// 实际成本落在容差带之外
    BudgetToleranceViolation {
        scope: BudgetScope,
        actual: f64,
        lower: f64,
        upper: f64,
    },
}

impl RunWarning {
    pub fn budget_violation(scope: BudgetScope, actual: f64, band: ToleranceBand) -> Self {
        RunWarning::BudgetToleranceViolation {
            scope,
            actual,
            lower: band.lower,
            upper: band.upper,
        }
    }
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunWarning::BudgetToleranceViolation {
                scope,
                actual,
                lower,
                upper,
            } => write!(
                f,
                "{} 分配成本 {:.2} 超出预算容差 [{:.2}, {:.2}]",
                scope, actual, lower, upper
            ),
        }
    }
}

// ==========================================
// RunNote - 提示信息（不是告警）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunNote {
    /// 该月没有任何活跃项目，容量保持未分配
    UnallocatableEmployeeMonth {
        employee_id: String,
        month_idx: usize,
        unallocated: f64,
    },
}

impl fmt::Display for RunNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunNote::UnallocatableEmployeeMonth {
                employee_id,
                month_idx,
                unallocated,
            } => write!(
                f,
                "{} 在 {} 无活跃项目，{:.2} FTE 未分配",
                employee_id,
                crate::domain::types::month_label(*month_idx),
                unallocated
            ),
        }
    }
}

// ==========================================
// RunResult - 一次分配运行的冻结结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub strategy: AllocationStrategy,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,

    /// 应用扣减后的项目（报表与校验使用）
    pub projects: Vec<Project>,

    pub allocations: Vec<Allocation>,
    pub warnings: Vec<RunWarning>,
    pub notes: Vec<RunNote>,
}

impl RunResult {
    /// 是否存在预算告警
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 某员工某月的 FTE 合计
    pub fn fte_for(&self, employee_id: &str, month_idx: usize) -> f64 {
        self.allocations
            .iter()
            .filter(|a| a.employee_id == employee_id && a.month_idx == month_idx)
            .map(|a| a.fraction)
            .sum()
    }
}
