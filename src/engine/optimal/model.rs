// ==========================================
// 人力资源分配系统 - 线性规划问题模型
// ==========================================
// 职责: 求解器无关的问题表示 + 求解器接口
// 约定: 约束 = 系数列表 + 可选下界/上界；等式约束下界 == 上界
// ==========================================

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 变量句柄（问题内下标）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct VarId(pub usize);

/// 变量类型
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VariableKind {
    Continuous { lower: f64, upper: f64 },
    Binary,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpVariable {
    pub name: String,
    pub kind: VariableKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpConstraint {
    pub name: String,
    pub terms: Vec<(VarId, f64)>,
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}

impl LpConstraint {
    pub fn is_equality(&self) -> bool {
        matches!((self.lower, self.upper), (Some(lo), Some(hi)) if lo == hi)
    }
}

// ==========================================
// LpProblem - 最大化问题
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LpProblem {
    pub name: String,
    pub variables: Vec<LpVariable>,
    pub constraints: Vec<LpConstraint>,
    pub objective: Vec<(VarId, f64)>,
}

impl LpProblem {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn add_continuous(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        self.push_variable(name.into(), VariableKind::Continuous { lower, upper })
    }

    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.push_variable(name.into(), VariableKind::Binary)
    }

    /// lower <= Σ terms <= upper
    pub fn add_range(
        &mut self,
        name: impl Into<String>,
        terms: Vec<(VarId, f64)>,
        lower: Option<f64>,
        upper: Option<f64>,
    ) {
        self.constraints.push(LpConstraint {
            name: name.into(),
            terms,
            lower,
            upper,
        });
    }

    /// Σ terms == rhs
    pub fn add_equality(&mut self, name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) {
        self.add_range(name, terms, Some(rhs), Some(rhs));
    }

    pub fn find_constraint(&self, name: &str) -> Option<&LpConstraint> {
        self.constraints.iter().find(|c| c.name == name)
    }

    pub fn binary_count(&self) -> usize {
        self.variables
            .iter()
            .filter(|v| v.kind == VariableKind::Binary)
            .count()
    }

    fn push_variable(&mut self, name: String, kind: VariableKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(LpVariable { name, kind });
        id
    }
}

// ==========================================
// 求解状态与结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
    TimedOut,
    Error,
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Optimal => write!(f, "OPTIMAL"),
            SolveStatus::Infeasible => write!(f, "INFEASIBLE"),
            SolveStatus::Unbounded => write!(f, "UNBOUNDED"),
            SolveStatus::TimedOut => write!(f, "TIMED_OUT"),
            SolveStatus::Error => write!(f, "ERROR"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LpSolution {
    pub status: SolveStatus,
    /// 按 VarId 下标排列；非 Optimal 时为空
    pub values: Vec<f64>,
    pub message: Option<String>,
}

impl LpSolution {
    pub fn optimal(values: Vec<f64>) -> Self {
        Self {
            status: SolveStatus::Optimal,
            values,
            message: None,
        }
    }

    pub fn failed(status: SolveStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            values: Vec::new(),
            message: Some(message.into()),
        }
    }

    pub fn value(&self, var: VarId) -> f64 {
        self.values.get(var.0).copied().unwrap_or(0.0)
    }
}

// ==========================================
// Trait: LpSolver
// ==========================================
// 用途: 外部线性规划/混合整数规划求解能力
// 约定: 超时与崩溃以状态返回，不重试
// 约定: 超时只放弃等待；已提交的求解可能仍在后台线程运行至结束，继续占用 CPU
#[async_trait]
pub trait LpSolver: Send + Sync {
    /// 求解最大化问题
    async fn solve(&self, problem: &LpProblem, timeout: Duration) -> LpSolution;

    /// 求解器名称（日志用）
    fn name(&self) -> &'static str;
}
