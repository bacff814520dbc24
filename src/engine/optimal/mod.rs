// ==========================================
// 人力资源分配系统 - 最优分配策略
// ==========================================
// 职责: 线性规划建模 → 外部求解器 → 解码
// 红线: 不重新实现通用求解器，仅适配
// ==========================================

mod formulation;
mod model;

#[cfg(feature = "microlp")]
mod microlp;

pub use formulation::{
    CellKey, Formulation, OptimalAllocator, ASSIGNMENT_BIG_M, SOLUTION_EPSILON,
};
pub use model::{
    LpConstraint, LpProblem, LpSolution, LpSolver, LpVariable, SolveStatus, VarId, VariableKind,
};

#[cfg(feature = "microlp")]
pub use microlp::MicroLpSolver;
