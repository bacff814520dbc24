// ==========================================
// 人力资源分配系统 - 引擎层
// ==========================================
// 职责: 实现分配规则引擎，不做任何 I/O
// 红线: 所有分配记录必须带来源 (AllocationSource)
// ==========================================

pub mod backfill;
pub mod budget_ledger;
pub mod error;
pub mod heuristic;
pub mod optimal;
pub mod orchestrator;
pub mod outcome;
pub mod params;
pub mod strategy;

// 重导出核心引擎
pub use backfill::FullUtilizationBackfill;
pub use budget_ledger::{BudgetLedger, ToleranceBand};
pub use error::{AllocationError, AllocationResult};
pub use heuristic::HeuristicAllocator;
pub use optimal::{LpProblem, LpSolution, LpSolver, OptimalAllocator, SolveStatus};
pub use orchestrator::{validate_budgets, AllocationEngine};
pub use outcome::{BudgetScope, RunNote, RunResult, RunWarning};
pub use params::RunParameters;
pub use strategy::AllocationStrategy;

#[cfg(feature = "microlp")]
pub use optimal::MicroLpSolver;
