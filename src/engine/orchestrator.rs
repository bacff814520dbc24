// ==========================================
// 人力资源分配系统 - 分配引擎编排器
// ==========================================
// 用途: 扣减预算 → 执行策略 → (贪心)满负荷兜底 → 预算校验
// 红线: 每次运行独占容量矩阵与分配列表，无跨运行状态
// 红线: 致命错误不返回部分分配；预算越界只告警
// ==========================================

use crate::domain::{Allocation, CapacityMatrix, Employee, Project};
use crate::engine::backfill::FullUtilizationBackfill;
use crate::engine::budget_ledger::{BudgetLedger, ToleranceBand};
use crate::engine::error::{AllocationError, AllocationResult};
use crate::engine::heuristic::HeuristicAllocator;
use crate::engine::optimal::{LpSolver, OptimalAllocator};
use crate::engine::outcome::{BudgetScope, RunNote, RunResult, RunWarning};
use crate::engine::params::RunParameters;
use crate::engine::strategy::AllocationStrategy;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// AllocationEngine - 分配引擎
// ==========================================
pub struct AllocationEngine {
    solver: Option<Arc<dyn LpSolver>>,
    backfill: FullUtilizationBackfill,
}

impl AllocationEngine {
    /// 创建带求解器的引擎（支持两种策略）
    pub fn new(solver: Arc<dyn LpSolver>) -> Self {
        Self {
            solver: Some(solver),
            backfill: FullUtilizationBackfill::new(),
        }
    }

    /// 创建仅支持贪心策略的引擎
    pub fn heuristic_only() -> Self {
        Self {
            solver: None,
            backfill: FullUtilizationBackfill::new(),
        }
    }

    /// 使用内置 microlp 求解器
    #[cfg(feature = "microlp")]
    pub fn with_microlp() -> Self {
        Self::new(Arc::new(crate::engine::optimal::MicroLpSolver::new()))
    }

    /// 执行一次完整分配
    ///
    /// # 参数
    /// - employees: 员工列表（已校验）
    /// - projects: 项目列表（已校验，名义预算）
    /// - params: 运行参数
    ///
    /// # 返回
    /// - Ok(RunResult): 分配 + 告警 + 提示
    /// - Err: 容量记账错误 / 无可行解 / 参数错误（不含任何分配）
    #[instrument(skip_all, fields(
        strategy = %params.strategy,
        employees_count = employees.len(),
        projects_count = projects.len(),
        haircut_pct = params.haircut_pct
    ))]
    pub async fn run(
        &self,
        employees: &[Employee],
        projects: &[Project],
        params: &RunParameters,
    ) -> AllocationResult<RunResult> {
        params.validate()?;

        let run_id = Uuid::new_v4().to_string();
        let started_at = Utc::now();
        info!(run_id = %run_id, "开始执行分配运行");

        // ==========================================
        // 步骤1: 应用预算扣减
        // ==========================================
        let adjusted: Vec<Project> = projects
            .iter()
            .map(|p| p.with_haircut(params.haircut_pct))
            .collect();
        debug!(
            total_budget = adjusted.iter().map(|p| p.budget).sum::<f64>(),
            total_adjusted_budget = adjusted.iter().map(|p| p.adjusted_budget).sum::<f64>(),
            "预算扣减完成"
        );

        // ==========================================
        // 步骤2: 执行策略
        // ==========================================
        let mut capacity = CapacityMatrix::new(employees);
        let (allocations, notes) = match params.strategy {
            AllocationStrategy::Heuristic => {
                self.run_heuristic(employees, &adjusted, params, &mut capacity)?
            }
            AllocationStrategy::Optimal => {
                self.run_optimal(employees, &adjusted, params, &mut capacity)
                    .await?
            }
        };

        // ==========================================
        // 步骤3: 预算校验
        // ==========================================
        let warnings = validate_budgets(&allocations, &adjusted, params);

        info!(
            run_id = %run_id,
            allocations_count = allocations.len(),
            warnings_count = warnings.len(),
            notes_count = notes.len(),
            "分配运行完成"
        );

        Ok(RunResult {
            run_id,
            strategy: params.strategy,
            started_at,
            finished_at: Utc::now(),
            projects: adjusted,
            allocations,
            warnings,
            notes,
        })
    }

    fn run_heuristic(
        &self,
        employees: &[Employee],
        projects: &[Project],
        params: &RunParameters,
        capacity: &mut CapacityMatrix,
    ) -> AllocationResult<(Vec<Allocation>, Vec<RunNote>)> {
        let allocator = HeuristicAllocator::new(params.lead_seed_fraction);
        let mut allocations = allocator.allocate(employees, projects, capacity)?;
        let notes = self
            .backfill
            .fill(employees, projects, capacity, &mut allocations)?;
        Ok((allocations, notes))
    }

    async fn run_optimal(
        &self,
        employees: &[Employee],
        projects: &[Project],
        params: &RunParameters,
        capacity: &mut CapacityMatrix,
    ) -> AllocationResult<(Vec<Allocation>, Vec<RunNote>)> {
        let solver = self
            .solver
            .as_ref()
            .ok_or(AllocationError::SolverUnavailable)?;
        let allocator = OptimalAllocator::from_params(params);
        let allocations = allocator
            .allocate(solver.as_ref(), employees, projects, capacity)
            .await?;
        let notes = FullUtilizationBackfill::unallocatable_notes(projects, capacity);
        Ok((allocations, notes))
    }
}

/// 逐项目 + 组合校验预算容差
///
/// 规则：
/// 1) 项目: 调整后预算 ± project_tolerance_pct
/// 2) 组合: Σ 调整后预算 ± overall_tolerance_pct
/// 3) 判定带浮点余量（COST_CHECK_EPSILON），求解器贴边的解不误报
pub fn validate_budgets(
    allocations: &[Allocation],
    projects: &[Project],
    params: &RunParameters,
) -> Vec<RunWarning> {
    let ledger = BudgetLedger::new(allocations);
    let mut warnings = Vec::new();

    for project in projects {
        let actual = ledger.project_cost(&project.project_id);
        let band = ToleranceBand::from_percent(project.adjusted_budget, params.project_tolerance_pct);
        if !band.contains_approx(actual) {
            warn!(
                project_id = %project.project_id,
                actual,
                lower = band.lower,
                upper = band.upper,
                "项目分配成本超出预算容差"
            );
            warnings.push(RunWarning::budget_violation(
                BudgetScope::Project(project.project_id.clone()),
                actual,
                band,
            ));
        }
    }

    let total_budget: f64 = projects.iter().map(|p| p.adjusted_budget).sum();
    let actual = ledger.portfolio_cost();
    let band = ToleranceBand::from_percent(total_budget, params.overall_tolerance_pct);
    if !band.contains_approx(actual) {
        warn!(
            actual,
            lower = band.lower,
            upper = band.upper,
            "组合总成本超出预算容差"
        );
        warnings.push(RunWarning::budget_violation(BudgetScope::Portfolio, actual, band));
    }

    warnings
}
