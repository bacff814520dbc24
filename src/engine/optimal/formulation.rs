// ==========================================
// 人力资源分配系统 - 最优分配（线性规划建模）
// ==========================================
// 决策变量: A[e,p,m] ∈ [0,1]，仅在项目 p 的活跃月 m 上定义
// 目标: max Σ A
// C1 可用性: ∀e,∀m(有活跃项目): Σ_p A[e,p,m] = 1
// C2 项目预算: budget(p)·(1−pt%) <= Σ A·cost <= budget(p)·(1+pt%)
// C3 组合预算: Σ budget·(1−ot%) <= 总成本 <= Σ budget·(1+ot%)
// C4 指派联动: A_total(e,p) <= M·B[e,p], A_total(e,p) >= B[e,p]
// C5 骨干参与: ∀ 骨干 e: Σ_p B[e,p] >= 最少项目数
// ==========================================
// 红线: 求解状态非 Optimal 时不产生任何分配，也不兜底
// ==========================================

use crate::domain::{
    Allocation, AllocationSource, AssignmentKey, CapacityMatrix, Employee, Project, MONTHS_PER_YEAR,
};
use crate::engine::budget_ledger::ToleranceBand;
use crate::engine::error::{AllocationError, AllocationResult};
use crate::engine::optimal::model::{LpProblem, LpSolution, LpSolver, SolveStatus, VarId};
use crate::engine::params::RunParameters;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{info, instrument, warn};

/// 解值低于该阈值视为求解噪声
pub const SOLUTION_EPSILON: f64 = 1e-5;

/// 指派联动大 M（一年最多 12 个 FTE 月）
pub const ASSIGNMENT_BIG_M: f64 = MONTHS_PER_YEAR as f64;

/// 单元键: (员工, 项目, 月份)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CellKey {
    pub employee_idx: usize,
    pub project_idx: usize,
    pub month_idx: usize,
}

// ==========================================
// Formulation - 建模结果
// ==========================================
#[derive(Debug, Clone)]
pub struct Formulation {
    pub problem: LpProblem,
    /// 按 员工 × 项目 × 月份 顺序
    pub cells: Vec<(CellKey, VarId)>,
    /// 指派变量（仅在联动模式下存在）
    pub assignments: BTreeMap<AssignmentKey, VarId>,
}

// ==========================================
// OptimalAllocator - 最优分配
// ==========================================
pub struct OptimalAllocator {
    project_tolerance_pct: f64,
    overall_tolerance_pct: f64,
    lead_min_projects: usize,
    enforce_lead_participation: bool,
    timeout: Duration,
}

impl OptimalAllocator {
    pub fn from_params(params: &RunParameters) -> Self {
        Self {
            project_tolerance_pct: params.project_tolerance_pct,
            overall_tolerance_pct: params.overall_tolerance_pct,
            lead_min_projects: params.lead_min_projects,
            enforce_lead_participation: params.enforce_lead_participation,
            timeout: params.solver_timeout(),
        }
    }

    // ==========================================
    // 建模
    // ==========================================

    /// 构建线性规划问题
    ///
    /// # 参数
    /// - `employees`: 员工列表
    /// - `projects`: 已应用扣减的项目列表（预算取 adjusted_budget）
    pub fn formulate(&self, employees: &[Employee], projects: &[Project]) -> Formulation {
        let mut problem = LpProblem::new("resource_allocation");
        let mut cells = Vec::new();

        // 决策变量 A[e,p,m]
        for (employee_idx, employee) in employees.iter().enumerate() {
            for (project_idx, project) in projects.iter().enumerate() {
                for month_idx in project.active_month_indices() {
                    let var = problem.add_continuous(
                        format!("A[{},{},{}]", employee.employee_id, project.project_id, month_idx),
                        0.0,
                        1.0,
                    );
                    cells.push((
                        CellKey {
                            employee_idx,
                            project_idx,
                            month_idx,
                        },
                        var,
                    ));
                }
            }
        }

        // 目标: max Σ A
        problem.objective = cells.iter().map(|(_, var)| (*var, 1.0)).collect();

        // C1 可用性
        for (employee_idx, employee) in employees.iter().enumerate() {
            for month_idx in 0..MONTHS_PER_YEAR {
                let terms: Vec<(VarId, f64)> = cells
                    .iter()
                    .filter(|(key, _)| key.employee_idx == employee_idx && key.month_idx == month_idx)
                    .map(|(_, var)| (*var, 1.0))
                    .collect();
                if !terms.is_empty() {
                    problem.add_equality(
                        format!("availability:{}:{}", employee.employee_id, month_idx),
                        terms,
                        1.0,
                    );
                }
            }
        }

        // C2 项目预算
        for (project_idx, project) in projects.iter().enumerate() {
            let band = ToleranceBand::from_percent(project.adjusted_budget, self.project_tolerance_pct);
            let terms = cost_terms(&cells, employees, |key| key.project_idx == project_idx);
            problem.add_range(
                format!("budget:{}", project.project_id),
                terms,
                Some(band.lower),
                Some(band.upper),
            );
        }

        // C3 组合预算
        let total_budget: f64 = projects.iter().map(|p| p.adjusted_budget).sum();
        let band = ToleranceBand::from_percent(total_budget, self.overall_tolerance_pct);
        let terms = cost_terms(&cells, employees, |_| true);
        problem.add_range("portfolio", terms, Some(band.lower), Some(band.upper));

        // C4/C5 指派联动与骨干参与
        let mut assignments = BTreeMap::new();
        if self.enforce_lead_participation {
            for (employee_idx, employee) in employees.iter().enumerate() {
                for (project_idx, project) in projects.iter().enumerate() {
                    let key = AssignmentKey::new(&employee.employee_id, &project.project_id);
                    let b = problem.add_binary(format!("B[{}]", key));

                    let mut upper_terms: Vec<(VarId, f64)> = cells
                        .iter()
                        .filter(|(k, _)| k.employee_idx == employee_idx && k.project_idx == project_idx)
                        .map(|(_, var)| (*var, 1.0))
                        .collect();
                    let mut lower_terms = upper_terms.clone();
                    upper_terms.push((b, -ASSIGNMENT_BIG_M));
                    lower_terms.push((b, -1.0));

                    problem.add_range(format!("link_upper:{}", key), upper_terms, None, Some(0.0));
                    problem.add_range(format!("link_lower:{}", key), lower_terms, Some(0.0), None);
                    assignments.insert(key, b);
                }

                if employee.is_lead {
                    let terms: Vec<(VarId, f64)> = assignments
                        .iter()
                        .filter(|(k, _)| k.employee_id == employee.employee_id)
                        .map(|(_, var)| (*var, 1.0))
                        .collect();
                    problem.add_range(
                        format!("lead_participation:{}", employee.employee_id),
                        terms,
                        Some(self.lead_min_projects as f64),
                        None,
                    );
                }
            }
        }

        Formulation {
            problem,
            cells,
            assignments,
        }
    }

    // ==========================================
    // 求解
    // ==========================================

    /// 建模、求解、解码
    ///
    /// # 返回
    /// - Ok(分配列表): 求解状态 Optimal
    /// - Err(Infeasible): 其他任何状态（含超时、求解器崩溃）
    #[instrument(skip_all, fields(
        solver = solver.name(),
        employees_count = employees.len(),
        projects_count = projects.len()
    ))]
    pub async fn allocate(
        &self,
        solver: &dyn LpSolver,
        employees: &[Employee],
        projects: &[Project],
        capacity: &mut CapacityMatrix,
    ) -> AllocationResult<Vec<Allocation>> {
        let formulation = self.formulate(employees, projects);
        info!(
            variables = formulation.problem.variables.len(),
            binaries = formulation.problem.binary_count(),
            constraints = formulation.problem.constraints.len(),
            "线性规划建模完成"
        );

        let solution = if formulation.problem.variables.is_empty() {
            trivial_solution(&formulation.problem)
        } else {
            solver.solve(&formulation.problem, self.timeout).await
        };

        if solution.status != SolveStatus::Optimal {
            let message = solution
                .message
                .clone()
                .unwrap_or_else(|| "求解器未给出说明".to_string());
            warn!(status = %solution.status, message = %message, "线性规划无最优解");
            return Err(AllocationError::Infeasible {
                status: solution.status,
                message,
            });
        }

        let allocations = self.decode(&formulation, &solution, employees, projects, capacity)?;
        info!(allocations_count = allocations.len(), "线性规划解码完成");
        Ok(allocations)
    }

    /// 将非零 A 值解码为分配记录，并同步扣减容量矩阵
    pub fn decode(
        &self,
        formulation: &Formulation,
        solution: &LpSolution,
        employees: &[Employee],
        projects: &[Project],
        capacity: &mut CapacityMatrix,
    ) -> AllocationResult<Vec<Allocation>> {
        let mut allocations = Vec::new();

        for (key, var) in &formulation.cells {
            let value = solution.value(*var);
            if value <= SOLUTION_EPSILON {
                continue;
            }
            let employee = &employees[key.employee_idx];
            let project = &projects[key.project_idx];

            // 求解器允许的数值误差内，截到剩余容量
            let available = capacity.remaining(&employee.employee_id, key.month_idx);
            let fraction = if value > available && value - available <= SOLUTION_EPSILON {
                available
            } else {
                value
            };
            if fraction <= SOLUTION_EPSILON {
                continue;
            }

            capacity.consume(&employee.employee_id, key.month_idx, fraction)?;
            allocations.push(Allocation::new(
                employee,
                &project.project_id,
                key.month_idx,
                fraction,
                AllocationSource::Optimal,
            ));
        }

        Ok(allocations)
    }
}

/// 成本系数: Σ A[e,p,m] · cost(e)，按过滤条件选取单元
fn cost_terms<F>(cells: &[(CellKey, VarId)], employees: &[Employee], include: F) -> Vec<(VarId, f64)>
where
    F: Fn(&CellKey) -> bool,
{
    cells
        .iter()
        .filter(|(key, _)| include(key))
        .map(|(key, var)| (*var, employees[key.employee_idx].monthly_cost))
        .collect()
}

/// 无决策变量时直接判定: 所有约束的空和为 0
fn trivial_solution(problem: &LpProblem) -> LpSolution {
    let violated = problem.constraints.iter().find(|c| {
        c.lower.map(|lo| lo > SOLUTION_EPSILON).unwrap_or(false)
            || c.upper.map(|hi| hi < -SOLUTION_EPSILON).unwrap_or(false)
    });
    match violated {
        Some(c) => LpSolution::failed(
            SolveStatus::Infeasible,
            format!("无决策变量，约束 {} 无法满足", c.name),
        ),
        None => LpSolution::optimal(Vec::new()),
    }
}
