// ==========================================
// 人力资源分配系统 - microlp 求解器适配
// ==========================================
// 依赖: good_lp（microlp 后端，纯 Rust，支持二元变量）
// 红线: 超时/崩溃以状态返回，不重试
// ==========================================

use crate::engine::optimal::model::{
    LpConstraint, LpProblem, LpSolution, LpSolver, SolveStatus, VarId, VariableKind,
};
use async_trait::async_trait;
use good_lp::{
    constraint, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use std::time::Duration;
use tracing::{debug, warn};

// ==========================================
// MicroLpSolver - good_lp + microlp
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct MicroLpSolver;

impl MicroLpSolver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl LpSolver for MicroLpSolver {
    async fn solve(&self, problem: &LpProblem, timeout: Duration) -> LpSolution {
        let owned = problem.clone();
        // 超时后不会中断 blocking 线程，求解在后台跑完后结果被丢弃
        let handle = tokio::task::spawn_blocking(move || solve_blocking(&owned));

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(solution)) => solution,
            Ok(Err(join_err)) => {
                warn!(error = %join_err, "求解线程异常退出");
                LpSolution::failed(SolveStatus::Error, format!("求解线程异常退出: {}", join_err))
            }
            Err(_) => {
                warn!(timeout_secs = timeout.as_secs_f64(), "求解超时");
                LpSolution::failed(
                    SolveStatus::TimedOut,
                    format!("求解超过 {:.1} 秒未返回", timeout.as_secs_f64()),
                )
            }
        }
    }

    fn name(&self) -> &'static str {
        "microlp"
    }
}

/// 同步求解（在 blocking 线程池中执行）
fn solve_blocking(problem: &LpProblem) -> LpSolution {
    let mut vars = ProblemVariables::new();
    let handles: Vec<Variable> = problem
        .variables
        .iter()
        .map(|v| match v.kind {
            VariableKind::Continuous { lower, upper } => vars.add(variable().min(lower).max(upper)),
            VariableKind::Binary => vars.add(variable().binary()),
        })
        .collect();

    let objective = linear_expression(&problem.objective, &handles);
    let mut model = vars.maximise(objective).using(good_lp::microlp);

    for c in &problem.constraints {
        add_constraint(&mut model, c, &handles);
    }

    debug!(
        name = %problem.name,
        variables = handles.len(),
        constraints = problem.constraints.len(),
        "提交 microlp 求解"
    );

    match model.solve() {
        Ok(solution) => LpSolution::optimal(handles.iter().map(|h| solution.value(*h)).collect()),
        Err(ResolutionError::Infeasible) => {
            LpSolution::failed(SolveStatus::Infeasible, "问题无可行解")
        }
        Err(ResolutionError::Unbounded) => LpSolution::failed(SolveStatus::Unbounded, "问题无界"),
        Err(other) => LpSolution::failed(SolveStatus::Error, other.to_string()),
    }
}

fn linear_expression(terms: &[(VarId, f64)], handles: &[Variable]) -> Expression {
    let mut expr = Expression::with_capacity(terms.len());
    for (var, coefficient) in terms {
        expr.add_mul(*coefficient, handles[var.0]);
    }
    expr
}

fn add_constraint<M: SolverModel>(model: &mut M, c: &LpConstraint, handles: &[Variable]) {
    let expr = linear_expression(&c.terms, handles);
    if c.is_equality() {
        if let Some(rhs) = c.lower {
            model.add_constraint(constraint::eq(expr, rhs));
        }
        return;
    }
    if let Some(lower) = c.lower {
        model.add_constraint(constraint::geq(expr.clone(), lower));
    }
    if let Some(upper) = c.upper {
        model.add_constraint(constraint::leq(expr, upper));
    }
}
