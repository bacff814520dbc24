// ==========================================
// OptimalAllocator 集成测试（microlp 求解）
// ==========================================
// 测试目标: 线性规划策略的可行/不可行行为
// 覆盖范围: 无可行解无部分结果、骨干参与约束、预算容差带
// ==========================================

#![cfg(feature = "microlp")]

mod helpers;

use helpers::test_data_builder::{no_haircut, EmployeeBuilder, ProjectBuilder};
use resource_allocation::domain::{AllocationSource, MONTHS_PER_YEAR};
use resource_allocation::engine::{
    AllocationEngine, AllocationError, AllocationStrategy, BudgetLedger, SolveStatus,
};
use std::collections::BTreeSet;

const EPS: f64 = 1e-6;

#[tokio::test]
async fn test_infeasible_portfolio_returns_error_without_allocations() {
    // 满负荷需要 12000，而预算带仅为 [970, 1030]
    let employees = vec![EmployeeBuilder::new("E1").cost(1000.0).build()];
    let projects = vec![ProjectBuilder::new("P1").budget(1000.0).build()];
    let params = no_haircut(AllocationStrategy::Optimal);

    let err = AllocationEngine::with_microlp()
        .run(&employees, &projects, &params)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AllocationError::Infeasible { status: SolveStatus::Infeasible, .. }
    ));
}

#[tokio::test]
async fn test_lead_participates_in_two_projects() {
    let employees = vec![EmployeeBuilder::new("L1").cost(1000.0).lead().build()];
    let projects = vec![
        ProjectBuilder::new("P1").budget(6000.0).build(),
        ProjectBuilder::new("P2").budget(6000.0).build(),
    ];
    let params = no_haircut(AllocationStrategy::Optimal);

    let result = AllocationEngine::with_microlp()
        .run(&employees, &projects, &params)
        .await
        .unwrap();

    assert!(result
        .allocations
        .iter()
        .all(|a| a.source == AllocationSource::Optimal && a.fraction > 0.0));

    let joined: BTreeSet<&str> = result
        .allocations
        .iter()
        .map(|a| a.project_id.as_str())
        .collect();
    assert_eq!(joined.len(), 2);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    for month_idx in 0..MONTHS_PER_YEAR {
        assert!((result.fte_for("L1", month_idx) - 1.0).abs() < EPS);
    }

    // 项目成本落在 ±3% 容差带内（允许求解器数值误差）
    let ledger = BudgetLedger::new(&result.allocations);
    for project in &result.projects {
        let cost = ledger.project_cost(&project.project_id);
        assert!(cost >= project.adjusted_budget * 0.97 - EPS);
        assert!(cost <= project.adjusted_budget * 1.03 + EPS);
    }
}

#[tokio::test]
async fn test_feasible_portfolio_on_band_edge_has_no_warnings() {
    let employees = vec![
        EmployeeBuilder::new("L1").cost(1000.0).lead().build(),
        EmployeeBuilder::new("L2").cost(1000.0).lead().build(),
        EmployeeBuilder::new("E1").cost(1000.0).build(),
    ];
    let projects = vec![
        ProjectBuilder::new("P1").budget(12000.0).build(),
        ProjectBuilder::new("P2").budget(12000.0).build(),
        ProjectBuilder::new("P3").budget(12000.0).build(),
    ];
    let params = no_haircut(AllocationStrategy::Optimal);

    let result = AllocationEngine::with_microlp()
        .run(&employees, &projects, &params)
        .await
        .unwrap();

    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    for employee in &employees {
        for month_idx in 0..MONTHS_PER_YEAR {
            assert!((result.fte_for(&employee.employee_id, month_idx) - 1.0).abs() < EPS);
        }
    }
    for lead in ["L1", "L2"] {
        let joined: BTreeSet<&str> = result
            .allocations
            .iter()
            .filter(|a| a.employee_id == lead)
            .map(|a| a.project_id.as_str())
            .collect();
        assert!(joined.len() >= 2);
    }
}

#[tokio::test]
async fn test_optimal_strategy_reports_idle_months_as_notes() {
    let employees = vec![EmployeeBuilder::new("E1").cost(1000.0).build()];
    let projects = vec![ProjectBuilder::new("P1").months(1, 6).budget(6000.0).build()];
    let mut params = no_haircut(AllocationStrategy::Optimal);
    params.enforce_lead_participation = false;

    let result = AllocationEngine::with_microlp()
        .run(&employees, &projects, &params)
        .await
        .unwrap();

    assert_eq!(result.allocations.len(), 6);
    assert_eq!(result.notes.len(), 6);
    assert!((BudgetLedger::new(&result.allocations).project_cost("P1") - 6000.0).abs() < EPS);
}
