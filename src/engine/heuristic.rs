// ==========================================
// 人力资源分配系统 - 贪心分配引擎
// ==========================================
// 红线: 项目顺序 = 持续月数升序，平局按项目编号升序
// 红线: 第二轮不得记录 <= 0 或超过剩余容量的分配
// ==========================================
// 职责: 第一轮骨干预置 + 第二轮预算内填充
// 输入: 员工列表 + 调整后项目列表 + 容量矩阵
// 输出: 分配记录（第三轮兜底见 backfill）
// ==========================================

use crate::domain::{Allocation, AllocationSource, CapacityMatrix, Employee, Project, FTE_EPSILON};
use crate::engine::budget_ledger::BudgetLedger;
use crate::engine::error::AllocationResult;
use tracing::{debug, info, instrument, trace};

// ==========================================
// HeuristicAllocator - 贪心分配引擎
// ==========================================
pub struct HeuristicAllocator {
    lead_seed_fraction: f64,
}

impl HeuristicAllocator {
    /// 构造函数
    ///
    /// # 参数
    /// - `lead_seed_fraction`: 骨干每个活跃月预置的 FTE（默认 0.2）
    pub fn new(lead_seed_fraction: f64) -> Self {
        Self { lead_seed_fraction }
    }

    /// 项目处理顺序：持续月数升序，平局按项目编号升序
    pub fn priority_order(projects: &[Project]) -> Vec<&Project> {
        let mut ordered: Vec<&Project> = projects.iter().collect();
        ordered.sort_by(|a, b| {
            a.duration_months()
                .cmp(&b.duration_months())
                .then_with(|| a.project_id.cmp(&b.project_id))
        });
        ordered
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 执行前两轮分配
    ///
    /// # 参数
    /// - `employees`: 员工列表（加载顺序即处理顺序）
    /// - `projects`: 已应用扣减的项目列表
    /// - `capacity`: 容量矩阵（会被修改）
    ///
    /// # 返回
    /// 按记录顺序排列的分配列表
    #[instrument(skip_all, fields(
        employees_count = employees.len(),
        projects_count = projects.len(),
        lead_seed_fraction = self.lead_seed_fraction
    ))]
    pub fn allocate(
        &self,
        employees: &[Employee],
        projects: &[Project],
        capacity: &mut CapacityMatrix,
    ) -> AllocationResult<Vec<Allocation>> {
        let ordered = Self::priority_order(projects);
        let mut allocations = Vec::new();

        let seeded = self.seed_leads(employees, &ordered, capacity, &mut allocations)?;
        info!(seeded_count = seeded, "第一轮骨干预置完成");

        let filled = self.fill_within_budget(employees, &ordered, capacity, &mut allocations)?;
        info!(filled_count = filled, "第二轮预算内填充完成");

        Ok(allocations)
    }

    /// 第一轮：骨干预置
    ///
    /// 规则：
    /// 1) 每个项目、每个骨干、每个活跃月，剩余 >= seed 时预置 seed
    /// 2) 不考虑预算
    ///
    /// # 返回
    /// 本轮新增记录数
    pub fn seed_leads(
        &self,
        employees: &[Employee],
        ordered: &[&Project],
        capacity: &mut CapacityMatrix,
        allocations: &mut Vec<Allocation>,
    ) -> AllocationResult<usize> {
        let before = allocations.len();
        let seed = self.lead_seed_fraction;

        for project in ordered {
            for lead in employees.iter().filter(|e| e.is_lead) {
                for month_idx in project.active_month_indices() {
                    // 连续扣减 0.2 会留下 0.19999... 的尾差，按容差放行
                    if capacity.remaining(&lead.employee_id, month_idx) + FTE_EPSILON < seed {
                        trace!(
                            employee_id = %lead.employee_id,
                            project_id = %project.project_id,
                            month_idx,
                            "骨干剩余容量不足，跳过预置"
                        );
                        continue;
                    }
                    capacity.consume(&lead.employee_id, month_idx, seed)?;
                    allocations.push(Allocation::new(
                        lead,
                        &project.project_id,
                        month_idx,
                        seed,
                        AllocationSource::LeadSeed,
                    ));
                }
            }
        }

        Ok(allocations.len() - before)
    }

    /// 第二轮：预算内填充
    ///
    /// 规则：
    /// 1) remaining_budget = adjusted_budget − 项目已分配成本，<= 0 则跳过项目
    /// 2) 非骨干员工逐月分配 min(剩余容量, remaining_budget / 月成本)
    /// 3) 预算耗尽只结束当前员工的月份循环，后续员工照常遍历（结果为空操作）
    ///
    /// # 返回
    /// 本轮新增记录数
    pub fn fill_within_budget(
        &self,
        employees: &[Employee],
        ordered: &[&Project],
        capacity: &mut CapacityMatrix,
        allocations: &mut Vec<Allocation>,
    ) -> AllocationResult<usize> {
        let before = allocations.len();

        for project in ordered {
            let spent = BudgetLedger::new(allocations.as_slice()).project_cost(&project.project_id);
            let mut remaining_budget = project.adjusted_budget - spent;

            if remaining_budget <= 0.0 {
                debug!(
                    project_id = %project.project_id,
                    adjusted_budget = project.adjusted_budget,
                    spent,
                    "项目预算已用尽，跳过第二轮"
                );
                continue;
            }

            for employee in employees.iter().filter(|e| !e.is_lead) {
                for month_idx in project.active_month_indices() {
                    let available = capacity.remaining(&employee.employee_id, month_idx);
                    if available <= FTE_EPSILON {
                        continue;
                    }

                    let max_alloc = available.min(remaining_budget / employee.monthly_cost);
                    if max_alloc <= FTE_EPSILON {
                        continue;
                    }

                    capacity.consume(&employee.employee_id, month_idx, max_alloc)?;
                    allocations.push(Allocation::new(
                        employee,
                        &project.project_id,
                        month_idx,
                        max_alloc,
                        AllocationSource::BudgetFill,
                    ));
                    remaining_budget -= employee.cost_of(max_alloc);

                    trace!(
                        employee_id = %employee.employee_id,
                        project_id = %project.project_id,
                        month_idx,
                        fraction = max_alloc,
                        remaining_budget,
                        "预算内填充"
                    );

                    if remaining_budget <= 0.0 {
                        break;
                    }
                }
            }
        }

        Ok(allocations.len() - before)
    }
}

impl Default for HeuristicAllocator {
    fn default() -> Self {
        Self::new(crate::engine::params::defaults::LEAD_SEED_FRACTION)
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn fraction_sum(allocations: &[Allocation], employee_id: &str, month_idx: usize) -> f64 {
        allocations
            .iter()
            .filter(|a| a.employee_id == employee_id && a.month_idx == month_idx)
            .map(|a| a.fraction)
            .sum()
    }

    #[test]
    fn test_priority_order_duration_then_id() {
        let projects = vec![
            Project::new("P3", "Long", 1, 12, 1000.0),
            Project::new("P2", "Short B", 1, 3, 1000.0),
            Project::new("P1", "Short A", 4, 6, 1000.0),
            Project::new("P0", "Mid", 2, 6, 1000.0),
        ];
        let ids: Vec<&str> = HeuristicAllocator::priority_order(&projects)
            .iter()
            .map(|p| p.project_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P1", "P2", "P0", "P3"]);
    }

    #[test]
    fn test_single_employee_fills_budget_exactly() {
        let employees = vec![Employee::new("E1", "Jane", 1000.0)];
        let projects = vec![Project::new("P1", "Website", 1, 3, 3000.0)];
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        assert_eq!(allocations.len(), 3);
        for (month_idx, allocation) in allocations.iter().enumerate() {
            assert_eq!(allocation.month_idx, month_idx);
            assert_eq!(allocation.fraction, 1.0);
            assert_eq!(allocation.source, AllocationSource::BudgetFill);
        }
        assert_eq!(BudgetLedger::new(&allocations).project_cost("P1"), 3000.0);
    }

    #[test]
    fn test_leads_seeded_into_every_project_ignoring_budget() {
        let employees = vec![Employee::lead("L1", "Lead", 10000.0)];
        let projects = vec![
            Project::new("PA", "A", 1, 12, 1.0),
            Project::new("PB", "B", 1, 12, 1.0),
        ];
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        assert_eq!(allocations.len(), 24);
        assert!(allocations.iter().all(|a| a.source == AllocationSource::LeadSeed));
        assert!(allocations.iter().all(|a| (a.fraction - 0.2).abs() < 1e-12));
        for month_idx in 0..12 {
            assert!((capacity.remaining("L1", month_idx) - 0.6).abs() < 1e-9);
        }
    }

    #[test]
    fn test_lead_seeded_into_five_overlapping_projects() {
        let employees = vec![Employee::lead("L1", "Lead", 10000.0)];
        let projects: Vec<Project> = (0..6)
            .map(|i| Project::new(format!("P{}", i), "X", 1, 1, 1000.0))
            .collect();
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        // 5 × 0.2 = 1.0，第六个项目无剩余
        assert_eq!(allocations.len(), 5);
        assert!(fraction_sum(&allocations, "L1", 0) <= 1.0 + 1e-9);
        assert_eq!(capacity.remaining("L1", 0), 0.0);
    }

    #[test]
    fn test_budget_exhaustion_stops_first_employee_and_starves_second() {
        let employees = vec![
            Employee::new("E1", "Jane", 1000.0),
            Employee::new("E2", "Bob", 1000.0),
        ];
        // 预算恰好等于一个人月
        let projects = vec![Project::new("P1", "Audit", 1, 3, 1000.0)];
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].employee_id, "E1");
        assert_eq!(allocations[0].month_idx, 0);
        assert_eq!(allocations[0].fraction, 1.0);
        for month_idx in 0..3 {
            assert_eq!(capacity.remaining("E2", month_idx), 1.0);
        }
    }

    #[test]
    fn test_partial_month_when_budget_runs_short() {
        let employees = vec![Employee::new("E1", "Jane", 1000.0)];
        let projects = vec![Project::new("P1", "Audit", 1, 3, 1500.0)];
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        assert_eq!(allocations.len(), 2);
        assert_eq!(allocations[0].fraction, 1.0);
        assert!((allocations[1].fraction - 0.5).abs() < 1e-12);
        assert!((capacity.remaining("E1", 1) - 0.5).abs() < 1e-12);
        assert_eq!(capacity.remaining("E1", 2), 1.0);
    }

    #[test]
    fn test_project_skipped_when_lead_seeds_consume_budget() {
        let employees = vec![
            Employee::lead("L1", "Lead", 10000.0),
            Employee::new("E1", "Jane", 1000.0),
        ];
        // 骨干预置成本 2000 超过预算 1500
        let projects = vec![Project::new("P1", "Audit", 1, 1, 1500.0)];
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        assert_eq!(allocations.len(), 1);
        assert_eq!(allocations[0].employee_id, "L1");
        assert_eq!(capacity.remaining("E1", 0), 1.0);
    }

    #[test]
    fn test_pass_two_never_exceeds_remaining_capacity() {
        let employees = vec![
            Employee::lead("L1", "Lead", 9000.0),
            Employee::new("E1", "Jane", 4000.0),
            Employee::new("E2", "Bob", 3200.0),
        ];
        let projects = vec![
            Project::new("P1", "A", 1, 6, 30000.0),
            Project::new("P2", "B", 3, 12, 50000.0),
            Project::new("P3", "C", 5, 8, 12000.0),
        ];
        let mut capacity = CapacityMatrix::new(&employees);

        let allocations = HeuristicAllocator::default()
            .allocate(&employees, &projects, &mut capacity)
            .unwrap();

        assert!(allocations.iter().all(|a| a.fraction > 0.0 && a.fraction <= 1.0));
        for employee in &employees {
            for month_idx in 0..12 {
                let total = fraction_sum(&allocations, &employee.employee_id, month_idx);
                assert!(total <= 1.0 + 1e-9, "{} month {}", employee.employee_id, month_idx);
                assert!(capacity.remaining(&employee.employee_id, month_idx) >= 0.0);
            }
        }
    }
}
