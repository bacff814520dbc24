// ==========================================
// 人力资源分配系统 - 满负荷兜底
// ==========================================
// 红线: 有活跃项目的 (员工, 月份) 必须分配满 1.0 FTE
// 红线: 兜底不看预算，超预算只告警不纠正
// ==========================================
// 职责: 第三轮，把剩余容量整块交给该月第一个活跃项目（按加载顺序）
// 输出: Backfill 分配记录 + 无活跃项目月份的提示
// ==========================================

use crate::domain::{Allocation, AllocationSource, CapacityMatrix, Employee, Project};
use crate::engine::error::AllocationResult;
use crate::engine::outcome::RunNote;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

// ==========================================
// FullUtilizationBackfill - 满负荷兜底
// ==========================================
pub struct FullUtilizationBackfill;

impl FullUtilizationBackfill {
    pub fn new() -> Self {
        Self
    }

    /// 执行兜底
    ///
    /// # 参数
    /// - `employees`: 员工列表（提供月成本）
    /// - `projects`: 项目列表（加载顺序即候选顺序）
    /// - `capacity`: 容量矩阵（会被修改）
    /// - `allocations`: 已有分配（追加写入）
    ///
    /// # 返回
    /// 无活跃项目而无法分配的 (员工, 月份) 提示
    #[instrument(skip_all, fields(open_cells = capacity.open_cells().len()))]
    pub fn fill(
        &self,
        employees: &[Employee],
        projects: &[Project],
        capacity: &mut CapacityMatrix,
        allocations: &mut Vec<Allocation>,
    ) -> AllocationResult<Vec<RunNote>> {
        let by_id: HashMap<&str, &Employee> = employees
            .iter()
            .map(|e| (e.employee_id.as_str(), e))
            .collect();

        let mut notes = Vec::new();
        let mut backfilled = 0usize;

        for (employee_id, month_idx, _) in capacity.open_cells() {
            let Some(employee) = by_id.get(employee_id.as_str()) else {
                continue;
            };

            match projects.iter().find(|p| p.is_active_in(month_idx)) {
                Some(project) => {
                    let taken = capacity.drain(&employee_id, month_idx)?;
                    allocations.push(Allocation::new(
                        employee,
                        &project.project_id,
                        month_idx,
                        taken,
                        AllocationSource::Backfill,
                    ));
                    backfilled += 1;
                    debug!(
                        employee_id = %employee_id,
                        project_id = %project.project_id,
                        month_idx,
                        fraction = taken,
                        "满负荷兜底"
                    );
                }
                None => notes.push(RunNote::UnallocatableEmployeeMonth {
                    employee_id: employee_id.clone(),
                    month_idx,
                    unallocated: capacity.remaining(&employee_id, month_idx),
                }),
            }
        }

        info!(
            backfilled_count = backfilled,
            unallocatable_count = notes.len(),
            "第三轮满负荷兜底完成"
        );
        Ok(notes)
    }

    /// 只收集无活跃项目的提示，不做任何分配（optimal 策略使用）
    pub fn unallocatable_notes(projects: &[Project], capacity: &CapacityMatrix) -> Vec<RunNote> {
        capacity
            .open_cells()
            .into_iter()
            .filter(|(_, month_idx, _)| !projects.iter().any(|p| p.is_active_in(*month_idx)))
            .map(|(employee_id, month_idx, unallocated)| RunNote::UnallocatableEmployeeMonth {
                employee_id,
                month_idx,
                unallocated,
            })
            .collect()
    }
}

impl Default for FullUtilizationBackfill {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MONTHS_PER_YEAR;

    #[test]
    fn test_backfill_goes_to_first_active_project_in_load_order() {
        let employees = vec![Employee::new("E1", "Jane", 1000.0)];
        // P2 加载顺序在前，虽然 P1 持续更短
        let projects = vec![
            Project::new("P2", "Long", 1, 12, 10.0),
            Project::new("P1", "Short", 1, 1, 10.0),
        ];
        let mut capacity = CapacityMatrix::new(&employees);
        capacity.consume("E1", 0, 0.25).unwrap();
        let mut allocations = Vec::new();

        let notes = FullUtilizationBackfill::new()
            .fill(&employees, &projects, &mut capacity, &mut allocations)
            .unwrap();

        assert!(notes.is_empty());
        assert_eq!(allocations.len(), MONTHS_PER_YEAR);
        assert!(allocations.iter().all(|a| a.project_id == "P2"));
        assert!((allocations[0].fraction - 0.75).abs() < 1e-12);
        assert!(capacity.open_cells().is_empty());
    }

    #[test]
    fn test_gap_month_is_a_note_not_an_allocation() {
        let employees = vec![Employee::new("E1", "Jane", 1000.0)];
        let projects = vec![
            Project::new("P1", "H1", 1, 6, 10.0),
            Project::new("P2", "H2", 8, 12, 10.0),
        ];
        let mut capacity = CapacityMatrix::new(&employees);
        let mut allocations = Vec::new();

        let notes = FullUtilizationBackfill::new()
            .fill(&employees, &projects, &mut capacity, &mut allocations)
            .unwrap();

        assert_eq!(allocations.len(), 11);
        assert!(!allocations.iter().any(|a| a.month_idx == 6));
        assert_eq!(
            notes,
            vec![RunNote::UnallocatableEmployeeMonth {
                employee_id: "E1".to_string(),
                month_idx: 6,
                unallocated: 1.0,
            }]
        );
    }

    #[test]
    fn test_unallocatable_notes_only_reports_inactive_months() {
        let employees = vec![Employee::new("E1", "Jane", 1000.0)];
        let projects = vec![Project::new("P1", "Q1", 1, 3, 10.0)];
        let capacity = CapacityMatrix::new(&employees);

        let notes = FullUtilizationBackfill::unallocatable_notes(&projects, &capacity);
        assert_eq!(notes.len(), 9);
    }
}
