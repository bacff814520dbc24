// ==========================================
// 人力资源分配系统 - 分配报表构建
// ==========================================
// 输入: 分配记录列表（按记录顺序）
// 输出: 每个 (员工, 项目) 一行，12 个月份列 + 总成本
// 红线: 行顺序 = 该组合在分配列表中首次出现的顺序
// 红线: 无隐藏状态，同一输入多次构建结果一致
// ==========================================

use crate::domain::{Allocation, AssignmentKey, Employee, Project, MONTHS_PER_YEAR, MONTH_LABELS};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

// ==========================================
// ReportRow - 报表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub employee_id: String,
    pub employee_name: String,
    pub project_id: String,
    pub project_name: String,
    /// 每月 FTE；同一 (员工, 项目, 月份) 的多条记录累加
    pub months: [f64; MONTHS_PER_YEAR],
    pub total_cost: f64,
}

impl ReportRow {
    /// 全年 FTE 月合计
    pub fn total_fte_months(&self) -> f64 {
        self.months.iter().sum()
    }
}

// ==========================================
// AllocationReport - 合并报表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub rows: Vec<ReportRow>,
}

impl AllocationReport {
    pub fn month_labels() -> &'static [&'static str; MONTHS_PER_YEAR] {
        &MONTH_LABELS
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 各项目总成本（按项目编号排序）
    pub fn project_totals(&self) -> BTreeMap<String, f64> {
        let mut totals = BTreeMap::new();
        for row in &self.rows {
            *totals.entry(row.project_id.clone()).or_insert(0.0) += row.total_cost;
        }
        totals
    }

    /// 总成本
    pub fn grand_total(&self) -> f64 {
        self.rows.iter().map(|r| r.total_cost).sum()
    }

    pub fn find(&self, employee_id: &str, project_id: &str) -> Option<&ReportRow> {
        self.rows
            .iter()
            .find(|r| r.employee_id == employee_id && r.project_id == project_id)
    }
}

// ==========================================
// ReportBuilder - 报表构建器
// ==========================================
pub struct ReportBuilder<'a> {
    employee_names: HashMap<&'a str, &'a str>,
    project_names: HashMap<&'a str, &'a str>,
}

impl<'a> ReportBuilder<'a> {
    /// 以员工/项目主数据提供显示名称
    pub fn new(employees: &'a [Employee], projects: &'a [Project]) -> Self {
        Self {
            employee_names: employees
                .iter()
                .map(|e| (e.employee_id.as_str(), e.name.as_str()))
                .collect(),
            project_names: projects
                .iter()
                .map(|p| (p.project_id.as_str(), p.name.as_str()))
                .collect(),
        }
    }

    /// 合并分配记录
    ///
    /// 同一 (员工, 项目, 月份) 的多条记录（骨干预置 + 兜底）在单元格中累加。
    pub fn build(&self, allocations: &[Allocation]) -> AllocationReport {
        let mut rows: Vec<ReportRow> = Vec::new();
        let mut positions: HashMap<AssignmentKey, usize> = HashMap::new();

        for allocation in allocations {
            let key = AssignmentKey::new(&allocation.employee_id, &allocation.project_id);
            let position = *positions.entry(key).or_insert_with(|| {
                rows.push(self.empty_row(allocation));
                rows.len() - 1
            });

            let row = &mut rows[position];
            if let Some(cell) = row.months.get_mut(allocation.month_idx) {
                *cell += allocation.fraction;
            }
            row.total_cost += allocation.cost;
        }

        AllocationReport { rows }
    }

    fn empty_row(&self, allocation: &Allocation) -> ReportRow {
        let employee_name = self
            .employee_names
            .get(allocation.employee_id.as_str())
            .copied()
            .unwrap_or(allocation.employee_id.as_str());
        let project_name = self
            .project_names
            .get(allocation.project_id.as_str())
            .copied()
            .unwrap_or(allocation.project_id.as_str());

        ReportRow {
            employee_id: allocation.employee_id.clone(),
            employee_name: employee_name.to_string(),
            project_id: allocation.project_id.clone(),
            project_name: project_name.to_string(),
            months: [0.0; MONTHS_PER_YEAR],
            total_cost: 0.0,
        }
    }
}
