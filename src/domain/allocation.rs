// ==========================================
// 人力资源分配系统 - 分配记录领域模型
// ==========================================
// 红线: 分配记录只追加，创建后不修改
// 说明: 同一 (员工, 月份) 可出现多条记录指向不同项目
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::AllocationSource;
use serde::{Deserialize, Serialize};

// ==========================================
// Allocation - 分配记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    pub employee_id: String,
    pub project_id: String,
    pub month_idx: usize,         // 0-11
    pub fraction: f64,            // (0, 1]
    pub cost: f64,                // fraction × monthly_cost
    pub source: AllocationSource, // 产生该记录的规则
}

impl Allocation {
    /// 按员工月成本生成分配记录
    pub fn new(
        employee: &Employee,
        project_id: &str,
        month_idx: usize,
        fraction: f64,
        source: AllocationSource,
    ) -> Self {
        Self {
            employee_id: employee.employee_id.clone(),
            project_id: project_id.to_string(),
            month_idx,
            fraction,
            cost: employee.cost_of(fraction),
            source,
        }
    }
}
