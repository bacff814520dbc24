// ==========================================
// 人力资源分配系统 - 员工领域模型
// ==========================================
// 红线: 单次分配运行内只读
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Employee - 员工
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: String, // 员工编号（唯一）
    pub name: String,        // 显示名称
    pub monthly_cost: f64,   // 月成本（> 0）
    #[serde(default)]
    pub is_lead: bool,       // 骨干标记
}

impl Employee {
    /// 创建普通员工
    pub fn new(employee_id: impl Into<String>, name: impl Into<String>, monthly_cost: f64) -> Self {
        Self {
            employee_id: employee_id.into(),
            name: name.into(),
            monthly_cost,
            is_lead: false,
        }
    }

    /// 创建骨干员工
    pub fn lead(employee_id: impl Into<String>, name: impl Into<String>, monthly_cost: f64) -> Self {
        Self {
            is_lead: true,
            ..Self::new(employee_id, name, monthly_cost)
        }
    }

    /// 给定 FTE 比例对应的成本
    pub fn cost_of(&self, fraction: f64) -> f64 {
        fraction * self.monthly_cost
    }
}
