// ==========================================
// 人力资源分配系统 - 领域类型定义
// ==========================================
// 职责: 月份索引、分配来源、复合键等基础类型
// 红线: 单一自然年视窗（12 个月），不支持跨年
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 一年的月份数（容量矩阵列数）
pub const MONTHS_PER_YEAR: usize = 12;

/// 月份列标签（报表列顺序）
pub const MONTH_LABELS: [&str; MONTHS_PER_YEAR] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// FTE 浮点比较容差（避免 0.2 连续扣减产生的尾差）
pub const FTE_EPSILON: f64 = 1e-9;

/// 将 1-12 的自然月转换为 0-11 的列索引
///
/// # 返回
/// - Some(idx): 月份合法
/// - None: 月份越界
pub fn month_to_index(month: u32) -> Option<usize> {
    if (1..=MONTHS_PER_YEAR as u32).contains(&month) {
        Some(month as usize - 1)
    } else {
        None
    }
}

/// 列索引对应的月份标签
pub fn month_label(month_idx: usize) -> &'static str {
    MONTH_LABELS.get(month_idx).copied().unwrap_or("???")
}

// ==========================================
// 分配来源 (Allocation Source)
// ==========================================
// 红线: 每条分配记录必须能说明由哪条规则产生
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllocationSource {
    LeadSeed,   // 第一轮：骨干预置
    BudgetFill, // 第二轮：预算内填充
    Backfill,   // 第三轮：满负荷兜底
    Optimal,    // 线性规划解
}

impl fmt::Display for AllocationSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationSource::LeadSeed => write!(f, "LEAD_SEED"),
            AllocationSource::BudgetFill => write!(f, "BUDGET_FILL"),
            AllocationSource::Backfill => write!(f, "BACKFILL"),
            AllocationSource::Optimal => write!(f, "OPTIMAL"),
        }
    }
}

// ==========================================
// AssignmentKey - (员工, 项目) 复合键
// ==========================================
// 用途: 报表合并、LP 指派变量索引
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssignmentKey {
    pub employee_id: String,
    pub project_id: String,
}

impl AssignmentKey {
    pub fn new(employee_id: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            employee_id: employee_id.into(),
            project_id: project_id.into(),
        }
    }
}

impl fmt::Display for AssignmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.employee_id, self.project_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_to_index_bounds() {
        assert_eq!(month_to_index(1), Some(0));
        assert_eq!(month_to_index(12), Some(11));
        assert_eq!(month_to_index(0), None);
        assert_eq!(month_to_index(13), None);
    }

    #[test]
    fn test_month_label() {
        assert_eq!(month_label(0), "Jan");
        assert_eq!(month_label(11), "Dec");
        assert_eq!(month_label(12), "???");
    }

    #[test]
    fn test_allocation_source_display() {
        assert_eq!(AllocationSource::LeadSeed.to_string(), "LEAD_SEED");
        assert_eq!(AllocationSource::Backfill.to_string(), "BACKFILL");
    }
}
