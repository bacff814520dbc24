// ==========================================
// 人力资源分配系统 - 项目领域模型
// ==========================================
// 红线: 起止月份 1-12 闭区间，start <= end，单一自然年
// 红线: 预算扣减（haircut）只生成新的调整后副本，不修改原记录
// ==========================================

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

// ==========================================
// Project - 项目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: String,   // 项目编号（唯一）
    pub name: String,         // 显示名称
    pub start_month: u32,     // 开始月份（1-12）
    pub end_month: u32,       // 结束月份（1-12，含）
    pub budget: f64,          // 名义预算

    // ===== 派生字段 =====
    pub adjusted_budget: f64, // 扣减后预算（运行时由引擎生成）
}

impl Project {
    /// 创建项目（调整后预算初始等于名义预算）
    pub fn new(
        project_id: impl Into<String>,
        name: impl Into<String>,
        start_month: u32,
        end_month: u32,
        budget: f64,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            name: name.into(),
            start_month,
            end_month,
            budget,
            adjusted_budget: budget,
        }
    }

    /// 按扣减百分比生成调整后副本
    ///
    /// adjusted_budget = budget × (1 − haircut_pct / 100)
    pub fn with_haircut(&self, haircut_pct: f64) -> Self {
        Self {
            adjusted_budget: self.budget * (1.0 - haircut_pct / 100.0),
            ..self.clone()
        }
    }

    /// 项目持续月数
    pub fn duration_months(&self) -> u32 {
        self.end_month.saturating_sub(self.start_month) + 1
    }

    /// 活跃月份的列索引区间（0-11）
    pub fn active_month_indices(&self) -> RangeInclusive<usize> {
        (self.start_month as usize).saturating_sub(1)..=(self.end_month as usize).saturating_sub(1)
    }

    /// 判断项目在某列索引月份是否活跃
    pub fn is_active_in(&self, month_idx: usize) -> bool {
        self.active_month_indices().contains(&month_idx)
    }
}
