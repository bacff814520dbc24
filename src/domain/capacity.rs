// ==========================================
// 人力资源分配系统 - 容量矩阵领域模型
// ==========================================
// 红线: 剩余可用量只减不增，且永不为负
// 用途: "员工 E 在月份 M 还能承担多少 FTE" 的唯一事实来源
// ==========================================

use crate::domain::employee::Employee;
use crate::domain::types::{FTE_EPSILON, MONTHS_PER_YEAR};
use std::collections::HashMap;
use thiserror::Error;

/// 容量矩阵错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CapacityError {
    #[error("容量不足: employee={employee_id}, month_idx={month_idx}, requested={requested}, remaining={remaining}")]
    InsufficientCapacity {
        employee_id: String,
        month_idx: usize,
        requested: f64,
        remaining: f64,
    },

    #[error("员工不在容量矩阵中: {0}")]
    UnknownEmployee(String),

    #[error("月份索引越界: {0}")]
    MonthOutOfRange(usize),
}

// ==========================================
// CapacityMatrix - 容量矩阵
// ==========================================
// 行: 员工（保持加载顺序）; 列: 12 个月
#[derive(Debug, Clone)]
pub struct CapacityMatrix {
    order: Vec<String>,
    index: HashMap<String, usize>,
    cells: Vec<[f64; MONTHS_PER_YEAR]>,
}

impl CapacityMatrix {
    /// 为员工列表创建全新矩阵（每格 1.0）
    pub fn new(employees: &[Employee]) -> Self {
        let mut order = Vec::with_capacity(employees.len());
        let mut index = HashMap::with_capacity(employees.len());
        for employee in employees {
            if !index.contains_key(&employee.employee_id) {
                index.insert(employee.employee_id.clone(), order.len());
                order.push(employee.employee_id.clone());
            }
        }
        let cells = vec![[1.0; MONTHS_PER_YEAR]; order.len()];
        Self { order, index, cells }
    }

    /// 剩余可用量（未知员工或越界月份视为 0）
    pub fn remaining(&self, employee_id: &str, month_idx: usize) -> f64 {
        self.index
            .get(employee_id)
            .and_then(|&row| self.cells[row].get(month_idx).copied())
            .unwrap_or(0.0)
    }

    /// 已分配量（1 − 剩余）
    pub fn allocated(&self, employee_id: &str, month_idx: usize) -> f64 {
        1.0 - self.remaining(employee_id, month_idx)
    }

    /// 扣减容量
    ///
    /// # 参数
    /// - `amount`: 扣减的 FTE 比例
    ///
    /// # 返回
    /// - Ok(剩余量)
    /// - Err(InsufficientCapacity): amount 超过剩余量（超出浮点容差）
    pub fn consume(
        &mut self,
        employee_id: &str,
        month_idx: usize,
        amount: f64,
    ) -> Result<f64, CapacityError> {
        let cell = self.cell_mut(employee_id, month_idx)?;
        if amount > *cell + FTE_EPSILON {
            return Err(CapacityError::InsufficientCapacity {
                employee_id: employee_id.to_string(),
                month_idx,
                requested: amount,
                remaining: *cell,
            });
        }
        // 尾差截断到 0，保证非负
        let left = *cell - amount;
        *cell = if left < FTE_EPSILON { 0.0 } else { left };
        Ok(*cell)
    }

    /// 取走全部剩余容量（满负荷兜底使用）
    pub fn drain(&mut self, employee_id: &str, month_idx: usize) -> Result<f64, CapacityError> {
        let cell = self.cell_mut(employee_id, month_idx)?;
        let taken = *cell;
        *cell = 0.0;
        Ok(taken)
    }

    /// 仍有剩余容量的 (员工, 月份) 单元，按员工加载顺序 × 月份顺序
    pub fn open_cells(&self) -> Vec<(String, usize, f64)> {
        self.order
            .iter()
            .zip(self.cells.iter())
            .flat_map(|(employee_id, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, remaining)| **remaining > FTE_EPSILON)
                    .map(move |(month_idx, remaining)| (employee_id.clone(), month_idx, *remaining))
            })
            .collect()
    }

    /// 矩阵中的员工数
    pub fn employee_count(&self) -> usize {
        self.order.len()
    }

    fn cell_mut(&mut self, employee_id: &str, month_idx: usize) -> Result<&mut f64, CapacityError> {
        if month_idx >= MONTHS_PER_YEAR {
            return Err(CapacityError::MonthOutOfRange(month_idx));
        }
        let row = *self
            .index
            .get(employee_id)
            .ok_or_else(|| CapacityError::UnknownEmployee(employee_id.to_string()))?;
        Ok(&mut self.cells[row][month_idx])
    }
}
