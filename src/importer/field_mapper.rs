// ==========================================
// 人力资源分配系统 - 字段映射器
// ==========================================
// 职责: 原始行 → Employee / Project + 类型转换
// 月份列: 整数 1-12 或 YYYY-MM-DD（同一年内）
// ==========================================

use crate::domain::{Employee, Project};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::{Datelike, NaiveDate};

pub const EMPLOYEE_COLUMNS: [&str; 4] = ["employee_id", "name", "monthly_cost", "is_lead"];
pub const PROJECT_COLUMNS: [&str; 5] = ["project_id", "name", "start_month", "end_month", "budget"];

/// 月份字段解析结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthValue {
    pub month: u32,
    /// 仅当以日期给出时有年份
    pub year: Option<i32>,
}

pub struct FieldMapper;

impl FieldMapper {
    /// 映射员工行
    pub fn map_employee(&self, row: &RawRow) -> ImportResult<Employee> {
        let employee_id = self.require_string(row, "employee_id")?;
        let name = self.require_string(row, "name")?;
        let monthly_cost = self.parse_f64(row, "monthly_cost")?;
        if monthly_cost <= 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row.row_number,
                field: "monthly_cost".to_string(),
                value: monthly_cost,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }
        let is_lead = self.parse_bool(row, "is_lead")?;

        Ok(Employee {
            employee_id,
            name,
            monthly_cost,
            is_lead,
        })
    }

    /// 映射项目行
    pub fn map_project(&self, row: &RawRow) -> ImportResult<Project> {
        let project_id = self.require_string(row, "project_id")?;
        let name = self.require_string(row, "name")?;
        let start = self.parse_month(row, "start_month")?;
        let end = self.parse_month(row, "end_month")?;

        if let (Some(start_year), Some(end_year)) = (start.year, end.year) {
            if start_year != end_year {
                return Err(ImportError::InvalidPeriod {
                    row: row.row_number,
                    message: format!("起止日期跨年: {} → {}", start_year, end_year),
                });
            }
        }
        if start.month > end.month {
            return Err(ImportError::InvalidPeriod {
                row: row.row_number,
                message: format!("开始月份 {} 晚于结束月份 {}", start.month, end.month),
            });
        }

        let budget = self.parse_f64(row, "budget")?;
        if budget <= 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row.row_number,
                field: "budget".to_string(),
                value: budget,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            });
        }

        Ok(Project::new(project_id, name, start.month, end.month, budget))
    }

    fn require_string(&self, row: &RawRow, field: &str) -> ImportResult<String> {
        row.get(field)
            .map(str::to_string)
            .ok_or_else(|| ImportError::MissingField {
                row: row.row_number,
                field: field.to_string(),
            })
    }

    /// 解析浮点数（允许千分位逗号）
    fn parse_f64(&self, row: &RawRow, field: &str) -> ImportResult<f64> {
        let value = self.require_string(row, field)?;
        let parsed = value
            .replace(',', "")
            .parse::<f64>()
            .map_err(|_| ImportError::TypeConversionError {
                row: row.row_number,
                field: field.to_string(),
                message: format!("无法解析为数值: {}", value),
            })?;
        if !parsed.is_finite() {
            return Err(ImportError::TypeConversionError {
                row: row.row_number,
                field: field.to_string(),
                message: format!("数值非有限: {}", value),
            });
        }
        Ok(parsed)
    }

    /// 解析布尔值（空值视为 false）
    fn parse_bool(&self, row: &RawRow, field: &str) -> ImportResult<bool> {
        let Some(value) = row.get(field) else {
            return Ok(false);
        };
        match value.to_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Ok(true),
            "false" | "0" | "no" | "n" => Ok(false),
            _ => Err(ImportError::TypeConversionError {
                row: row.row_number,
                field: field.to_string(),
                message: format!("无法解析为布尔值: {}", value),
            }),
        }
    }

    /// 解析月份字段
    ///
    /// # 返回
    /// - 整数 1-12 → MonthValue { year: None }
    /// - YYYY-MM-DD → MonthValue { year: Some(..) }
    fn parse_month(&self, row: &RawRow, field: &str) -> ImportResult<MonthValue> {
        let value = self.require_string(row, field)?;

        if let Ok(month) = value.parse::<i64>() {
            if !(1..=12).contains(&month) {
                return Err(ImportError::ValueRangeError {
                    row: row.row_number,
                    field: field.to_string(),
                    value: month as f64,
                    min: 1.0,
                    max: 12.0,
                });
            }
            return Ok(MonthValue {
                month: month as u32,
                year: None,
            });
        }

        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .map(|date| MonthValue {
                month: date.month(),
                year: Some(date.year()),
            })
            .map_err(|_| ImportError::DateFormatError {
                row: row.row_number,
                field: field.to_string(),
                value,
            })
    }
}
