// ==========================================
// 人力资源分配系统 - 数据源接口与 CSV 实现
// ==========================================
// 流程: 文件解析 → 字段映射 → 主键校验
// 红线: 任一行出错则整个文件导入失败，不返回部分数据
// ==========================================

use crate::domain::{Employee, Project};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::{FieldMapper, EMPLOYEE_COLUMNS, PROJECT_COLUMNS};
use crate::importer::file_parser::CsvParser;
use crate::importer::validator::ensure_unique_ids;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

// ==========================================
// DataSource Trait
// ==========================================
#[async_trait]
pub trait DataSource: Send + Sync {
    /// 加载员工（保持文件顺序）
    async fn load_employees(&self) -> ImportResult<Vec<Employee>>;

    /// 加载项目（保持文件顺序，adjusted_budget = budget）
    async fn load_projects(&self) -> ImportResult<Vec<Project>>;
}

// ==========================================
// CsvDataSource
// ==========================================
pub struct CsvDataSource {
    employees_path: PathBuf,
    projects_path: PathBuf,
    parser: CsvParser,
    mapper: FieldMapper,
}

impl CsvDataSource {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(employees_path: P, projects_path: Q) -> Self {
        Self {
            employees_path: employees_path.as_ref().to_path_buf(),
            projects_path: projects_path.as_ref().to_path_buf(),
            parser: CsvParser,
            mapper: FieldMapper,
        }
    }

    /// 同步读取员工文件
    pub fn read_employees(&self) -> ImportResult<Vec<Employee>> {
        // is_lead 列可省略
        let rows = self
            .parser
            .parse_to_raw_rows(&self.employees_path, &EMPLOYEE_COLUMNS[..3])?;

        let employees = rows
            .iter()
            .map(|row| self.mapper.map_employee(row))
            .collect::<ImportResult<Vec<_>>>()?;

        ensure_unique_ids(
            rows.iter()
                .zip(&employees)
                .map(|(row, e)| (row.row_number, e.employee_id.as_str())),
        )?;
        Ok(employees)
    }

    /// 同步读取项目文件
    pub fn read_projects(&self) -> ImportResult<Vec<Project>> {
        let rows = self
            .parser
            .parse_to_raw_rows(&self.projects_path, &PROJECT_COLUMNS)?;

        let projects = rows
            .iter()
            .map(|row| self.mapper.map_project(row))
            .collect::<ImportResult<Vec<_>>>()?;

        ensure_unique_ids(
            rows.iter()
                .zip(&projects)
                .map(|(row, p)| (row.row_number, p.project_id.as_str())),
        )?;
        Ok(projects)
    }
}

#[async_trait]
impl DataSource for CsvDataSource {
    #[instrument(skip(self), fields(path = %self.employees_path.display()))]
    async fn load_employees(&self) -> ImportResult<Vec<Employee>> {
        let employees = self.read_employees()?;
        info!(
            employees_count = employees.len(),
            leads_count = employees.iter().filter(|e| e.is_lead).count(),
            "员工数据导入完成"
        );
        Ok(employees)
    }

    #[instrument(skip(self), fields(path = %self.projects_path.display()))]
    async fn load_projects(&self) -> ImportResult<Vec<Project>> {
        let projects = self.read_projects()?;
        info!(
            projects_count = projects.len(),
            total_budget = projects.iter().map(|p| p.budget).sum::<f64>(),
            "项目数据导入完成"
        );
        Ok(projects)
    }
}
