// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use resource_allocation::config::ConfigManager;
use resource_allocation::domain::{Employee, Project};
use resource_allocation::engine::{AllocationStrategy, RunParameters};
use std::path::{Path, PathBuf};

// ==========================================
// Employee 构建器
// ==========================================

pub struct EmployeeBuilder {
    employee_id: String,
    name: Option<String>,
    monthly_cost: f64,
    is_lead: bool,
}

impl EmployeeBuilder {
    pub fn new(employee_id: &str) -> Self {
        Self {
            employee_id: employee_id.to_string(),
            name: None,
            monthly_cost: 1000.0,
            is_lead: false,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn cost(mut self, monthly_cost: f64) -> Self {
        self.monthly_cost = monthly_cost;
        self
    }

    pub fn lead(mut self) -> Self {
        self.is_lead = true;
        self
    }

    pub fn build(self) -> Employee {
        Employee {
            name: self
                .name
                .unwrap_or_else(|| format!("Employee {}", self.employee_id)),
            employee_id: self.employee_id,
            monthly_cost: self.monthly_cost,
            is_lead: self.is_lead,
        }
    }
}

// ==========================================
// Project 构建器
// ==========================================

pub struct ProjectBuilder {
    project_id: String,
    start_month: u32,
    end_month: u32,
    budget: f64,
}

impl ProjectBuilder {
    pub fn new(project_id: &str) -> Self {
        Self {
            project_id: project_id.to_string(),
            start_month: 1,
            end_month: 12,
            budget: 12000.0,
        }
    }

    pub fn months(mut self, start_month: u32, end_month: u32) -> Self {
        self.start_month = start_month;
        self.end_month = end_month;
        self
    }

    pub fn budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn build(self) -> Project {
        let name = format!("Project {}", self.project_id);
        Project::new(
            self.project_id,
            name,
            self.start_month,
            self.end_month,
            self.budget,
        )
    }
}

// ==========================================
// 运行参数
// ==========================================

/// 不扣减预算的参数（便于精确断言成本）
pub fn no_haircut(strategy: AllocationStrategy) -> RunParameters {
    RunParameters {
        haircut_pct: 0.0,
        ..RunParameters::with_strategy(strategy)
    }
}

// ==========================================
// CSV 夹具
// ==========================================

pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("无法写入测试文件");
    path
}

pub const EMPLOYEES_CSV: &str = "\
employee_id,name,monthly_cost,is_lead
L1,John Doe,10000,true
E1,Jane Smith,8000,false
E2,Bob Stone,8000,false
";

pub const PROJECTS_CSV: &str = "\
project_id,name,start_month,end_month,budget
P1,Website Redesign,2024-01-01,2024-06-30,250000
P2,Mobile App,3,12,400000
";

/// 指向临时目录中 CSV 夹具的配置
pub fn config_for(dir: &Path) -> ConfigManager {
    let employees = write_file(dir, "employees.csv", EMPLOYEES_CSV);
    let projects = write_file(dir, "projects.csv", PROJECTS_CSV);
    let mut config = ConfigManager::default().without_env_override();
    config.set("employees_path", employees.display().to_string());
    config.set("projects_path", projects.display().to_string());
    config.set(
        "report_path",
        dir.join("allocation_report.csv").display().to_string(),
    );
    config
}
