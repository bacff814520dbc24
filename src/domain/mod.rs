// ==========================================
// 人力资源分配系统 - 领域模型层
// ==========================================
// 职责: 定义员工、项目、分配记录、容量矩阵
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod allocation;
pub mod capacity;
pub mod employee;
pub mod project;
pub mod types;

// 重导出核心类型
pub use allocation::Allocation;
pub use capacity::{CapacityError, CapacityMatrix};
pub use employee::Employee;
pub use project::Project;
pub use types::{AllocationSource, AssignmentKey, FTE_EPSILON, MONTHS_PER_YEAR, MONTH_LABELS};
