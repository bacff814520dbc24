// ==========================================
// 人力资源分配系统 - 导入层
// ==========================================
// 职责: 外部数据导入，生成员工/项目主数据
// 支持: CSV
// ==========================================

pub mod data_source;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod validator;

// 重导出核心类型
pub use data_source::{CsvDataSource, DataSource};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, MonthValue, EMPLOYEE_COLUMNS, PROJECT_COLUMNS};
pub use file_parser::{CsvParser, RawRow};
pub use validator::ensure_unique_ids;
