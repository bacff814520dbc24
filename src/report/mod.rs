// ==========================================
// 人力资源分配系统 - 报表层
// ==========================================
// 职责: 将分配记录合并为员工×项目宽表，并导出
// ==========================================

pub mod builder;
pub mod export;

pub use builder::{AllocationReport, ReportBuilder, ReportRow};
pub use export::{CsvReportWriter, ExportError, ExportResult, JsonReportWriter, ReportSink};
