// ==========================================
// 人力资源分配系统 - 核心库
// ==========================================
// 技术栈: Rust + tokio + good_lp(microlp)
// 系统定位: 预算容差约束下的月度 FTE 分配引擎
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 分配规则
pub mod engine;

// 报表层 - 合并与导出
pub mod report;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行参数
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Allocation, AllocationSource, AssignmentKey, CapacityError, CapacityMatrix, Employee,
    Project, FTE_EPSILON, MONTHS_PER_YEAR, MONTH_LABELS,
};

// 引擎
pub use engine::{
    AllocationEngine, AllocationError, AllocationResult, AllocationStrategy, BudgetLedger,
    BudgetScope, FullUtilizationBackfill, HeuristicAllocator, LpProblem, LpSolution, LpSolver,
    OptimalAllocator, RunNote, RunParameters, RunResult, RunWarning, SolveStatus, ToleranceBand,
};

#[cfg(feature = "microlp")]
pub use engine::MicroLpSolver;

// 报表
pub use report::{AllocationReport, CsvReportWriter, JsonReportWriter, ReportBuilder, ReportRow, ReportSink};

// 导入
pub use importer::{CsvDataSource, DataSource, ImportError};

// 配置
pub use config::{AllocationConfigReader, ConfigError, ConfigManager};

// ==========================================
// 版本信息
// ==========================================
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "人力资源分配系统";
