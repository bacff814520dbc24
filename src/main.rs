// ==========================================
// 人力资源分配系统 - 命令行入口
// ==========================================
// 流程: 配置 → 导入 → 分配 → 报表 → 导出
// 用法: resource-allocation [config.json]
// ==========================================

use anyhow::{Context, Result};
use resource_allocation::config::{AllocationConfigReader, ConfigManager};
use resource_allocation::importer::{CsvDataSource, DataSource};
use resource_allocation::report::{CsvReportWriter, JsonReportWriter, ReportBuilder, ReportSink};
use resource_allocation::{logging, AllocationEngine};
use std::path::PathBuf;

/// 配置文件路径环境变量
const CONFIG_PATH_ENV: &str = "RESOURCE_ALLOCATION_CONFIG";

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", resource_allocation::APP_NAME);
    tracing::info!("系统版本: {}", resource_allocation::VERSION);
    tracing::info!("==================================================");

    // ==========================================
    // 配置
    // ==========================================
    let config = match config_path() {
        Some(path) => ConfigManager::load_or_default(&path)
            .with_context(|| format!("无法加载配置 {}", path.display()))?,
        None => ConfigManager::default(),
    };
    let params = config.load_run_parameters().await.context("运行参数无效")?;
    tracing::info!(strategy = %params.strategy, haircut_pct = params.haircut_pct, "运行参数已加载");

    // ==========================================
    // 导入
    // ==========================================
    let source = CsvDataSource::new(config.get_employees_path(), config.get_projects_path());
    let employees = source.load_employees().await.context("员工数据导入失败")?;
    let projects = source.load_projects().await.context("项目数据导入失败")?;

    // ==========================================
    // 分配
    // ==========================================
    let engine = build_engine();
    let result = engine
        .run(&employees, &projects, &params)
        .await
        .context("分配运行失败")?;

    for note in &result.notes {
        tracing::info!("{}", note);
    }
    for warning in &result.warnings {
        tracing::warn!("{}", warning);
    }

    // ==========================================
    // 报表导出
    // ==========================================
    let report = ReportBuilder::new(&employees, &result.projects).build(&result.allocations);
    let report_path = config.get_report_path();
    let sink: Box<dyn ReportSink> = match report_path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => {
            Box::new(JsonReportWriter::new(&report_path))
        }
        _ => Box::new(CsvReportWriter::new(&report_path)),
    };
    sink.write_report(&report)
        .with_context(|| format!("报表导出失败 {}", report_path.display()))?;

    tracing::info!(
        run_id = %result.run_id,
        rows = report.rows.len(),
        grand_total = report.grand_total(),
        warnings = result.warnings.len(),
        path = %report_path.display(),
        "分配完成"
    );
    Ok(())
}

/// 配置文件路径：命令行参数 > 环境变量 > 默认位置
fn config_path() -> Option<PathBuf> {
    std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .or_else(|| std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from))
        .or_else(ConfigManager::default_path)
}

#[cfg(feature = "microlp")]
fn build_engine() -> AllocationEngine {
    AllocationEngine::with_microlp()
}

#[cfg(not(feature = "microlp"))]
fn build_engine() -> AllocationEngine {
    AllocationEngine::heuristic_only()
}
