// ==========================================
// CSV 导入 → 分配 → 报表导出 集成测试
// ==========================================
// 测试目标: 配置驱动的完整流程
// 覆盖范围: 日期/整数月份列、行号报错、CSV/JSON 导出
// ==========================================

mod helpers;

use helpers::test_data_builder::{config_for, write_file};
use resource_allocation::config::AllocationConfigReader;
use resource_allocation::engine::AllocationEngine;
use resource_allocation::importer::{CsvDataSource, DataSource, ImportError};
use resource_allocation::report::{CsvReportWriter, JsonReportWriter, ReportBuilder, ReportSink};

#[tokio::test]
async fn test_full_pipeline_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let params = config.load_run_parameters().await.unwrap();

    let source = CsvDataSource::new(config.get_employees_path(), config.get_projects_path());
    let employees = source.load_employees().await.unwrap();
    let projects = source.load_projects().await.unwrap();
    assert_eq!(employees.len(), 3);
    assert!(employees[0].is_lead);
    assert_eq!((projects[0].start_month, projects[0].end_month), (1, 6));
    assert_eq!((projects[1].start_month, projects[1].end_month), (3, 12));

    let result = AllocationEngine::heuristic_only()
        .run(&employees, &projects, &params)
        .await
        .unwrap();
    let report = ReportBuilder::new(&employees, &result.projects).build(&result.allocations);

    let report_path = config.get_report_path();
    CsvReportWriter::new(&report_path)
        .write_report(&report)
        .unwrap();

    let mut reader = csv::Reader::from_path(&report_path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.len(), 17);
    assert_eq!(&headers[4], "Jan");
    assert_eq!(&headers[16], "total_cost");

    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), report.rows.len());
    // 第一行来自第一条分配：骨干在较短项目 P1 的预置
    assert_eq!(&records[0][0], "L1");
    assert_eq!(&records[0][1], "John Doe");
    assert_eq!(&records[0][2], "P1");

    let total: f64 = records.iter().map(|r| r[16].parse::<f64>().unwrap()).sum();
    assert!((total - report.grand_total()).abs() < 1e-3);
}

#[tokio::test]
async fn test_json_export() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let source = CsvDataSource::new(config.get_employees_path(), config.get_projects_path());
    let employees = source.load_employees().await.unwrap();
    let projects = source.load_projects().await.unwrap();

    let result = AllocationEngine::heuristic_only()
        .run(&employees, &projects, &config.load_run_parameters().await.unwrap())
        .await
        .unwrap();
    let report = ReportBuilder::new(&employees, &result.projects).build(&result.allocations);

    let path = dir.path().join("report.json");
    JsonReportWriter::new(&path).write_report(&report).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["rows"].as_array().unwrap().len(), report.rows.len());
    assert!(value["project_totals"]["P2"].as_f64().unwrap() > 0.0);
}

#[tokio::test]
async fn test_duplicate_employee_id_reports_rows() {
    let dir = tempfile::tempdir().unwrap();
    let employees = write_file(
        dir.path(),
        "employees.csv",
        "employee_id,name,monthly_cost,is_lead\nE1,Jane,8000,false\nE2,Bob,8000,false\nE1,Janet,9000,true\n",
    );
    let projects = write_file(dir.path(), "projects.csv", helpers::test_data_builder::PROJECTS_CSV);

    let err = CsvDataSource::new(&employees, &projects)
        .load_employees()
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ImportError::DuplicateId { row: 4, first_row: 2, ref id } if id == "E1"
    ));
}

#[tokio::test]
async fn test_invalid_project_row_fails_whole_file() {
    let dir = tempfile::tempdir().unwrap();
    let employees = write_file(dir.path(), "employees.csv", helpers::test_data_builder::EMPLOYEES_CSV);
    let projects = write_file(
        dir.path(),
        "projects.csv",
        "project_id,name,start_month,end_month,budget\nP1,Ok,1,6,1000\nP2,Bad,2024-05-01,2024-13-01,1000\n",
    );

    let err = CsvDataSource::new(&employees, &projects)
        .load_projects()
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::DateFormatError { row: 3, .. }));
    assert_eq!(err.row(), Some(3));
}

#[tokio::test]
async fn test_missing_input_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = CsvDataSource::new(dir.path().join("none.csv"), dir.path().join("none.csv"))
        .load_employees()
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}
