// ==========================================
// 人力资源分配系统 - 报表导出
// ==========================================
// 格式: CSV（宽表，月份列）/ JSON（含汇总）
// 列: employee_id, employee_name, project_id, project_name, Jan..Dec, total_cost
// ==========================================

use crate::domain::MONTH_LABELS;
use crate::report::builder::{AllocationReport, ReportRow};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// ==========================================
// 导出错误
// ==========================================
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("无法写入文件 {path}: {source}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(#[from] csv::Error),

    #[error("JSON 序列化失败: {0}")]
    JsonWriteError(#[from] serde_json::Error),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// ReportSink - 报表输出端口
// ==========================================
pub trait ReportSink {
    fn write_report(&self, report: &AllocationReport) -> ExportResult<()>;
}

// ==========================================
// CsvReportWriter
// ==========================================
pub struct CsvReportWriter {
    path: PathBuf,
}

impl CsvReportWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn header() -> Vec<&'static str> {
        let mut header = vec!["employee_id", "employee_name", "project_id", "project_name"];
        header.extend(MONTH_LABELS.iter().copied());
        header.push("total_cost");
        header
    }

    /// 写入任意输出流（文件 / 内存）
    pub fn write_to<W: Write>(writer: W, report: &AllocationReport) -> ExportResult<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer.write_record(Self::header())?;
        for row in &report.rows {
            csv_writer.write_record(Self::record(row))?;
        }
        csv_writer.flush()?;
        Ok(())
    }

    fn record(row: &ReportRow) -> Vec<String> {
        let mut record = vec![
            row.employee_id.clone(),
            row.employee_name.clone(),
            row.project_id.clone(),
            row.project_name.clone(),
        ];
        record.extend(row.months.iter().map(|fte| format_number(*fte)));
        record.push(format_number(row.total_cost));
        record
    }
}

impl ReportSink for CsvReportWriter {
    fn write_report(&self, report: &AllocationReport) -> ExportResult<()> {
        let file = File::create(&self.path).map_err(|e| ExportError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })?;
        Self::write_to(BufWriter::new(file), report)?;
        info!(path = %self.path.display(), rows = report.rows.len(), "CSV 报表已导出");
        Ok(())
    }
}

// ==========================================
// JsonReportWriter
// ==========================================
#[derive(Serialize)]
struct JsonReport<'a> {
    months: &'a [&'a str],
    rows: &'a [ReportRow],
    project_totals: BTreeMap<String, f64>,
    grand_total: f64,
}

pub struct JsonReportWriter {
    path: PathBuf,
}

impl JsonReportWriter {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn to_json_string(report: &AllocationReport) -> ExportResult<String> {
        let body = JsonReport {
            months: &MONTH_LABELS,
            rows: &report.rows,
            project_totals: report.project_totals(),
            grand_total: report.grand_total(),
        };
        Ok(serde_json::to_string_pretty(&body)?)
    }
}

impl ReportSink for JsonReportWriter {
    fn write_report(&self, report: &AllocationReport) -> ExportResult<()> {
        let content = Self::to_json_string(report)?;
        std::fs::write(&self.path, content).map_err(|e| ExportError::FileWriteError {
            path: self.path.display().to_string(),
            source: e,
        })?;
        info!(path = %self.path.display(), rows = report.rows.len(), "JSON 报表已导出");
        Ok(())
    }
}

/// 去除浮点尾噪（保留 6 位小数后去掉多余的 0）
fn format_number(value: f64) -> String {
    let rounded = (value * 1e6).round() / 1e6;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.6}", rounded);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}
