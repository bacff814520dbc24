// ==========================================
// 人力资源分配系统 - CSV 文件解析器
// ==========================================
// 阶段 0: 文件读取与解析 → 原始行（列名 → 文本）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// 原始行：列名 → 去空白文本
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

impl RawRow {
    /// 取非空字段
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .get(column)
            .map(|v| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

// ==========================================
// CsvParser
// ==========================================
pub struct CsvParser;

impl CsvParser {
    /// 解析 CSV 文件
    ///
    /// # 参数
    /// - file_path: 文件路径（扩展名必须为 .csv）
    /// - required_columns: 表头中必须存在的列
    pub fn parse_to_raw_rows(
        &self,
        file_path: &Path,
        required_columns: &[&str],
    ) -> ImportResult<Vec<RawRow>> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .trim(csv::Trim::All)
            .from_reader(file);

        // 读取表头（去掉 UTF-8 BOM）
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        for column in required_columns {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn {
                    file: path.display().to_string(),
                    column: column.to_string(),
                });
            }
        }

        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(idx + 2);

            let fields: HashMap<String, String> = headers
                .iter()
                .zip(record.iter())
                .map(|(h, v)| (h.clone(), v.trim().to_string()))
                .collect();

            // 跳过完全空白的行
            if fields.values().all(|v| v.is_empty()) {
                continue;
            }

            rows.push(RawRow { row_number, fields });
        }

        Ok(rows)
    }
}
