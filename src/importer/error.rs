// ==========================================
// 人力资源分配系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 行号: 文件物理行号（表头为第 1 行）
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少必需列 {column}（文件 {file}）")]
    MissingColumn { file: String, column: String },

    // ===== 数据映射错误 =====
    #[error("字段缺失 (行 {row}, 字段 {field})")]
    MissingField { row: usize, field: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    #[error("日期格式错误 (行 {row}, 字段 {field}): 期望 1-12 或 YYYY-MM-DD，实际 {value}")]
    DateFormatError {
        row: usize,
        field: String,
        value: String,
    },

    // ===== 数据质量错误 =====
    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 超出范围 [{min}, {max}]")]
    ValueRangeError {
        row: usize,
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("主键重复 (行 {row}): {id} 已在第 {first_row} 行出现")]
    DuplicateId {
        row: usize,
        id: String,
        first_row: usize,
    },

    #[error("项目周期错误 (行 {row}): {message}")]
    InvalidPeriod { row: usize, message: String },
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl ImportError {
    /// 出错的行号（文件级错误返回 None）
    pub fn row(&self) -> Option<usize> {
        match self {
            ImportError::MissingField { row, .. }
            | ImportError::TypeConversionError { row, .. }
            | ImportError::DateFormatError { row, .. }
            | ImportError::ValueRangeError { row, .. }
            | ImportError::DuplicateId { row, .. }
            | ImportError::InvalidPeriod { row, .. } => Some(*row),
            _ => None,
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
