// ==========================================
// LOB 排位填充系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::capacity::TableError;
use crate::domain::shipment::DqViolation;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("缺少映射列: {column}（可用列: {available}）")]
    MissingColumn { column: String, available: String },

    #[error("表格为空: {0}")]
    EmptySheet(String),

    // ===== 数据质量错误 =====
    /// samples 最多保留前 10 条 ERROR 级违规
    #[error("数据质量校验未通过: {blocked} 行存在错误，请修正后重新导入")]
    BlockedByDataQuality {
        blocked: usize,
        samples: Vec<DqViolation>,
    },

    // ===== 表结构错误 =====
    #[error("LOB 表结构错误: {0}")]
    Table(#[from] TableError),
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

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
