// ==========================================
// LOB 排位填充系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入各阶段接口（不包含实现）
// 阶段: 解析 → 映射 → 清洗 → 校验
// ==========================================

use crate::domain::shipment::{DqViolation, RawShipmentRecord};
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawSheet;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// FileParser Trait
// ==========================================
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为表头 + 数据行
    ///
    /// # 参数
    /// - file_path: 文件路径
    ///
    /// # 返回
    /// - Ok(RawSheet): 表头已 trim，完全空白的行已跳过
    /// - Err: 文件不存在、格式不支持、解析失败
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 检查映射列是否都存在于表头
    fn check_headers(&self, headers: &[String]) -> ImportResult<()>;

    /// 将原始行记录映射为 RawShipmentRecord
    ///
    /// # 参数
    /// - row: 原始行记录（HashMap<列名, 值>）
    /// - row_number: 行号（用于 DQ 报告）
    fn map_to_raw_shipment(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawShipmentRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 实现者: DataCleaner
pub trait DataCleaner: Send + Sync {
    /// TRIM
    fn clean_text(&self, value: &str) -> String;

    /// 件数解析（非数字返回 None，小数截断取整）
    fn parse_quantity(&self, value: &str) -> Option<i64>;

    /// 实数解析（非数字/非有限返回 None）
    fn parse_real(&self, value: &str) -> Option<f64>;

    /// 日期解析（支持多种格式，失败返回 None）
    fn parse_date(&self, value: &str) -> Option<NaiveDate>;
}

// ==========================================
// DqValidator Trait
// ==========================================
// 实现者: DqValidator
pub trait DqValidator: Send + Sync {
    /// 校验单条记录
    ///
    /// # 参数
    /// - record: 映射后的原始记录
    /// - shipset_mode: 是否要求 Qty/SS
    fn validate_record(&self, record: &RawShipmentRecord, shipset_mode: bool) -> Vec<DqViolation>;
}
