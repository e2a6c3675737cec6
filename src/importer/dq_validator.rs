// ==========================================
// LOB 排位填充系统 - 数据质量校验器实现
// ==========================================
// 职责: ETA 记录 DQ 校验（ERROR / WARNING / INFO）
// ERROR:   行键缺失、件数为负、每套件数缺失或 <= 0（按套模式）
// WARNING: 到货日期无法解析、供应商缺失
// INFO:    件数缺失或非数字（按 0 处理）、到货日期缺失
// ==========================================

use crate::domain::shipment::{DqViolation, RawShipmentRecord};
use crate::domain::types::DqLevel;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::importer_trait::{DataCleaner as _, DqValidator as DqValidatorTrait};

pub struct DqValidator {
    cleaner: DataCleaner,
}

impl DqValidator {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 违规记录构造辅助
fn violation(
    record: &RawShipmentRecord,
    level: DqLevel,
    field: &str,
    message: String,
) -> DqViolation {
    DqViolation {
        row_number: record.row_number,
        stockcode: record.stockcode.clone(),
        level,
        field: field.to_string(),
        message,
    }
}

impl DqValidatorTrait for DqValidator {
    fn validate_record(&self, record: &RawShipmentRecord, shipset_mode: bool) -> Vec<DqViolation> {
        let mut violations = Vec::new();

        // 行键
        if record.stockcode.is_none() {
            violations.push(violation(
                record,
                DqLevel::Error,
                "stockcode",
                "行键缺失".to_string(),
            ));
        }

        // 供应商
        if record.supplier.is_none() {
            violations.push(violation(
                record,
                DqLevel::Warning,
                "supplier",
                "供应商缺失，标记将没有供应商前缀".to_string(),
            ));
        }

        // 件数
        match record.quantity.as_deref() {
            None => violations.push(violation(
                record,
                DqLevel::Info,
                "quantity",
                "件数缺失，按 0 处理".to_string(),
            )),
            Some(raw) => match self.cleaner.parse_quantity(raw) {
                None => violations.push(violation(
                    record,
                    DqLevel::Info,
                    "quantity",
                    format!("件数非数字: {}，按 0 处理", raw),
                )),
                Some(q) if q < 0 => violations.push(violation(
                    record,
                    DqLevel::Error,
                    "quantity",
                    format!("件数为负数: {}", q),
                )),
                Some(_) => {}
            },
        }

        // 每套件数（仅按套模式）
        if shipset_mode {
            match record.qty_per_shipset.as_deref() {
                None => violations.push(violation(
                    record,
                    DqLevel::Error,
                    "qty_per_shipset",
                    "每套件数缺失".to_string(),
                )),
                Some(raw) => match self.cleaner.parse_real(raw) {
                    None => violations.push(violation(
                        record,
                        DqLevel::Error,
                        "qty_per_shipset",
                        format!("每套件数非数字: {}", raw),
                    )),
                    Some(ppu) if ppu <= 0.0 => violations.push(violation(
                        record,
                        DqLevel::Error,
                        "qty_per_shipset",
                        format!("每套件数 <= 0: {}", ppu),
                    )),
                    Some(_) => {}
                },
            }
        }

        // 到货日期
        match record.eta.as_deref() {
            None => violations.push(violation(
                record,
                DqLevel::Info,
                "eta",
                "到货日期缺失，排在同行最后".to_string(),
            )),
            Some(raw) => {
                if self.cleaner.parse_date(raw).is_none() {
                    violations.push(violation(
                        record,
                        DqLevel::Warning,
                        "eta",
                        format!("到货日期无法解析: {}，排在同行最后", raw),
                    ));
                }
            }
        }

        violations
    }
}
