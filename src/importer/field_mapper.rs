// ==========================================
// LOB 排位填充系统 - 字段映射器实现
// ==========================================
// 职责: 源列名 → RawShipmentRecord 字段映射
// 列名来自 ColumnMapping（可配置），不做类型转换
// ==========================================

use crate::config::ColumnMapping;
use crate::domain::shipment::RawShipmentRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;

pub struct FieldMapper {
    columns: ColumnMapping,
}

impl FieldMapper {
    pub fn new(columns: ColumnMapping) -> Self {
        Self { columns }
    }

    pub fn columns(&self) -> &ColumnMapping {
        &self.columns
    }

    /// 提取字符串字段（空白视为缺失）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        row.get(key).and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new(ColumnMapping::default())
    }
}

impl FieldMapperTrait for FieldMapper {
    fn check_headers(&self, headers: &[String]) -> ImportResult<()> {
        for column in self.columns.required_columns() {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn {
                    column: column.to_string(),
                    available: headers.join(", "),
                });
            }
        }
        Ok(())
    }

    fn map_to_raw_shipment(
        &self,
        row: &HashMap<String, String>,
        row_number: usize,
    ) -> RawShipmentRecord {
        RawShipmentRecord {
            stockcode: self.get_string(row, &self.columns.stockcode),
            supplier: self.get_string(row, &self.columns.supplier),
            quantity: self.get_string(row, &self.columns.quantity),
            eta: self.get_string(row, &self.columns.eta),
            qty_per_shipset: self
                .columns
                .qty_per_shipset
                .as_deref()
                .and_then(|col| self.get_string(row, col)),
            row_number,
        }
    }
}
