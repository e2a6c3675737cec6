// ==========================================
// LOB 排位填充系统 - ETA 到货数据导入器
// ==========================================
// 职责: 整合导入流程，从文件到 ShipmentRecord 列表
// 流程: 解析 → 表头检查 → 映射 → 校验 → 阻断判定 → 清洗转换
// 红线: 存在 ERROR 级违规时整批阻断，不返回部分记录
// ==========================================

use crate::config::ColumnMapping;
use crate::domain::shipment::{DqReport, DqSummary, DqViolation, RawShipmentRecord, ShipmentRecord};
use crate::domain::types::DqLevel;
use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::dq_validator::DqValidator as DqValidatorImpl;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use crate::importer::importer_trait::{DataCleaner, DqValidator, FieldMapper, FileParser};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};

/// 阻断时附带的 ERROR 样本上限
pub const BLOCKED_SAMPLE_LIMIT: usize = 10;

// ==========================================
// EtaImport - 导入结果
// ==========================================
#[derive(Debug, Clone)]
pub struct EtaImport {
    pub records: Vec<ShipmentRecord>, // 保持文件行顺序
    pub dq_report: DqReport,
}

// ==========================================
// EtaImporter - ETA 导入器
// ==========================================
pub struct EtaImporter {
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    dq_validator: Box<dyn DqValidator>,
    shipset_mode: bool,
}

impl EtaImporter {
    /// 创建 ETA 导入器
    ///
    /// # 参数
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    /// - data_cleaner: 数据清洗器
    /// - dq_validator: DQ 校验器
    /// - shipset_mode: 是否按套计算（要求每套件数列）
    pub fn new(
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        dq_validator: Box<dyn DqValidator>,
        shipset_mode: bool,
    ) -> Self {
        Self {
            file_parser,
            field_mapper,
            data_cleaner,
            dq_validator,
            shipset_mode,
        }
    }

    /// 按列映射配置组装默认组件
    pub fn with_columns(columns: ColumnMapping) -> Self {
        let shipset_mode = columns.is_shipset_mode();
        Self::new(
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl::new(columns)),
            Box::new(DataCleanerImpl),
            Box::new(DqValidatorImpl::new()),
            shipset_mode,
        )
    }

    pub fn shipset_mode(&self) -> bool {
        self.shipset_mode
    }

    /// 从文件导入 ETA 记录
    ///
    /// # 返回
    /// - Ok(EtaImport): 全部可用记录 + DQ 报告
    /// - Err(BlockedByDataQuality): 存在 ERROR 级违规
    /// - Err: 文件/表头错误
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display()))]
    pub fn import<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<EtaImport> {
        info!("开始导入 ETA 数据");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let sheet = self.file_parser.parse_sheet(file_path.as_ref()).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;
        info!(total_rows = sheet.rows.len(), "文件解析完成");

        self.import_sheet(sheet)
    }

    /// 从已解析的表格导入（不涉及文件读取）
    pub fn import_sheet(&self, sheet: RawSheet) -> ImportResult<EtaImport> {
        // === 步骤 2: 表头检查 ===
        debug!("步骤 2: 表头检查");
        self.field_mapper.check_headers(&sheet.headers)?;

        // === 步骤 3: 字段映射 ===
        debug!("步骤 3: 字段映射");
        let raw_records: Vec<RawShipmentRecord> = sheet
            .to_records()
            .iter()
            .map(|(row_number, row)| self.field_mapper.map_to_raw_shipment(row, *row_number))
            .collect();
        let total_rows = raw_records.len();

        // === 步骤 4: DQ 校验 ===
        debug!("步骤 4: DQ 校验");
        let violations: Vec<DqViolation> = raw_records
            .iter()
            .flat_map(|r| self.dq_validator.validate_record(r, self.shipset_mode))
            .collect();

        let blocked_rows = rows_with_level(&violations, DqLevel::Error);
        let warning_rows = rows_with_level(&violations, DqLevel::Warning);
        info!(
            violations = violations.len(),
            blocked = blocked_rows,
            warning = warning_rows,
            "DQ 校验完成"
        );

        // === 步骤 5: 阻断判定 ===
        if blocked_rows > 0 {
            let samples: Vec<DqViolation> = violations
                .iter()
                .filter(|v| v.level == DqLevel::Error)
                .take(BLOCKED_SAMPLE_LIMIT)
                .cloned()
                .collect();
            for sample in &samples {
                warn!(
                    row_number = sample.row_number,
                    field = %sample.field,
                    message = %sample.message,
                    "DQ 阻断"
                );
            }
            return Err(ImportError::BlockedByDataQuality {
                blocked: blocked_rows,
                samples,
            });
        }

        // === 步骤 6: 清洗转换 ===
        debug!("步骤 6: 清洗转换");
        let records: Vec<ShipmentRecord> = raw_records
            .iter()
            .map(|raw| self.convert_to_shipment(raw))
            .collect();

        let dq_report = DqReport {
            summary: DqSummary {
                total_rows,
                accepted: records.len(),
                blocked: blocked_rows,
                warning: warning_rows,
            },
            violations,
        };

        info!(
            total = total_rows,
            accepted = records.len(),
            shipset_mode = self.shipset_mode,
            "ETA 数据导入完成"
        );

        Ok(EtaImport { records, dq_report })
    }

    /// RawShipmentRecord → ShipmentRecord
    ///
    /// 件数缺失或非数字按 0 处理；按件模式下 pieces_per_unit 为 None
    fn convert_to_shipment(&self, raw: &RawShipmentRecord) -> ShipmentRecord {
        let stockcode = raw.stockcode.as_deref().unwrap_or_default();
        let supplier = raw.supplier.as_deref().unwrap_or_default();
        let quantity = raw
            .quantity
            .as_deref()
            .and_then(|q| self.data_cleaner.parse_quantity(q))
            .unwrap_or(0);

        let mut record = ShipmentRecord::new(
            &self.data_cleaner.clean_text(stockcode),
            &self.data_cleaner.clean_text(supplier),
            quantity,
        );

        if self.shipset_mode {
            if let Some(ppu) = raw
                .qty_per_shipset
                .as_deref()
                .and_then(|v| self.data_cleaner.parse_real(v))
            {
                record = record.with_pieces_per_unit(ppu);
            }
        }

        if let Some(eta) = raw.eta.as_deref().and_then(|v| self.data_cleaner.parse_date(v)) {
            record = record.with_eta(eta);
        }

        record
    }
}

/// 统计存在指定级别违规的行数（同一行多条违规只计一次）
fn rows_with_level(violations: &[DqViolation], level: DqLevel) -> usize {
    violations
        .iter()
        .filter(|v| v.level == level)
        .map(|v| v.row_number)
        .collect::<BTreeSet<_>>()
        .len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sheet(headers: &[&str], rows: &[&[&str]]) -> RawSheet {
        RawSheet::from_rows(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    const HEADERS: &[&str] = &["Stockcode", "Supplier", "Qty", "ETA", "Qty/SS"];

    #[test]
    fn test_import_sheet_shipset_mode() {
        let importer = EtaImporter::with_columns(ColumnMapping::default());
        let result = importer
            .import_sheet(sheet(
                HEADERS,
                &[
                    &["SC-001", "Sup1", "5", "2025-01-02", "2"],
                    &["SC-002", "Sup2", "abc", "", "3"],
                ],
            ))
            .unwrap();

        assert_eq!(result.records.len(), 2);
        let first = &result.records[0];
        assert_eq!(first.row_key, "SC-001");
        assert_eq!(first.quantity_pieces, 5);
        assert_eq!(first.pieces_per_unit, Some(2.0));
        assert_eq!(first.eta_date, NaiveDate::from_ymd_opt(2025, 1, 2));

        let second = &result.records[1];
        assert_eq!(second.quantity_pieces, 0);
        assert_eq!(second.eta_date, None);

        assert_eq!(result.dq_report.summary.total_rows, 2);
        assert_eq!(result.dq_report.summary.accepted, 2);
        assert!(!result.dq_report.has_errors());
    }

    #[test]
    fn test_import_sheet_unit_mode_ignores_shipset_column() {
        let importer = EtaImporter::with_columns(ColumnMapping {
            qty_per_shipset: None,
            ..ColumnMapping::default()
        });
        let result = importer
            .import_sheet(sheet(
                &["Stockcode", "Supplier", "Qty", "ETA"],
                &[&["SC-001", "Sup1", "3", "01/02/25"]],
            ))
            .unwrap();

        assert!(!importer.shipset_mode());
        assert_eq!(result.records[0].pieces_per_unit, None);
    }

    #[test]
    fn test_import_sheet_blocked_by_missing_shipset() {
        let importer = EtaImporter::with_columns(ColumnMapping::default());
        let result = importer.import_sheet(sheet(
            HEADERS,
            &[
                &["SC-001", "Sup1", "5", "2025-01-02", ""],
                &["SC-002", "Sup1", "5", "2025-01-02", "0"],
                &["SC-003", "Sup1", "5", "2025-01-02", "2"],
            ],
        ));

        match result {
            Err(ImportError::BlockedByDataQuality { blocked, samples }) => {
                assert_eq!(blocked, 2);
                assert_eq!(samples.len(), 2);
                assert_eq!(samples[0].row_number, 1);
            }
            other => panic!("expected BlockedByDataQuality, got {:?}", other),
        }
    }

    #[test]
    fn test_blocked_samples_are_capped() {
        let importer = EtaImporter::with_columns(ColumnMapping::default());
        let rows: Vec<Vec<String>> = (0..15)
            .map(|i| {
                vec![
                    format!("SC-{:03}", i),
                    "Sup1".to_string(),
                    "-1".to_string(),
                    "2025-01-02".to_string(),
                    "2".to_string(),
                ]
            })
            .collect();
        let raw = RawSheet::from_rows(HEADERS.iter().map(|s| s.to_string()).collect(), rows);

        match importer.import_sheet(raw) {
            Err(ImportError::BlockedByDataQuality { blocked, samples }) => {
                assert_eq!(blocked, 15);
                assert_eq!(samples.len(), BLOCKED_SAMPLE_LIMIT);
            }
            other => panic!("expected BlockedByDataQuality, got {:?}", other),
        }
    }

    #[test]
    fn test_import_sheet_missing_column() {
        let importer = EtaImporter::with_columns(ColumnMapping::default());
        let result = importer.import_sheet(sheet(&["Stockcode", "Qty"], &[&["SC-001", "1"]]));
        assert!(matches!(result, Err(ImportError::MissingColumn { .. })));
    }
}
