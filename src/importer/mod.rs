// ==========================================
// LOB 排位填充系统 - 导入层
// ==========================================
// 职责: 外部文件导入，生成 ShipmentRecord 与 CapacityTable
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod dq_validator;
pub mod error;
pub mod eta_importer;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod lob_loader;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use dq_validator::DqValidator as DqValidatorImpl;
pub use error::{ImportError, ImportResult};
pub use eta_importer::{EtaImport, EtaImporter, BLOCKED_SAMPLE_LIMIT};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawSheet, SheetRow, UniversalFileParser};
pub use lob_loader::LobLoader;

// 重导出 Trait 接口
pub use importer_trait::{DataCleaner, DqValidator, FieldMapper, FileParser};
