// ==========================================
// LOB 排位填充系统 - 导出层
// ==========================================
// 职责: 填充后的产能表 → CSV，填充报告 → JSON / 文本
// ==========================================

pub mod error;
pub mod report;
pub mod table_writer;

pub use error::{ExportError, ExportResult};
pub use report::{
    format_pieces, render_ignored_preview, render_leftover_lines, write_report_json,
    AllocationReport, StyledPlacement,
};
pub use table_writer::{write_table_csv, write_table_csv_to};
