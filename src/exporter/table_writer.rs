// ==========================================
// LOB 排位填充系统 - 产能表 CSV 导出
// ==========================================
// 表头: 索引列表头 + 列键
// 单元格: Filled → 标签 / Reserved → 原文本 / Empty → 空
// ==========================================

use crate::domain::capacity::CapacityTable;
use crate::exporter::error::ExportResult;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 将产能表写入 CSV 文件
pub fn write_table_csv<P: AsRef<Path>>(table: &CapacityTable, path: P) -> ExportResult<()> {
    let file = File::create(path.as_ref())?;
    write_table_csv_to(table, file)?;
    info!(
        path = %path.as_ref().display(),
        rows = table.rows().len(),
        filled = table.filled_count(),
        "产能表已导出"
    );
    Ok(())
}

/// 将产能表写入任意 Writer
pub fn write_table_csv_to<W: Write>(table: &CapacityTable, writer: W) -> ExportResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    let mut header = Vec::with_capacity(table.columns().len() + 1);
    header.push(table.index_header());
    header.extend(table.columns().iter().map(String::as_str));
    wtr.write_record(&header)?;

    for row in table.rows() {
        let mut record = Vec::with_capacity(row.cells().len() + 1);
        record.push(row.key());
        record.extend(row.cells().iter().map(|c| c.display_text()));
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}
