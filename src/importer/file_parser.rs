// ==========================================
// LOB 排位填充系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls) / CSV (.csv)
// 输出: 有序表头 + 数据行（LOB 表依赖列顺序，不能用 HashMap）
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::FileParser;
use calamine::{open_workbook_auto, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

// ==========================================
// RawSheet - 原始表格
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<SheetRow>,
}

/// 数据行（row_number 为文件中的数据行号，从 1 开始，不含表头）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub row_number: usize,
    pub values: Vec<String>,
}

impl RawSheet {
    /// 由表头与数据行构建（跳过完全空白的行，短行补空）
    pub fn from_rows(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let headers: Vec<String> = headers.into_iter().map(|h| h.trim().to_string()).collect();
        let width = headers.len();

        let rows = rows
            .into_iter()
            .enumerate()
            .filter_map(|(idx, mut values)| {
                for v in values.iter_mut() {
                    *v = v.trim().to_string();
                }
                if values.iter().all(|v| v.is_empty()) {
                    return None;
                }
                if values.len() < width {
                    values.resize(width, String::new());
                }
                Some(SheetRow {
                    row_number: idx + 1,
                    values,
                })
            })
            .collect();

        Self { headers, rows }
    }

    /// 转为 列名 → 值 的行记录（超出表头的列被丢弃）
    pub fn to_records(&self) -> Vec<(usize, HashMap<String, String>)> {
        self.rows
            .iter()
            .map(|row| {
                let map = self
                    .headers
                    .iter()
                    .zip(row.values.iter())
                    .map(|(h, v)| (h.clone(), v.clone()))
                    .collect();
                (row.row_number, map)
            })
            .collect()
    }
}

fn check_file(path: &Path, allowed: &[&str]) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    if !allowed.contains(&ext.as_str()) {
        return Err(ImportError::UnsupportedFormat(ext));
    }
    Ok(())
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, &["csv"])?;

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            rows.push(record.iter().map(|v| v.to_string()).collect());
        }

        Ok(RawSheet::from_rows(headers, rows))
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        check_file(file_path, &["xlsx", "xls"])?;

        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptySheet(file_path.display().to_string()))?;
        let headers: Vec<String> = header_row.iter().map(|cell| cell.to_string()).collect();

        let data_rows: Vec<Vec<String>> = rows
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        Ok(RawSheet::from_rows(headers, data_rows))
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_sheet(&self, file_path: &Path) -> ImportResult<RawSheet> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_sheet(file_path),
            "xlsx" | "xls" => ExcelParser.parse_sheet(file_path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
