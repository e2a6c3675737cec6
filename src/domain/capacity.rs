// ==========================================
// LOB 排位填充系统 - 产能表领域模型
// ==========================================
// 结构: 行 = stockcode，列 = 机号 (A/C#)
// 红线: 行列结构在一次填充内固定；Filled/Reserved 格永不覆盖
// ==========================================

use crate::domain::types::EligibilityPolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use thiserror::Error;

// ==========================================
// Marker - 放置标记
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Marker {
    pub label: String,     // 例如 "Sup1-01/02/25"
    pub color_key: String, // 例如 "#FFD966"
}

// ==========================================
// Cell - 单元格状态
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Cell {
    Empty,
    Reserved(String), // 保留原文本，导出时原样写回
    Filled(Marker),
}

impl Cell {
    /// 按空位策略对原始文本分类
    pub fn classify(raw: &str, policy: &EligibilityPolicy) -> Cell {
        if policy.treats_as_empty(raw) {
            Cell::Empty
        } else {
            Cell::Reserved(raw.trim().to_string())
        }
    }

    /// 是否可放置（只有 Empty 可放置）
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }

    /// 显示文本（Empty 为空串）
    pub fn display_text(&self) -> &str {
        match self {
            Cell::Empty => "",
            Cell::Reserved(text) => text,
            Cell::Filled(marker) => &marker.label,
        }
    }
}

// ==========================================
// TableError - 表结构错误
// ==========================================
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("行键重复: {0}")]
    DuplicateRowKey(String),

    #[error("列键重复: {0}")]
    DuplicateColumnKey(String),

    #[error("列键为空 (第 {0} 列)")]
    EmptyColumnKey(usize),

    #[error("行宽不一致 (行 {row_key}): 期望 {expected} 列，实际 {actual} 列")]
    RowWidthMismatch {
        row_key: String,
        expected: usize,
        actual: usize,
    },
}

// ==========================================
// TableRow - 表格行
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    key: String,
    cells: Vec<Cell>,
}

impl TableRow {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// 可放置格数量
    pub fn eligible_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_empty()).count()
    }

    /// 写入标记
    ///
    /// # 返回
    /// - `true`: 原格为 Empty，已写入
    /// - `false`: 原格不可放置（或越界），未做任何修改
    pub(crate) fn fill(&mut self, column_index: usize, marker: Marker) -> bool {
        match self.cells.get_mut(column_index) {
            Some(cell) if cell.is_empty() => {
                *cell = Cell::Filled(marker);
                true
            }
            _ => false,
        }
    }
}

// ==========================================
// CapacityTable - 产能表 (LOB)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityTable {
    index_header: String,
    columns: Vec<String>,
    rows: Vec<TableRow>,
    row_index: BTreeMap<String, usize>,
}

impl CapacityTable {
    /// 构建产能表
    ///
    /// # 参数
    /// - `columns`: 列键（机号），会被 trim
    /// - `rows`: (行键, 单元格) 列表，行键会被 trim，保持输入顺序
    ///
    /// # 返回
    /// - `Err(TableError)`: 行键/列键重复、列键为空或行宽不一致
    pub fn new(columns: Vec<String>, rows: Vec<(String, Vec<Cell>)>) -> Result<Self, TableError> {
        let columns: Vec<String> = columns.into_iter().map(|c| c.trim().to_string()).collect();

        let mut seen_columns = HashSet::new();
        for (idx, column) in columns.iter().enumerate() {
            if column.is_empty() {
                return Err(TableError::EmptyColumnKey(idx + 1));
            }
            if !seen_columns.insert(column.as_str()) {
                return Err(TableError::DuplicateColumnKey(column.clone()));
            }
        }

        let mut table_rows = Vec::with_capacity(rows.len());
        let mut row_index = BTreeMap::new();
        for (key, cells) in rows {
            let key = key.trim().to_string();
            if cells.len() != columns.len() {
                return Err(TableError::RowWidthMismatch {
                    row_key: key,
                    expected: columns.len(),
                    actual: cells.len(),
                });
            }
            if row_index.insert(key.clone(), table_rows.len()).is_some() {
                return Err(TableError::DuplicateRowKey(key));
            }
            table_rows.push(TableRow { key, cells });
        }

        Ok(Self {
            index_header: String::new(),
            columns,
            rows: table_rows,
            row_index,
        })
    }

    /// 设置索引列表头（导出时写在左上角）
    pub fn with_index_header(mut self, header: &str) -> Self {
        self.index_header = header.trim().to_string();
        self
    }

    pub fn index_header(&self) -> &str {
        &self.index_header
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn row(&self, key: &str) -> Option<&TableRow> {
        self.row_index.get(key).map(|&idx| &self.rows[idx])
    }

    pub(crate) fn row_mut(&mut self, key: &str) -> Option<&mut TableRow> {
        match self.row_index.get(key) {
            Some(&idx) => self.rows.get_mut(idx),
            None => None,
        }
    }

    pub fn contains_row(&self, key: &str) -> bool {
        self.row_index.contains_key(key)
    }

    pub fn cell(&self, row_key: &str, column_key: &str) -> Option<&Cell> {
        let col_idx = self.columns.iter().position(|c| c == column_key)?;
        self.row(row_key)?.cells.get(col_idx)
    }

    /// 已填充格总数
    pub fn filled_count(&self) -> usize {
        self.rows
            .iter()
            .flat_map(|r| r.cells.iter())
            .filter(|c| c.is_filled())
            .count()
    }
}
