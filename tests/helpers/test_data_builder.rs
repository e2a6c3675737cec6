// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::NaiveDate;
use lob_filler::domain::capacity::{CapacityTable, Cell};
use lob_filler::domain::shipment::ShipmentRecord;
use lob_filler::domain::types::EligibilityPolicy;

/// 2025 年 1 月的某一天
pub fn jan(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, day).unwrap()
}

// ==========================================
// ShipmentRecord 构建器
// ==========================================

pub struct ShipmentBuilder {
    row_key: String,
    supplier_key: String,
    quantity_pieces: i64,
    pieces_per_unit: Option<f64>,
    eta_date: Option<NaiveDate>,
}

impl ShipmentBuilder {
    pub fn new(row_key: &str) -> Self {
        Self {
            row_key: row_key.to_string(),
            supplier_key: "Sup1".to_string(),
            quantity_pieces: 1,
            pieces_per_unit: None,
            eta_date: None,
        }
    }

    pub fn supplier(mut self, supplier: &str) -> Self {
        self.supplier_key = supplier.to_string();
        self
    }

    pub fn qty(mut self, pieces: i64) -> Self {
        self.quantity_pieces = pieces;
        self
    }

    pub fn per_set(mut self, pieces_per_unit: f64) -> Self {
        self.pieces_per_unit = Some(pieces_per_unit);
        self
    }

    pub fn eta(mut self, date: NaiveDate) -> Self {
        self.eta_date = Some(date);
        self
    }

    pub fn build(self) -> ShipmentRecord {
        let mut record = ShipmentRecord::new(&self.row_key, &self.supplier_key, self.quantity_pieces);
        if let Some(ppu) = self.pieces_per_unit {
            record = record.with_pieces_per_unit(ppu);
        }
        if let Some(date) = self.eta_date {
            record = record.with_eta(date);
        }
        record
    }
}

// ==========================================
// CapacityTable 构建器
// ==========================================
// 单元格以原始文本给出，按空位策略分类

pub struct TableBuilder {
    columns: Vec<String>,
    rows: Vec<(String, Vec<String>)>,
    policy: EligibilityPolicy,
}

impl TableBuilder {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
            policy: EligibilityPolicy::default(),
        }
    }

    /// 指定列数，列键为 AC1..ACn
    pub fn with_width(width: usize) -> Self {
        let columns: Vec<String> = (1..=width).map(|i| format!("AC{}", i)).collect();
        Self {
            columns,
            rows: Vec::new(),
            policy: EligibilityPolicy::default(),
        }
    }

    pub fn policy(mut self, policy: EligibilityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn row(mut self, key: &str, cells: &[&str]) -> Self {
        self.rows
            .push((key.to_string(), cells.iter().map(|c| c.to_string()).collect()));
        self
    }

    /// 全部为空的行
    pub fn empty_row(mut self, key: &str) -> Self {
        let cells = vec![String::new(); self.columns.len()];
        self.rows.push((key.to_string(), cells));
        self
    }

    pub fn build(self) -> CapacityTable {
        let policy = self.policy;
        let rows = self
            .rows
            .into_iter()
            .map(|(key, raw)| {
                let cells = raw.iter().map(|r| Cell::classify(r, &policy)).collect();
                (key, cells)
            })
            .collect();
        CapacityTable::new(self.columns, rows)
            .unwrap()
            .with_index_header("Stockcode")
    }
}
