// ==========================================
// LOB 排位填充系统 - 到货记录领域模型
// ==========================================
// 职责: ETA 到货记录、导入中间结构、DQ 报告
// 红线: ShipmentRecord 构造后不可变，由上游保证 pieces_per_unit > 0
// ==========================================

use crate::domain::types::{DqLevel, FillMode};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ShipmentRecord - 到货记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub row_key: String,               // 行键（stockcode，已 trim，保留大小写）
    pub supplier_key: String,          // 供应商
    pub quantity_pieces: i64,          // 到货件数
    pub pieces_per_unit: Option<f64>,  // 每套件数（None = 按件模式）
    pub eta_date: Option<NaiveDate>,   // 预计到货日期
}

impl ShipmentRecord {
    /// 按件模式记录（行键与供应商会被 trim）
    pub fn new(row_key: &str, supplier_key: &str, quantity_pieces: i64) -> Self {
        Self {
            row_key: row_key.trim().to_string(),
            supplier_key: supplier_key.trim().to_string(),
            quantity_pieces,
            pieces_per_unit: None,
            eta_date: None,
        }
    }

    pub fn with_pieces_per_unit(mut self, pieces_per_unit: f64) -> Self {
        self.pieces_per_unit = Some(pieces_per_unit);
        self
    }

    pub fn with_eta(mut self, eta_date: NaiveDate) -> Self {
        self.eta_date = Some(eta_date);
        self
    }

    pub fn fill_mode(&self) -> FillMode {
        match self.pieces_per_unit {
            Some(_) => FillMode::Shipset,
            None => FillMode::Unit,
        }
    }

    /// 检查调用方契约
    ///
    /// # 返回
    /// - `Ok(())`: 记录合法
    /// - `Err(reason)`: 件数为负，或套装模式下 pieces_per_unit 非正/非有限
    pub fn check_contract(&self) -> Result<(), String> {
        if self.quantity_pieces < 0 {
            return Err(format!("quantity_pieces 为负数: {}", self.quantity_pieces));
        }
        if let Some(ppu) = self.pieces_per_unit {
            if !ppu.is_finite() || ppu <= 0.0 {
                return Err(format!("pieces_per_unit 必须为正数: {}", ppu));
            }
        }
        Ok(())
    }
}

// ==========================================
// IndexedShipment - 带输入序号的到货记录
// ==========================================
// input_index 是记录在原始输入中的位置，用于稳定排序与审计
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedShipment {
    pub input_index: usize,
    pub record: ShipmentRecord,
}

// ==========================================
// RawShipmentRecord - 字段映射后的中间结构
// ==========================================
// 所有字段保持原始文本，清洗与类型转换在后续阶段完成
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawShipmentRecord {
    pub stockcode: Option<String>,
    pub supplier: Option<String>,
    pub quantity: Option<String>,
    pub eta: Option<String>,
    pub qty_per_shipset: Option<String>,

    // 元信息
    pub row_number: usize, // 原始文件行号（数据行从 1 开始）
}

// ==========================================
// DqViolation - 数据质量违规记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqViolation {
    pub row_number: usize,            // 原始文件行号
    pub stockcode: Option<String>,    // 行键（如果可解析）
    pub level: DqLevel,               // 违规级别
    pub field: String,                // 违规字段
    pub message: String,              // 违规描述
}

// ==========================================
// DqSummary - 数据质量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DqSummary {
    pub total_rows: usize, // 总行数
    pub accepted: usize,   // 可用记录
    pub blocked: usize,    // 阻断（ERROR）
    pub warning: usize,    // 警告（WARNING）
}

// ==========================================
// DqReport - 数据质量报告
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DqReport {
    pub summary: DqSummary,
    pub violations: Vec<DqViolation>,
}

impl DqReport {
    pub fn has_errors(&self) -> bool {
        self.violations.iter().any(|v| v.level == DqLevel::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &DqViolation> {
        self.violations.iter().filter(|v| v.level == DqLevel::Error)
    }
}
