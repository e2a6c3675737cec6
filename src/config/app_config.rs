// ==========================================
// LOB 排位填充系统 - 配置结构
// ==========================================
// 职责: 空位策略、标记样式、列映射、报告选项
// 存储: JSON 文件（字段缺省时取默认值）
// ==========================================

use crate::domain::types::EligibilityPolicy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 未配置颜色的供应商使用的中性色
pub const DEFAULT_NEUTRAL_COLOR: &str = "#FFFFFF";

/// 日期缺失/无法解析时的标签占位
pub const DEFAULT_MISSING_DATE_LABEL: &str = "N/A";

/// 标签日期格式 (MM/DD/YY)
pub const DEFAULT_DATE_FORMAT: &str = "%m/%d/%y";

// ==========================================
// AppConfig - 全局配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub eligibility: EligibilityPolicy,
    pub marker: MarkerStyle,
    pub columns: ColumnMapping,
    pub report: ReportOptions,
}

// ==========================================
// MarkerStyle - 标记样式
// ==========================================
// 显式传入 MarkerFormatter，不走全局状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    pub supplier_colors: BTreeMap<String, String>, // 供应商 -> 颜色
    pub default_color: String,
    pub date_format: String,
    pub missing_date_label: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        let mut supplier_colors = BTreeMap::new();
        supplier_colors.insert("Sup1".to_string(), "#FFD966".to_string()); // 浅黄
        supplier_colors.insert("Sup2".to_string(), "#A4C2F4".to_string()); // 浅蓝

        Self {
            supplier_colors,
            default_color: DEFAULT_NEUTRAL_COLOR.to_string(),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            missing_date_label: DEFAULT_MISSING_DATE_LABEL.to_string(),
        }
    }
}

impl MarkerStyle {
    /// 查找供应商颜色，未知供应商返回默认色
    pub fn color_for(&self, supplier_key: &str) -> &str {
        self.supplier_colors
            .get(supplier_key)
            .map(String::as_str)
            .unwrap_or(&self.default_color)
    }
}

// ==========================================
// ColumnMapping - ETA 文件列映射
// ==========================================
// qty_per_shipset 为 None 时按件模式导入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMapping {
    pub stockcode: String,
    pub supplier: String,
    pub quantity: String,
    pub eta: String,
    pub qty_per_shipset: Option<String>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            stockcode: "Stockcode".to_string(),
            supplier: "Supplier".to_string(),
            quantity: "Qty".to_string(),
            eta: "ETA".to_string(),
            qty_per_shipset: Some("Qty/SS".to_string()),
        }
    }
}

impl ColumnMapping {
    /// 所有必需列名（按映射顺序）
    pub fn required_columns(&self) -> Vec<&str> {
        let mut cols = vec![
            self.stockcode.as_str(),
            self.supplier.as_str(),
            self.quantity.as_str(),
            self.eta.as_str(),
        ];
        if let Some(qpss) = &self.qty_per_shipset {
            cols.push(qpss.as_str());
        }
        cols
    }

    pub fn is_shipset_mode(&self) -> bool {
        self.qty_per_shipset.is_some()
    }
}

// ==========================================
// ReportOptions - 报告选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportOptions {
    pub show_ignored: bool,
    pub ignored_preview_limit: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            show_ignored: true,
            ignored_preview_limit: 20,
        }
    }
}
