// ==========================================
// LOB 排位填充系统 - 标记格式化
// ==========================================
// 纯函数: (supplier, eta) → (label, color)
// 标签格式: "{supplier}-{MM/DD/YY}"，无日期时 "{supplier}-N/A"
// ==========================================

use crate::config::MarkerStyle;
use crate::domain::capacity::Marker;
use chrono::NaiveDate;

// ==========================================
// MarkerFormatter - 标记格式化器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MarkerFormatter {
    style: MarkerStyle,
}

impl MarkerFormatter {
    pub fn new(style: MarkerStyle) -> Self {
        Self { style }
    }

    /// 生成放置标记（无副作用，总能返回标签）
    pub fn format(&self, supplier_key: &str, eta_date: Option<NaiveDate>) -> Marker {
        let date_text = match eta_date {
            Some(date) => date.format(&self.style.date_format).to_string(),
            None => self.style.missing_date_label.clone(),
        };

        Marker {
            label: format!("{}-{}", supplier_key, date_text),
            color_key: self.style.color_for(supplier_key).to_string(),
        }
    }
}
