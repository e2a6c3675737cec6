// ==========================================
// LOB 排位填充系统 - 领域类型定义
// ==========================================
// 职责: 填充模式、空位判定策略、数据质量级别
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 填充模式 (Fill Mode)
// ==========================================
// Unit: 一件占一格
// Shipset: 每 pieces_per_unit 件占一格，余数记入 leftover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillMode {
    Unit,
    Shipset,
}

impl fmt::Display for FillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillMode::Unit => write!(f, "UNIT"),
            FillMode::Shipset => write!(f, "SHIPSET"),
        }
    }
}

// ==========================================
// 空位判定策略 (Eligibility Policy)
// ==========================================
// 红线: 非空格永不覆盖
// BlankOnly: 只有空白格可放置，"Stock" 等文字一律保留
// SentinelAsEmpty: 指定的占位文字（忽略大小写）视同空白
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum EligibilityPolicy {
    #[default]
    BlankOnly,
    SentinelAsEmpty { sentinels: Vec<String> },
}

impl EligibilityPolicy {
    /// 判断原始单元格文本是否视为空位
    ///
    /// # 参数
    /// - `raw`: 表格中的原始文本（未 trim）
    ///
    /// # 返回
    /// - `true`: 空白，或命中占位文字
    /// - `false`: 其余任何非空文本
    pub fn treats_as_empty(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return true;
        }
        match self {
            EligibilityPolicy::BlankOnly => false,
            EligibilityPolicy::SentinelAsEmpty { sentinels } => sentinels
                .iter()
                .any(|s| s.trim().eq_ignore_ascii_case(trimmed)),
        }
    }
}

impl fmt::Display for EligibilityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EligibilityPolicy::BlankOnly => write!(f, "BLANK_ONLY"),
            EligibilityPolicy::SentinelAsEmpty { sentinels } => {
                write!(f, "SENTINEL_AS_EMPTY({})", sentinels.join("|"))
            }
        }
    }
}

// ==========================================
// 数据质量级别 (DQ Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DqLevel {
    Error,   // 错误（阻断导入）
    Warning, // 警告（允许导入）
    Info,    // 提示（仅记录）
}

impl fmt::Display for DqLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DqLevel::Error => write!(f, "ERROR"),
            DqLevel::Warning => write!(f, "WARNING"),
            DqLevel::Info => write!(f, "INFO"),
        }
    }
}
