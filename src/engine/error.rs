// ==========================================
// LOB 排位填充系统 - 引擎错误类型
// ==========================================
// 只有调用方违反契约才报错；表满/未知行键/余料都以报告形式返回
// ==========================================

use thiserror::Error;

/// 填充引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AllocationError {
    /// 到货记录违反契约（件数为负，或套装模式 pieces_per_unit <= 0）
    #[error("无效到货记录 (输入第 {input_index} 条, 行键 {row_key}): {reason}")]
    InvalidRecord {
        row_key: String,
        input_index: usize,
        reason: String,
    },

    /// 分组行键不在产能表中（应先经过 KeyMatcher）
    #[error("产能表中不存在行键: {0}")]
    UnknownRow(String),
}
