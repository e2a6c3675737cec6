// ==========================================
// LOB 排位填充系统 - 行键匹配引擎
// ==========================================
// 职责: 到货记录行键 ∩ 产能表行键，划分可用/忽略
// 红线: 精确匹配（trim 后逐字相等），不做模糊或大小写无关匹配
// ==========================================

use crate::domain::capacity::CapacityTable;
use crate::domain::report::IgnoredSet;
use crate::domain::shipment::{IndexedShipment, ShipmentRecord};
use tracing::{debug, instrument};

/// 匹配结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchOutcome {
    pub usable: Vec<IndexedShipment>,
    pub ignored_records: Vec<IndexedShipment>,
    pub ignored: IgnoredSet,
}

// ==========================================
// KeyMatcher - 行键匹配引擎
// ==========================================
pub struct KeyMatcher {
    // 无状态引擎
}

impl KeyMatcher {
    pub fn new() -> Self {
        Self {}
    }

    /// 划分到货记录
    ///
    /// # 参数
    /// - `table`: 产能表（只读）
    /// - `records`: 全部到货记录（输入顺序即 input_index）
    ///
    /// # 返回
    /// 可用记录、被忽略记录，以及去重排序后的忽略行键集合
    #[instrument(skip_all, fields(records_count = records.len(), table_rows = table.rows().len()))]
    pub fn partition(&self, table: &CapacityTable, records: Vec<ShipmentRecord>) -> MatchOutcome {
        let mut outcome = MatchOutcome::default();

        for (input_index, record) in records.into_iter().enumerate() {
            if table.contains_row(record.row_key.trim()) {
                outcome.usable.push(IndexedShipment {
                    input_index,
                    record,
                });
            } else {
                outcome.ignored.insert(record.row_key.trim());
                outcome.ignored_records.push(IndexedShipment {
                    input_index,
                    record,
                });
            }
        }

        debug!(
            usable = outcome.usable.len(),
            ignored_records = outcome.ignored_records.len(),
            ignored_keys = outcome.ignored.len(),
            "行键匹配完成"
        );
        outcome
    }
}

impl Default for KeyMatcher {
    fn default() -> Self {
        Self::new()
    }
}
