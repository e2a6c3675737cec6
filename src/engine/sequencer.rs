// ==========================================
// LOB 排位填充系统 - 到货排序引擎
// ==========================================
// 职责: 按行键分组，组内按 ETA 升序稳定排序
// 排序键:
// 1) 分组顺序: 行键字典序
// 2) 组内: eta_date 升序，无日期排在最后
// 3) 日期相同/都无日期: 保持输入顺序（稳定排序）
// ==========================================

use crate::domain::shipment::IndexedShipment;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// 单行的到货序列（即该行的放置优先级）
#[derive(Debug, Clone, PartialEq)]
pub struct RowGroup {
    pub row_key: String,
    pub shipments: Vec<IndexedShipment>,
}

// ==========================================
// ShipmentSequencer - 到货排序引擎
// ==========================================
pub struct ShipmentSequencer {
    // 无状态引擎
}

impl ShipmentSequencer {
    pub fn new() -> Self {
        Self {}
    }

    /// 生成确定性的分组序列
    ///
    /// # 参数
    /// - `usable`: 已匹配的到货记录（按输入顺序）
    ///
    /// # 返回
    /// 按行键字典序排列的分组，组内已按 ETA 稳定排序
    #[instrument(skip_all, fields(usable_count = usable.len()))]
    pub fn sequence(&self, usable: Vec<IndexedShipment>) -> Vec<RowGroup> {
        let mut by_row: BTreeMap<String, Vec<IndexedShipment>> = BTreeMap::new();
        for shipment in usable {
            by_row
                .entry(shipment.record.row_key.trim().to_string())
                .or_default()
                .push(shipment);
        }

        let groups: Vec<RowGroup> = by_row
            .into_iter()
            .map(|(row_key, mut shipments)| {
                // 组内记录已是输入顺序；sort_by 为稳定排序
                shipments.sort_by(|a, b| compare_eta(a.record.eta_date, b.record.eta_date));
                RowGroup { row_key, shipments }
            })
            .collect();

        debug!(groups = groups.len(), "到货排序完成");
        groups
    }
}

impl Default for ShipmentSequencer {
    fn default() -> Self {
        Self::new()
    }
}

/// ETA 比较：早日期优先，无日期排最后
fn compare_eta(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
