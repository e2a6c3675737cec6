// ==========================================
// LOB 排位填充系统 - 排位填充引擎
// ==========================================
// 职责: 按行游标从左到右放置到货标记
// 输入: 排序后的行分组 + 产能表（会被修改）
// 输出: 放置记录 + 余料报告 + 未放置报告
// 红线: 每次放置恰好消耗一个 Empty 格；Filled/Reserved 永不覆盖
// ==========================================

use crate::domain::capacity::CapacityTable;
use crate::domain::report::{LeftoverReport, Placement, UnplacedReport};
use crate::domain::shipment::ShipmentRecord;
use crate::engine::error::AllocationError;
use crate::engine::marker::MarkerFormatter;
use crate::engine::sequencer::RowGroup;
use crate::engine::slot_cursor::SlotCursor;
use tracing::{debug, instrument, warn};

/// 单条到货的占格需求
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotDemand {
    pub slots: u64,
    pub leftover_pieces: f64, // 仅套装模式可能 > 0
}

/// 计算占格需求
///
/// - 按件模式: slots = quantity，无余料
/// - 套装模式: slots = floor(quantity / pieces_per_unit)，余料 = quantity - slots * pieces_per_unit
///
/// 调用前须通过 `ShipmentRecord::check_contract`
pub fn slot_demand(record: &ShipmentRecord) -> SlotDemand {
    if record.quantity_pieces <= 0 {
        return SlotDemand {
            slots: 0,
            leftover_pieces: 0.0,
        };
    }

    match record.pieces_per_unit {
        None => SlotDemand {
            slots: record.quantity_pieces as u64,
            leftover_pieces: 0.0,
        },
        Some(ppu) => {
            let quantity = record.quantity_pieces as f64;
            let sets = (quantity / ppu).floor();
            SlotDemand {
                slots: sets as u64,
                leftover_pieces: (quantity - sets * ppu).max(0.0),
            }
        }
    }
}

/// 引擎输出（不含产能表本身）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AllocationOutcome {
    pub placements: Vec<Placement>,
    pub leftovers: LeftoverReport,
    pub unplaced: UnplacedReport,
    pub slots_requested: u64,
}

// ==========================================
// SlotAllocator - 排位填充引擎
// ==========================================
pub struct SlotAllocator {
    formatter: MarkerFormatter,
}

impl SlotAllocator {
    pub fn new(formatter: MarkerFormatter) -> Self {
        Self { formatter }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 填充产能表
    ///
    /// 规则:
    /// 1) 按分组顺序逐行处理，每行一个从第 0 列开始的游标
    /// 2) 组内按顺序处理到货，quantity <= 0 跳过
    /// 3) 游标跳过非空格；本行无空位时停止，剩余格数记入未放置报告
    /// 4) 同一行内游标不重置
    ///
    /// # 参数
    /// - `table`: 产能表（会被修改）
    /// - `groups`: ShipmentSequencer 输出的分组
    ///
    /// # 返回
    /// - `Err(AllocationError)`: 存在违反契约的记录或未知行键；此时产能表未被修改
    #[instrument(skip(self, table, groups), fields(
        groups_count = groups.len(),
        table_rows = table.rows().len(),
        table_columns = table.columns().len()
    ))]
    pub fn allocate(
        &self,
        table: &mut CapacityTable,
        groups: &[RowGroup],
    ) -> Result<AllocationOutcome, AllocationError> {
        // 先整体校验，保证失败时不产生部分写入
        self.validate(table, groups)?;

        let columns = table.columns().to_vec();
        let mut outcome = AllocationOutcome::default();

        for group in groups {
            self.fill_row(table, &columns, group, &mut outcome)?;
        }

        debug!(
            placed = outcome.placements.len(),
            requested = outcome.slots_requested,
            unplaced = outcome.unplaced.total(),
            "排位填充完成"
        );
        Ok(outcome)
    }

    /// 校验分组：行键存在且每条记录满足契约
    pub fn validate(&self, table: &CapacityTable, groups: &[RowGroup]) -> Result<(), AllocationError> {
        for group in groups {
            if !table.contains_row(&group.row_key) {
                return Err(AllocationError::UnknownRow(group.row_key.clone()));
            }
            for shipment in &group.shipments {
                shipment
                    .record
                    .check_contract()
                    .map_err(|reason| AllocationError::InvalidRecord {
                        row_key: shipment.record.row_key.clone(),
                        input_index: shipment.input_index,
                        reason,
                    })?;
            }
        }
        Ok(())
    }

    // ==========================================
    // 辅助方法
    // ==========================================

    /// 填充单行
    fn fill_row(
        &self,
        table: &mut CapacityTable,
        columns: &[String],
        group: &RowGroup,
        outcome: &mut AllocationOutcome,
    ) -> Result<(), AllocationError> {
        let row = table
            .row_mut(&group.row_key)
            .ok_or_else(|| AllocationError::UnknownRow(group.row_key.clone()))?;
        let mut cursor = SlotCursor::new();

        for shipment in &group.shipments {
            let record = &shipment.record;
            if record.quantity_pieces <= 0 {
                continue;
            }

            let demand = slot_demand(record);
            debug!(
                row_key = %group.row_key,
                input_index = shipment.input_index,
                fill_mode = %record.fill_mode(),
                slots = demand.slots,
                leftover_pieces = demand.leftover_pieces,
                "占格需求"
            );
            outcome.leftovers.add(&group.row_key, demand.leftover_pieces);
            // 极端件数下需求可达 u64::MAX，累计只做饱和加法
            outcome.slots_requested = outcome.slots_requested.saturating_add(demand.slots);

            let marker = self.formatter.format(&record.supplier_key, record.eta_date);
            let mut placed: u64 = 0;
            while placed < demand.slots {
                let column_index = match cursor.seek(row.cells()) {
                    Some(idx) => idx,
                    None => break,
                };

                if row.fill(column_index, marker.clone()) {
                    outcome.placements.push(Placement {
                        row_key: group.row_key.clone(),
                        column_key: columns[column_index].clone(),
                        column_index,
                        input_index: shipment.input_index,
                        marker: marker.clone(),
                    });
                    placed += 1;
                }
                cursor.advance();
            }

            let missing = demand.slots - placed;
            if missing > 0 {
                warn!(
                    row_key = %group.row_key,
                    input_index = shipment.input_index,
                    missing_slots = missing,
                    "行已满，部分到货未放置"
                );
                outcome.unplaced.add(&group.row_key, missing);
            }
        }

        debug!(
            row_key = %group.row_key,
            shipments = group.shipments.len(),
            cursor_position = cursor.position(),
            cursor_state = %cursor.state(),
            "行填充完成"
        );
        Ok(())
    }
}

impl Default for SlotAllocator {
    fn default() -> Self {
        Self::new(MarkerFormatter::default())
    }
}
