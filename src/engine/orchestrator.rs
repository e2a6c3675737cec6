// ==========================================
// LOB 排位填充系统 - 引擎编排器
// ==========================================
// 流程: 契约校验 → 行键匹配 → 到货排序 → 排位填充 → 汇总
// 产能表在一次运行内由编排器独占，结束后随结果交还
// ==========================================

use crate::config::MarkerStyle;
use crate::domain::capacity::CapacityTable;
use crate::domain::report::{AllocationResult, AllocationSummary};
use crate::domain::shipment::ShipmentRecord;
use crate::engine::error::AllocationError;
use crate::engine::key_matcher::KeyMatcher;
use crate::engine::marker::MarkerFormatter;
use crate::engine::sequencer::ShipmentSequencer;
use crate::engine::slot_allocator::SlotAllocator;
use tracing::{debug, info, warn};

// ==========================================
// FillOrchestrator - 引擎编排器
// ==========================================
pub struct FillOrchestrator {
    matcher: KeyMatcher,
    sequencer: ShipmentSequencer,
    allocator: SlotAllocator,
}

impl FillOrchestrator {
    /// 创建编排器
    ///
    /// # 参数
    /// - style: 标记样式（供应商颜色、日期格式）
    pub fn new(style: MarkerStyle) -> Self {
        Self {
            matcher: KeyMatcher::new(),
            sequencer: ShipmentSequencer::new(),
            allocator: SlotAllocator::new(MarkerFormatter::new(style)),
        }
    }

    /// 执行一次完整填充
    ///
    /// # 参数
    /// - table: 已分类 Empty/Reserved 的产能表（所有权移入）
    /// - records: 已校验的到货记录
    ///
    /// # 返回
    /// 填充后的产能表 + 余料/忽略/未放置报告 + 放置记录
    pub fn run(
        &self,
        mut table: CapacityTable,
        records: Vec<ShipmentRecord>,
    ) -> Result<AllocationResult, AllocationError> {
        info!(
            shipments_count = records.len(),
            table_rows = table.rows().len(),
            table_columns = table.columns().len(),
            "开始执行排位填充"
        );

        // ==========================================
        // 步骤1: 契约校验（包括将被忽略的记录）
        // ==========================================
        for (input_index, record) in records.iter().enumerate() {
            record
                .check_contract()
                .map_err(|reason| AllocationError::InvalidRecord {
                    row_key: record.row_key.clone(),
                    input_index,
                    reason,
                })?;
        }

        // ==========================================
        // 步骤2: 行键匹配
        // ==========================================
        let shipments_total = records.len();
        let matched = self.matcher.partition(&table, records);
        if !matched.ignored.is_empty() {
            warn!(
                ignored_keys = matched.ignored.len(),
                ignored_records = matched.ignored_records.len(),
                "存在产能表中没有的 stockcode，已忽略"
            );
        }

        // ==========================================
        // 步骤3: 到货排序
        // ==========================================
        let shipments_usable = matched.usable.len();
        let groups = self.sequencer.sequence(matched.usable);
        debug!(groups = groups.len(), "分组完成");

        // ==========================================
        // 步骤4: 排位填充
        // ==========================================
        let outcome = self.allocator.allocate(&mut table, &groups)?;

        let summary = AllocationSummary {
            shipments_total,
            shipments_usable,
            shipments_ignored: matched.ignored_records.len(),
            slots_requested: outcome.slots_requested,
            slots_placed: outcome.placements.len() as u64,
            slots_unplaced: outcome.unplaced.total(),
            leftover_pieces: outcome.leftovers.total(),
        };

        info!(
            slots_placed = summary.slots_placed,
            slots_unplaced = summary.slots_unplaced,
            leftover_pieces = summary.leftover_pieces,
            "排位填充结束"
        );

        Ok(AllocationResult {
            table,
            leftovers: outcome.leftovers,
            ignored: matched.ignored,
            unplaced: outcome.unplaced,
            placements: outcome.placements,
            summary,
        })
    }
}

impl Default for FillOrchestrator {
    fn default() -> Self {
        Self::new(MarkerStyle::default())
    }
}
