// ==========================================
// LOB 排位填充系统 - 引擎层
// ==========================================
// 职责: 行键匹配、到货排序、排位填充、标记格式化
// 红线: 引擎不读写文件；同一输入必须得到同一输出
// ==========================================

pub mod error;
pub mod key_matcher;
pub mod marker;
pub mod orchestrator;
pub mod sequencer;
pub mod slot_allocator;
pub mod slot_cursor;

// 重导出核心引擎
pub use error::AllocationError;
pub use key_matcher::{KeyMatcher, MatchOutcome};
pub use marker::MarkerFormatter;
pub use orchestrator::FillOrchestrator;
pub use sequencer::{RowGroup, ShipmentSequencer};
pub use slot_allocator::{slot_demand, AllocationOutcome, SlotAllocator, SlotDemand};
pub use slot_cursor::{CursorState, SlotCursor};
