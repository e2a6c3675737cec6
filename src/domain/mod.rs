// ==========================================
// LOB 排位填充系统 - 领域模型层
// ==========================================
// 职责: 定义到货记录、产能表、填充结果等领域类型
// 红线: 不含文件读写,不含填充算法
// ==========================================

pub mod capacity;
pub mod report;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use capacity::{CapacityTable, Cell, Marker, TableError, TableRow};
pub use report::{
    AllocationResult, AllocationSummary, IgnoredSet, LeftoverReport, Placement, UnplacedReport,
};
pub use shipment::{
    DqReport, DqSummary, DqViolation, IndexedShipment, RawShipmentRecord, ShipmentRecord,
};
pub use types::{DqLevel, EligibilityPolicy, FillMode};
