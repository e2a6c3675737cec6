// ==========================================
// LOB 排位填充系统 - 核心库
// ==========================================
// 输入: ETA 到货表 + LOB 产能表（stockcode × 机号）
// 输出: 填充后的产能表 + 余料/忽略/未放置报告
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 匹配、排序、排位
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 导出层 - CSV / JSON 报告
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DqLevel, EligibilityPolicy, FillMode};

// 领域实体
pub use domain::{
    AllocationResult, AllocationSummary, CapacityTable, Cell, IgnoredSet, LeftoverReport, Marker,
    Placement, ShipmentRecord, UnplacedReport,
};

// 引擎
pub use engine::{
    AllocationError, FillOrchestrator, KeyMatcher, MarkerFormatter, ShipmentSequencer,
    SlotAllocator,
};

// 导入 / 导出
pub use exporter::{AllocationReport, ExportError};
pub use importer::{EtaImporter, ImportError, LobLoader};

// 配置
pub use config::{AppConfig, ConfigManager};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "LOB 排位填充系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
