// ==========================================
// LOB 排位填充系统 - 配置层
// ==========================================
// 职责: 系统配置管理（空位策略、标记样式、列映射）
// 存储: JSON 配置文件，缺省取内置默认值
// ==========================================

pub mod app_config;
pub mod config_manager;

// 重导出核心配置类型
pub use app_config::{AppConfig, ColumnMapping, MarkerStyle, ReportOptions};
pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigSource};
