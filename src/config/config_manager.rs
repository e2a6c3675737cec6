// ==========================================
// LOB 排位填充系统 - 配置管理器
// ==========================================
// 职责: 配置文件定位、加载、校验、快照
// 查找顺序: 显式路径 → 环境变量 → 用户配置目录
// ==========================================

use crate::config::app_config::AppConfig;
use chrono::format::{Item, StrftimeItems};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    /// 配置文件路径环境变量
    pub const CONFIG_PATH_ENV: &str = "LOB_FILLER_CONFIG";

    /// 用户配置目录下的子目录名
    pub const CONFIG_DIR_NAME: &str = "lob-filler";

    /// 配置文件名
    pub const CONFIG_FILE_NAME: &str = "config.json";
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    NotFound(String),

    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值无效 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Default,
    File(PathBuf),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: AppConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 使用内置默认配置
    pub fn with_defaults() -> Self {
        Self {
            config: AppConfig::default(),
            source: ConfigSource::Default,
        }
    }

    /// 加载配置
    ///
    /// # 参数
    /// - `explicit`: 显式指定的配置文件路径（命令行参数）
    ///
    /// # 返回
    /// - 显式路径或环境变量指定的文件不存在：`ConfigError::NotFound`
    /// - 默认路径下文件不存在：内置默认配置
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(config_keys::CONFIG_PATH_ENV) {
            let env_path = env_path.trim();
            if !env_path.is_empty() {
                debug!(path = %env_path, "使用环境变量指定的配置文件");
                return Self::from_file(Path::new(env_path));
            }
        }

        match Self::default_config_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                info!("未找到配置文件，使用内置默认配置");
                Ok(Self::with_defaults())
            }
        }
    }

    /// 从文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        let mut manager = Self::from_json_str(&raw)?;
        manager.source = ConfigSource::File(path.to_path_buf());
        info!(path = %path.display(), "配置文件加载完成");
        Ok(manager)
    }

    /// 从 JSON 文本加载（缺省字段取默认值）
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_json::from_str(raw)?;
        validate(&config)?;
        Ok(Self {
            config,
            source: ConfigSource::Default,
        })
    }

    /// 默认配置文件路径: {config_dir}/lob-filler/config.json
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| {
            dir.join(config_keys::CONFIG_DIR_NAME)
                .join(config_keys::CONFIG_FILE_NAME)
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn into_config(self) -> AppConfig {
        self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 当前配置快照（格式化 JSON）
    pub fn snapshot_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}

// ==========================================
// 配置校验
// ==========================================

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    let date_format = &config.marker.date_format;
    let format_ok = !date_format.is_empty()
        && StrftimeItems::new(date_format).all(|item| !matches!(item, Item::Error));
    if !format_ok {
        return Err(ConfigError::InvalidValue {
            key: "marker.date_format".to_string(),
            value: date_format.clone(),
            message: "不是合法的 strftime 格式".to_string(),
        });
    }

    let columns = &config.columns;
    for (key, value) in [
        ("columns.stockcode", &columns.stockcode),
        ("columns.supplier", &columns.supplier),
        ("columns.quantity", &columns.quantity),
        ("columns.eta", &columns.eta),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: key.to_string(),
                value: value.clone(),
                message: "列名不能为空".to_string(),
            });
        }
    }
    if let Some(qpss) = &columns.qty_per_shipset {
        if qpss.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "columns.qty_per_shipset".to_string(),
                value: qpss.clone(),
                message: "列名不能为空（按件模式请设为 null）".to_string(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r##"{{"marker":{{"supplier_colors":{{"Acme":"#00FF00"}}}}}}"##
        )
        .unwrap();

        let manager = ConfigManager::from_file(temp_file.path()).unwrap();
        assert_eq!(manager.config().marker.color_for("Acme"), "#00FF00");
        assert_eq!(manager.config().marker.color_for("Sup1"), "#FFFFFF"); // 整表覆盖
        assert_eq!(
            manager.source(),
            &ConfigSource::File(temp_file.path().to_path_buf())
        );
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let result = ConfigManager::load(Some(Path::new("no_such_config.json")));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_invalid_date_format_rejected() {
        let result = ConfigManager::from_json_str(r#"{"marker":{"date_format":"%Q"}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_blank_column_name_rejected() {
        let result = ConfigManager::from_json_str(r#"{"columns":{"eta":"  "}}"#);
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_snapshot_round_trips() {
        let manager = ConfigManager::with_defaults();
        let snapshot = manager.snapshot_json().unwrap();
        let reloaded = ConfigManager::from_json_str(&snapshot).unwrap();
        assert_eq!(reloaded.config(), manager.config());
    }
}
