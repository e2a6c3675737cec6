// ==========================================
// LOB 排位填充系统 - LOB 产能表加载器
// ==========================================
// 职责: 文件 → CapacityTable
// 约定: 第一列为行键（stockcode），其余表头为列键（机号）
// 每个单元格在加载时按空位策略分类为 Empty / Reserved
// ==========================================

use crate::domain::capacity::{CapacityTable, Cell};
use crate::domain::types::EligibilityPolicy;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawSheet, UniversalFileParser};
use crate::importer::importer_trait::FileParser;
use std::path::Path;
use tracing::{debug, info, instrument, warn};

pub struct LobLoader {
    file_parser: Box<dyn FileParser>,
    policy: EligibilityPolicy,
}

impl LobLoader {
    pub fn new(file_parser: Box<dyn FileParser>, policy: EligibilityPolicy) -> Self {
        Self {
            file_parser,
            policy,
        }
    }

    /// 使用通用文件解析器
    pub fn with_policy(policy: EligibilityPolicy) -> Self {
        Self::new(Box::new(UniversalFileParser), policy)
    }

    /// 从文件加载产能表
    #[instrument(skip(self, file_path), fields(file = %file_path.as_ref().display(), policy = %self.policy))]
    pub fn load<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<CapacityTable> {
        let sheet = self.file_parser.parse_sheet(file_path.as_ref())?;
        if sheet.headers.is_empty() {
            return Err(ImportError::EmptySheet(file_path.as_ref().display().to_string()));
        }
        self.from_sheet(sheet)
    }

    /// 从已解析的表格构建产能表
    ///
    /// # 返回
    /// - Err(EmptySheet): 没有表头
    /// - Err(Table): 列键为空/重复、行键重复
    pub fn from_sheet(&self, sheet: RawSheet) -> ImportResult<CapacityTable> {
        let mut headers = sheet.headers;
        // Excel 区域右侧常带空白表头列；只丢弃整列都为空的列
        while headers.len() > 1 {
            let last = headers.len() - 1;
            let column_blank = headers[last].is_empty()
                && sheet
                    .rows
                    .iter()
                    .all(|r| r.values.get(last).map_or(true, |v| v.is_empty()));
            if !column_blank {
                break;
            }
            headers.pop();
        }
        // 其余空白表头按列位置命名，保留该列数据
        for (idx, header) in headers.iter_mut().enumerate().skip(1) {
            if header.is_empty() {
                *header = format!("Unnamed: {}", idx);
                warn!(column_index = idx, column_key = %header, "表头为空，按列位置命名");
            }
        }

        let Some((index_header, column_keys)) = headers.split_first() else {
            return Err(ImportError::EmptySheet("LOB 表缺少表头".to_string()));
        };
        let width = column_keys.len();

        let mut rows = Vec::with_capacity(sheet.rows.len());
        let mut skipped = 0usize;
        for row in sheet.rows {
            if row.values.iter().skip(width + 1).any(|v| !v.is_empty()) {
                warn!(
                    row_number = row.row_number,
                    columns = width,
                    "行内超出表头宽度的值已丢弃"
                );
            }
            let mut values = row.values.into_iter();
            let key = values.next().unwrap_or_default();
            if key.is_empty() {
                warn!(row_number = row.row_number, "行键为空，跳过该行");
                skipped += 1;
                continue;
            }

            let mut cells: Vec<Cell> = values
                .take(width)
                .map(|raw| Cell::classify(&raw, &self.policy))
                .collect();
            cells.resize(width, Cell::Empty);
            rows.push((key, cells));
        }

        let table = CapacityTable::new(column_keys.to_vec(), rows)?.with_index_header(index_header);

        let eligible: usize = table.rows().iter().map(|r| r.eligible_count()).sum();
        debug!(skipped = skipped, "空行键已跳过");
        info!(
            rows = table.rows().len(),
            columns = table.columns().len(),
            eligible_slots = eligible,
            "LOB 产能表加载完成"
        );

        Ok(table)
    }
}

impl Default for LobLoader {
    fn default() -> Self {
        Self::with_policy(EligibilityPolicy::default())
    }
}
