// ==========================================
// LOB 排位填充系统 - 填充报告导出
// ==========================================
// AllocationReport: 余料 / 忽略 / 未放置 / 带颜色的放置记录 / 汇总
// 文本消息: 余料行、忽略行键预览
// ==========================================

use crate::domain::report::{
    AllocationResult, AllocationSummary, IgnoredSet, LeftoverReport, UnplacedReport,
};
use crate::exporter::error::ExportResult;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

// ==========================================
// StyledPlacement - 带样式的放置记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyledPlacement {
    pub row: String,
    pub column: String,
    pub label: String,
    pub color: String,
}

// ==========================================
// AllocationReport - 填充报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    pub summary: AllocationSummary,
    pub leftovers: LeftoverReport,
    pub ignored: IgnoredSet,
    pub unplaced: UnplacedReport,
    pub placements: Vec<StyledPlacement>,
}

impl AllocationReport {
    /// 由填充结果构建（放置记录保持放置顺序）
    pub fn from_result(result: &AllocationResult) -> Self {
        let placements = result
            .placements
            .iter()
            .map(|p| StyledPlacement {
                row: p.row_key.clone(),
                column: p.column_key.clone(),
                label: p.marker.label.clone(),
                color: p.marker.color_key.clone(),
            })
            .collect();

        Self {
            summary: result.summary.clone(),
            leftovers: result.leftovers.clone(),
            ignored: result.ignored.clone(),
            unplaced: result.unplaced.clone(),
            placements,
        }
    }
}

/// 将报告写入 JSON 文件（pretty 格式）
pub fn write_report_json<P: AsRef<Path>>(report: &AllocationReport, path: P) -> ExportResult<()> {
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    info!(
        path = %path.as_ref().display(),
        placements = report.placements.len(),
        "填充报告已导出"
    );
    Ok(())
}

/// 件数文本（整数不带 ".0"）
pub fn format_pieces(pieces: f64) -> String {
    if pieces.fract() == 0.0 {
        format!("{:.0}", pieces)
    } else {
        format!("{}", pieces)
    }
}

/// 余料消息，每行 "- {row}: {pcs} pcs leftover"，按行键排序
pub fn render_leftover_lines(leftovers: &LeftoverReport) -> Vec<String> {
    leftovers
        .iter()
        .map(|(key, pcs)| format!("- {}: {} pcs leftover", key, format_pieces(pcs)))
        .collect()
}

/// 忽略行键预览（最多 limit 个，超出时追加 " ..."）
pub fn render_ignored_preview(ignored: &IgnoredSet, limit: usize) -> String {
    let mut text = ignored
        .iter()
        .take(limit)
        .collect::<Vec<_>>()
        .join(", ");
    if ignored.len() > limit {
        text.push_str(" ...");
    }
    text
}
