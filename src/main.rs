// ==========================================
// LOB 排位填充系统 - 命令行入口
// ==========================================
// 用法:
//   lob-filler <eta_file> <lob_file> [out_csv] [report_json] [config_json]
//
// 日志写 stderr（RUST_LOG 控制级别），摘要写 stdout
// ==========================================

use anyhow::{bail, Context};
use lob_filler::config::ConfigManager;
use lob_filler::engine::FillOrchestrator;
use lob_filler::exporter::{
    render_ignored_preview, render_leftover_lines, write_report_json, write_table_csv,
    AllocationReport,
};
use lob_filler::importer::{EtaImporter, ImportError, LobLoader};
use lob_filler::logging;
use std::path::PathBuf;

const DEFAULT_OUT_CSV: &str = "filled_eta_table.csv";
const DEFAULT_REPORT_JSON: &str = "filled_eta_report.json";

fn main() -> anyhow::Result<()> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let (Some(eta_path), Some(lob_path)) = (args.next(), args.next()) else {
        bail!("用法: lob-filler <eta_file> <lob_file> [out_csv] [report_json] [config_json]");
    };
    let out_csv = PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_OUT_CSV.to_string()));
    let report_json =
        PathBuf::from(args.next().unwrap_or_else(|| DEFAULT_REPORT_JSON.to_string()));
    let config_path = args.next().map(PathBuf::from);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", lob_filler::APP_NAME, lob_filler::VERSION);
    tracing::info!("==================================================");

    // 加载配置
    let manager = ConfigManager::load(config_path.as_deref()).context("配置加载失败")?;
    tracing::info!(source = ?manager.source(), "配置已加载");
    tracing::debug!(config = %manager.snapshot_json()?, "当前配置");
    let config = manager.into_config();

    // 导入 ETA
    let importer = EtaImporter::with_columns(config.columns.clone());
    let eta = match importer.import(&eta_path) {
        Ok(eta) => eta,
        Err(ImportError::BlockedByDataQuality { blocked, samples }) => {
            eprintln!("ETA 数据质量校验未通过（{} 行）:", blocked);
            for v in &samples {
                eprintln!("  行 {} [{}] {}", v.row_number, v.field, v.message);
            }
            bail!("ETA 导入被阻断，请修正后重试");
        }
        Err(e) => return Err(e).context(format!("ETA 导入失败: {}", eta_path)),
    };

    // 加载 LOB
    let table = LobLoader::with_policy(config.eligibility.clone())
        .load(&lob_path)
        .with_context(|| format!("LOB 加载失败: {}", lob_path))?;

    // 排位填充
    let result = FillOrchestrator::new(config.marker.clone()).run(table, eta.records)?;

    // 导出
    write_table_csv(&result.table, &out_csv)
        .with_context(|| format!("写入失败: {}", out_csv.display()))?;
    let report = AllocationReport::from_result(&result);
    write_report_json(&report, &report_json)
        .with_context(|| format!("写入失败: {}", report_json.display()))?;

    // 摘要
    if config.report.show_ignored && !result.ignored.is_empty() {
        println!(
            "Ignored {} stockcode(s) not in LOB: {}",
            result.ignored.len(),
            render_ignored_preview(&result.ignored, config.report.ignored_preview_limit)
        );
    }
    if !result.leftovers.is_empty() {
        println!("Partial shipsets were not placed:");
        for line in render_leftover_lines(&result.leftovers) {
            println!("{}", line);
        }
    }
    if !result.unplaced.is_empty() {
        println!("Rows without enough empty slots:");
        for (key, slots) in result.unplaced.iter() {
            println!("- {}: {} slot(s) unplaced", key, slots);
        }
    }
    println!(
        "Placed {} of {} slot(s). Saved: {}, {}",
        result.summary.slots_placed,
        result.summary.slots_requested,
        out_csv.display(),
        report_json.display()
    );

    Ok(())
}
