// ==========================================
// SlotAllocator / FillOrchestrator 集成测试
// ==========================================
// 测试目标: 验证排位填充主流程
// 覆盖范围: 套装余料、表满未放置、保留格保护、到货排序
// ==========================================

mod helpers;

use helpers::{jan, ShipmentBuilder, TableBuilder};
use lob_filler::domain::capacity::Cell;
use lob_filler::domain::types::EligibilityPolicy;
use lob_filler::engine::{AllocationError, FillOrchestrator};
use lob_filler::logging;

fn label(result: &lob_filler::AllocationResult, row: &str, col: &str) -> String {
    result
        .table
        .cell(row, col)
        .map(|c| c.display_text().to_string())
        .unwrap_or_default()
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_shipset_remainder_recorded_as_leftover() {
    logging::init_test();

    let table = TableBuilder::with_width(3).empty_row("R1").build();
    let records = vec![
        ShipmentBuilder::new("R1").qty(5).per_set(2.0).eta(jan(1)).build(),
        ShipmentBuilder::new("R1").qty(2).per_set(2.0).eta(jan(2)).build(),
    ];

    let result = FillOrchestrator::default().run(table, records).unwrap();

    assert_eq!(label(&result, "R1", "AC1"), "Sup1-01/01/25");
    assert_eq!(label(&result, "R1", "AC2"), "Sup1-01/01/25");
    assert_eq!(label(&result, "R1", "AC3"), "Sup1-01/02/25");
    assert_eq!(result.leftovers.get("R1"), Some(1.0));
    assert!(result.unplaced.is_empty());
    assert_eq!(result.summary.slots_requested, 3);
    assert_eq!(result.summary.slots_placed, 3);
}

#[test]
fn test_full_row_reports_unplaced_without_leftover() {
    logging::init_test();

    let table = TableBuilder::with_width(3).empty_row("R1").build();
    let records = vec![
        ShipmentBuilder::new("R1").qty(5).per_set(2.0).eta(jan(1)).build(),
        ShipmentBuilder::new("R1").qty(2).per_set(2.0).eta(jan(2)).build(),
        ShipmentBuilder::new("R1").qty(2).per_set(2.0).eta(jan(3)).build(),
    ];

    let result = FillOrchestrator::default().run(table, records).unwrap();

    assert_eq!(result.unplaced.get("R1"), Some(1));
    // 余料只来自第一条的套装尾数
    assert_eq!(result.leftovers.get("R1"), Some(1.0));
    assert_eq!(result.summary.slots_unplaced, 1);
    assert_eq!(result.table.filled_count(), 3);
}

#[test]
fn test_reserved_cells_are_never_overwritten() {
    let table = TableBuilder::with_width(4)
        .row("R1", &["Stock", "", "Shipped", ""])
        .build();
    let records = vec![ShipmentBuilder::new("R1").qty(3).eta(jan(5)).build()];

    let result = FillOrchestrator::default().run(table, records).unwrap();

    assert_eq!(
        result.table.cell("R1", "AC1"),
        Some(&Cell::Reserved("Stock".to_string()))
    );
    assert_eq!(
        result.table.cell("R1", "AC3"),
        Some(&Cell::Reserved("Shipped".to_string()))
    );
    assert_eq!(label(&result, "R1", "AC2"), "Sup1-01/05/25");
    assert_eq!(label(&result, "R1", "AC4"), "Sup1-01/05/25");
    assert_eq!(result.unplaced.get("R1"), Some(1));
}

#[test]
fn test_sentinel_policy_makes_stock_cells_fillable() {
    let table = TableBuilder::with_width(2)
        .policy(EligibilityPolicy::SentinelAsEmpty {
            sentinels: vec!["Stock".to_string()],
        })
        .row("R1", &["Stock", "Hold"])
        .build();
    let records = vec![ShipmentBuilder::new("R1").qty(2).build()];

    let result = FillOrchestrator::default().run(table, records).unwrap();

    assert_eq!(label(&result, "R1", "AC1"), "Sup1-N/A");
    assert_eq!(label(&result, "R1", "AC2"), "Hold");
    assert_eq!(result.unplaced.get("R1"), Some(1));
}

#[test]
fn test_earlier_eta_placed_first_regardless_of_input_order() {
    let table = TableBuilder::with_width(3).empty_row("R1").build();
    let records = vec![
        ShipmentBuilder::new("R1").supplier("Sup2").qty(1).build(),
        ShipmentBuilder::new("R1").supplier("Sup1").qty(1).eta(jan(9)).build(),
        ShipmentBuilder::new("R1").supplier("Sup2").qty(1).eta(jan(3)).build(),
    ];

    let result = FillOrchestrator::default().run(table, records).unwrap();

    assert_eq!(label(&result, "R1", "AC1"), "Sup2-01/03/25");
    assert_eq!(label(&result, "R1", "AC2"), "Sup1-01/09/25");
    assert_eq!(label(&result, "R1", "AC3"), "Sup2-N/A");
}

#[test]
fn test_rows_are_filled_independently() {
    let table = TableBuilder::with_width(2)
        .empty_row("R1")
        .empty_row("R2")
        .build();
    let records = vec![
        ShipmentBuilder::new("R2").qty(1).eta(jan(2)).build(),
        ShipmentBuilder::new("R1").qty(3).eta(jan(1)).build(),
    ];

    let result = FillOrchestrator::default().run(table, records).unwrap();

    assert_eq!(result.unplaced.get("R1"), Some(1));
    assert_eq!(result.unplaced.get("R2"), None);
    assert_eq!(label(&result, "R2", "AC1"), "Sup1-01/02/25");
    assert_eq!(label(&result, "R2", "AC2"), "");
}

#[test]
fn test_negative_quantity_rejected_without_mutation() {
    let table = TableBuilder::with_width(2).empty_row("R1").build();
    let records = vec![
        ShipmentBuilder::new("R1").qty(1).build(),
        ShipmentBuilder::new("GHOST").qty(-2).build(),
    ];

    let err = FillOrchestrator::default().run(table, records).unwrap_err();

    assert!(matches!(
        err,
        AllocationError::InvalidRecord { input_index: 1, .. }
    ));
}

#[test]
fn test_non_positive_pieces_per_unit_rejected() {
    let table = TableBuilder::with_width(2).empty_row("R1").build();
    let records = vec![ShipmentBuilder::new("R1").qty(4).per_set(0.0).build()];

    let err = FillOrchestrator::default().run(table, records).unwrap_err();

    assert!(matches!(err, AllocationError::InvalidRecord { .. }));
}
