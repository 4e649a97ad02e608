//! End-to-end flows through the ledger: registration, stock movements,
//! history, and the failure paths callers rely on.

use shelftrack_catalog::ProductCode;
use shelftrack_core::DomainError;
use shelftrack_ledger::{Ledger, TransactionKind};
use shelftrack_shelf::{Column, ColumnSpec, Location};

fn column(letter: char) -> Column {
    Column::new(letter).unwrap()
}

fn location(letter: char, position: u32, level: u32) -> Location {
    Location::new(column(letter), position, level).unwrap()
}

fn code(s: &str) -> ProductCode {
    ProductCode::new(s).unwrap()
}

fn warehouse() -> Ledger {
    shelftrack_observability::init();
    let mut ledger = Ledger::new();
    for (letter, positions, levels) in [('A', 15, 3), ('B', 12, 4), ('C', 10, 3)] {
        ledger
            .add_column_with(column(letter), ColumnSpec::new(positions, levels).unwrap())
            .unwrap();
    }
    ledger
        .register_product(code("PRD001"), "プレミアムコーヒー豆", 24, 800)
        .unwrap();
    ledger
        .register_product(code("PRD002"), "オーガニック紅茶", 36, 720)
        .unwrap();
    ledger
}

#[test]
fn inbound_into_a_fresh_slot_creates_the_entry() {
    let mut ledger = warehouse();
    ledger
        .inbound(&code("PRD001"), location('A', 1, 1), 24)
        .unwrap();

    let product = ledger.product(&code("PRD001")).unwrap();
    assert_eq!(product.cases_at(&location('A', 1, 1)), Some(24));
    assert_eq!(product.total_cases(), 24);
    assert_eq!(product.total_quantity(), 24 * 24);

    let entry = ledger.history().iter_newest_first().next().unwrap();
    assert_eq!(entry.kind, TransactionKind::Inbound);
    assert_eq!(entry.to, Some(location('A', 1, 1)));
    assert_eq!(entry.from, None);
    assert_eq!(entry.cases, 24);
    assert_eq!(entry.quantity, 24 * 24);
}

#[test]
fn overdrawing_a_slot_fails_and_changes_nothing() {
    let mut ledger = warehouse();
    ledger
        .inbound(&code("PRD001"), location('A', 1, 1), 24)
        .unwrap();

    let err = ledger
        .outbound(&code("PRD001"), location('A', 1, 1), 30)
        .unwrap_err();
    match err {
        DomainError::InsufficientStock {
            requested: 30,
            available: 24,
        } => {}
        other => panic!("expected InsufficientStock, got {other:?}"),
    }

    let product = ledger.product(&code("PRD001")).unwrap();
    assert_eq!(product.cases_at(&location('A', 1, 1)), Some(24));
    assert_eq!(product.total_cases(), 24);
    assert_eq!(ledger.history().len(), 1);
}

#[test]
fn emptying_a_slot_removes_the_row_entirely() {
    let mut ledger = warehouse();
    ledger
        .inbound(&code("PRD001"), location('A', 1, 1), 24)
        .unwrap();
    ledger
        .outbound(&code("PRD001"), location('A', 1, 1), 24)
        .unwrap();

    let product = ledger.product(&code("PRD001")).unwrap();
    assert!(product.locations().is_empty());
    assert_eq!(product.total_cases(), 0);
    assert_eq!(product.total_quantity(), 0);
    assert_eq!(product.cases_at(&location('A', 1, 1)), None);
}

#[test]
fn moving_onto_the_same_slot_is_accepted_and_logged() {
    let mut ledger = warehouse();
    ledger
        .inbound(&code("PRD002"), location('A', 1, 1), 5)
        .unwrap();
    let history_len = ledger.history().len();

    ledger
        .move_stock(&code("PRD002"), location('A', 1, 1), location('A', 1, 1), 5)
        .unwrap();

    let product = ledger.product(&code("PRD002")).unwrap();
    assert_eq!(product.cases_at(&location('A', 1, 1)), Some(5));
    assert_eq!(product.total_cases(), 5);
    assert_eq!(product.locations().len(), 1);

    assert_eq!(ledger.history().len(), history_len + 1);
    let entry = ledger.history().iter_newest_first().next().unwrap();
    assert_eq!(entry.kind, TransactionKind::Move);
    assert_eq!(entry.from, Some(location('A', 1, 1)));
    assert_eq!(entry.to, Some(location('A', 1, 1)));
}

#[test]
fn deletion_is_blocked_until_stock_reaches_zero() {
    let mut ledger = warehouse();
    ledger
        .inbound(&code("PRD001"), location('B', 2, 1), 12)
        .unwrap();

    let err = ledger.delete_product(&code("PRD001")).unwrap_err();
    match err {
        DomainError::Conflict(_) => {}
        other => panic!("expected Conflict, got {other:?}"),
    }

    ledger
        .outbound(&code("PRD001"), location('B', 2, 1), 12)
        .unwrap();
    ledger.delete_product(&code("PRD001")).unwrap();
    assert!(ledger.product(&code("PRD001")).is_none());
    assert_eq!(ledger.product_count(), 1);
}

#[test]
fn a_day_of_movements_keeps_history_in_order() {
    let mut ledger = warehouse();
    let prd = code("PRD001");

    ledger.inbound(&prd, location('A', 1, 1), 24).unwrap();
    ledger.inbound(&prd, location('B', 3, 2), 26).unwrap();
    ledger
        .move_stock(&prd, location('A', 1, 1), location('C', 5, 3), 10)
        .unwrap();
    ledger.outbound(&prd, location('B', 3, 2), 6).unwrap();

    let product = ledger.product(&prd).unwrap();
    assert_eq!(product.total_cases(), 24 + 26 - 6);
    assert_eq!(product.total_quantity(), product.total_cases() * 24);

    let kinds: Vec<TransactionKind> = ledger
        .history()
        .iter_newest_first()
        .map(|t| t.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            TransactionKind::Outbound,
            TransactionKind::Move,
            TransactionKind::Inbound,
            TransactionKind::Inbound,
        ]
    );

    // Timestamps never decrease in creation order.
    let stamps: Vec<_> = ledger.history().iter().map(|t| t.timestamp).collect();
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}
