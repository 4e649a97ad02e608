//! Read-side projections over the ledger.
//!
//! Everything here borrows the ledger immutably. Display concerns such as
//! level folding and the slot occupancy status never rewrite stored state;
//! entries keep their true physical level.

use serde::Serialize;

use shelftrack_catalog::{Product, ProductCode, StockedLocation};
use shelftrack_shelf::Column;

use crate::ledger::Ledger;

/// Slots holding this many cases or more render as full in the viewer.
/// Display threshold only; the ledger never caps a slot.
pub const FULL_SLOT_CASES: u32 = 30;

/// Displayed level into which all physical levels >= 3 fold.
pub const FOLD_LEVEL: u32 = 3;

/// Stock summed for one product at one displayed slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotStock {
    pub code: ProductCode,
    pub name: String,
    pub cases: u32,
    pub quantity: u32,
}

/// Display state of one slot in the shelf grid.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Empty,
    Occupied,
    Full,
}

/// A product whose stock sits below its configured minimum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LowStockAlert {
    pub code: ProductCode,
    pub name: String,
    pub total_quantity: u32,
    pub minimum_stock: u32,
    pub shortfall: u32,
}

/// Headline numbers for the dashboard.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewStats {
    pub products: usize,
    pub stocked_products: usize,
    pub low_stock_alerts: usize,
    pub total_quantity: u64,
}

/// Whether an entry at `actual_level` shows up at `display_level`.
///
/// The viewer draws three levels; everything at physical level 3 or above
/// folds into the top one, levels 1 and 2 match exactly.
fn folds_into(actual_level: u32, display_level: u32) -> bool {
    if display_level >= FOLD_LEVEL {
        actual_level >= FOLD_LEVEL
    } else {
        actual_level == display_level
    }
}

impl Ledger {
    /// Stock visible at one displayed slot, cases summed per product.
    pub fn slot_stock(&self, column: Column, position: u32, display_level: u32) -> Vec<SlotStock> {
        self.products()
            .filter_map(|product| {
                let cases: u32 = product
                    .locations()
                    .iter()
                    .filter(|entry| {
                        entry.location.column == column
                            && entry.location.position == position
                            && folds_into(entry.location.level, display_level)
                    })
                    .map(|entry| entry.cases)
                    .sum();
                (cases > 0).then(|| SlotStock {
                    code: product.code().clone(),
                    name: product.name().to_string(),
                    cases,
                    quantity: cases * product.quantity_per_case(),
                })
            })
            .collect()
    }

    /// Display state of one slot.
    pub fn slot_status(&self, column: Column, position: u32, display_level: u32) -> SlotStatus {
        let total: u32 = self
            .slot_stock(column, position, display_level)
            .iter()
            .map(|s| s.cases)
            .sum();
        if total == 0 {
            SlotStatus::Empty
        } else if total >= FULL_SLOT_CASES {
            SlotStatus::Full
        } else {
            SlotStatus::Occupied
        }
    }

    /// Products below their configured minimum, in code order.
    pub fn low_stock_alerts(&self) -> Vec<LowStockAlert> {
        self.products()
            .filter(|p| p.is_low_stock())
            .map(|p| LowStockAlert {
                code: p.code().clone(),
                name: p.name().to_string(),
                total_quantity: p.total_quantity(),
                minimum_stock: p.minimum_stock(),
                shortfall: p.minimum_stock() - p.total_quantity(),
            })
            .collect()
    }

    /// Headline numbers for the dashboard.
    pub fn overview(&self) -> OverviewStats {
        OverviewStats {
            products: self.product_count(),
            stocked_products: self.products().filter(|p| p.total_cases() > 0).count(),
            low_stock_alerts: self.products().filter(|p| p.is_low_stock()).count(),
            total_quantity: self.products().map(|p| u64::from(p.total_quantity())).sum(),
        }
    }

    /// Case-insensitive substring search over product codes and names.
    pub fn search(&self, term: &str) -> Vec<&Product> {
        let needle = term.to_lowercase();
        self.products()
            .filter(|p| {
                p.code().as_str().to_lowercase().contains(&needle)
                    || p.name().to_lowercase().contains(&needle)
            })
            .collect()
    }

    /// Stocked entries for one product, for the viewer's jump list.
    pub fn product_locations(&self, code: &ProductCode) -> Option<&[StockedLocation]> {
        self.product(code).map(|p| p.locations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelftrack_shelf::{ColumnSpec, Location};

    fn column(letter: char) -> Column {
        Column::new(letter).unwrap()
    }

    fn location(letter: char, position: u32, level: u32) -> Location {
        Location::new(column(letter), position, level).unwrap()
    }

    fn code(s: &str) -> ProductCode {
        ProductCode::new(s).unwrap()
    }

    fn seeded_ledger() -> Ledger {
        let mut ledger = Ledger::new();
        ledger
            .add_column_with(column('A'), ColumnSpec::new(15, 3).unwrap())
            .unwrap();
        ledger
            .add_column_with(column('B'), ColumnSpec::new(12, 5).unwrap())
            .unwrap();
        ledger
            .register_product(code("PRD001"), "プレミアムコーヒー豆", 24, 800)
            .unwrap();
        ledger
            .register_product(code("PRD002"), "オーガニック紅茶", 36, 720)
            .unwrap();
        ledger
    }

    #[test]
    fn display_level_three_folds_higher_levels() {
        let mut ledger = seeded_ledger();
        ledger.inbound(&code("PRD001"), location('B', 3, 3), 4).unwrap();
        ledger.inbound(&code("PRD001"), location('B', 3, 4), 6).unwrap();
        ledger.inbound(&code("PRD001"), location('B', 3, 5), 2).unwrap();
        ledger.inbound(&code("PRD001"), location('B', 3, 2), 9).unwrap();

        let folded = ledger.slot_stock(column('B'), 3, 3);
        assert_eq!(folded.len(), 1);
        assert_eq!(folded[0].cases, 12);
        assert_eq!(folded[0].quantity, 12 * 24);

        let exact = ledger.slot_stock(column('B'), 3, 2);
        assert_eq!(exact[0].cases, 9);

        assert!(ledger.slot_stock(column('B'), 3, 1).is_empty());
    }

    #[test]
    fn folding_is_invariant_under_level_splits() {
        // One entry at level 4 vs the same cases split across levels 3
        // and 5: the displayed level-3 sum must not change.
        let mut merged = seeded_ledger();
        merged.inbound(&code("PRD001"), location('B', 7, 4), 10).unwrap();

        let mut split = seeded_ledger();
        split.inbound(&code("PRD001"), location('B', 7, 3), 6).unwrap();
        split.inbound(&code("PRD001"), location('B', 7, 5), 4).unwrap();

        let sum = |ledger: &Ledger| -> u32 {
            ledger
                .slot_stock(column('B'), 7, 3)
                .iter()
                .map(|s| s.cases)
                .sum()
        };
        assert_eq!(sum(&merged), sum(&split));
        assert_eq!(sum(&merged), 10);
    }

    #[test]
    fn fold_groups_products_separately() {
        let mut ledger = seeded_ledger();
        ledger.inbound(&code("PRD001"), location('A', 1, 1), 12).unwrap();
        ledger.inbound(&code("PRD002"), location('A', 1, 1), 5).unwrap();

        let stock = ledger.slot_stock(column('A'), 1, 1);
        assert_eq!(stock.len(), 2);
        let cases: Vec<u32> = stock.iter().map(|s| s.cases).collect();
        assert_eq!(cases, vec![12, 5]);
    }

    #[test]
    fn slot_status_thresholds() {
        let mut ledger = seeded_ledger();
        assert_eq!(ledger.slot_status(column('A'), 2, 1), SlotStatus::Empty);

        ledger.inbound(&code("PRD001"), location('A', 2, 1), 29).unwrap();
        assert_eq!(ledger.slot_status(column('A'), 2, 1), SlotStatus::Occupied);

        ledger.inbound(&code("PRD002"), location('A', 2, 1), 1).unwrap();
        assert_eq!(ledger.slot_status(column('A'), 2, 1), SlotStatus::Full);
    }

    #[test]
    fn low_stock_alerts_report_the_shortfall() {
        let mut ledger = seeded_ledger();
        // 24 * 24 = 576 < 800; PRD002 stays at zero and is also low.
        ledger.inbound(&code("PRD001"), location('A', 1, 1), 24).unwrap();

        let alerts = ledger.low_stock_alerts();
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].code, code("PRD001"));
        assert_eq!(alerts[0].total_quantity, 576);
        assert_eq!(alerts[0].shortfall, 800 - 576);

        // Push PRD001 above its minimum; only PRD002 remains.
        ledger.inbound(&code("PRD001"), location('A', 1, 2), 20).unwrap();
        let alerts = ledger.low_stock_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].code, code("PRD002"));
    }

    #[test]
    fn overview_counts_products_and_stock() {
        let mut ledger = seeded_ledger();
        ledger.inbound(&code("PRD001"), location('A', 1, 1), 40).unwrap();

        let stats = ledger.overview();
        assert_eq!(stats.products, 2);
        assert_eq!(stats.stocked_products, 1);
        assert_eq!(stats.low_stock_alerts, 1);
        assert_eq!(stats.total_quantity, 40 * 24);
    }

    #[test]
    fn search_matches_code_or_name_case_insensitively() {
        let ledger = seeded_ledger();
        assert_eq!(ledger.search("prd0").len(), 2);
        assert_eq!(ledger.search("紅茶").len(), 1);
        assert_eq!(ledger.search("PRD002").len(), 1);
        assert!(ledger.search("なし").is_empty());
    }

    #[test]
    fn product_locations_exposes_the_jump_list() {
        let mut ledger = seeded_ledger();
        ledger.inbound(&code("PRD001"), location('A', 1, 1), 3).unwrap();
        let entries = ledger.product_locations(&code("PRD001")).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].location, location('A', 1, 1));
        assert!(ledger.product_locations(&code("NOPE")).is_none());
    }
}
