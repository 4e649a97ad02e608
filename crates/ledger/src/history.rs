use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use shelftrack_catalog::ProductCode;
use shelftrack_core::TransactionId;
use shelftrack_shelf::Location;

/// Direction of a stock movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Inbound,
    Outbound,
    Move,
}

impl TransactionKind {
    /// Operation label used by reports and the history export.
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Inbound => "入庫",
            TransactionKind::Outbound => "出庫",
            TransactionKind::Move => "移動",
        }
    }
}

/// One appended ledger fact. Treat as immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub timestamp: DateTime<Utc>,
    pub product_code: ProductCode,
    pub kind: TransactionKind,
    /// Cases moved; always positive.
    pub cases: u32,
    /// Individual items moved: `cases * quantity_per_case` at append time.
    pub quantity: u32,
    pub from: Option<Location>,
    pub to: Option<Location>,
}

/// Append-only transaction history.
///
/// Entries are stored in creation order; display and export read the log
/// newest first. Nothing is ever mutated or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLog {
    entries: Vec<Transaction>,
}

impl TransactionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(
        &mut self,
        product_code: ProductCode,
        kind: TransactionKind,
        cases: u32,
        quantity: u32,
        from: Option<Location>,
        to: Option<Location>,
    ) -> TransactionId {
        let id = TransactionId::new();
        self.entries.push(Transaction {
            id,
            timestamp: Utc::now(),
            product_code,
            kind,
            cases,
            quantity,
            from,
            to,
        });
        id
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Creation order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter()
    }

    /// Display order, newest first.
    pub fn iter_newest_first(&self) -> impl Iterator<Item = &Transaction> {
        self.entries.iter().rev()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ProductCode {
        ProductCode::new(s).unwrap()
    }

    #[test]
    fn kind_labels_match_report_vocabulary() {
        assert_eq!(TransactionKind::Inbound.label(), "入庫");
        assert_eq!(TransactionKind::Outbound.label(), "出庫");
        assert_eq!(TransactionKind::Move.label(), "移動");
    }

    #[test]
    fn log_appends_in_creation_order_and_displays_newest_first() {
        let mut log = TransactionLog::new();
        let first = log.append(code("PRD001"), TransactionKind::Inbound, 5, 120, None, None);
        let second = log.append(code("PRD002"), TransactionKind::Outbound, 2, 72, None, None);

        let oldest: Vec<_> = log.iter().map(|t| t.id).collect();
        assert_eq!(oldest, vec![first, second]);

        let newest: Vec<_> = log.iter_newest_first().map(|t| t.id).collect();
        assert_eq!(newest, vec![second, first]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn appended_ids_are_unique() {
        let mut log = TransactionLog::new();
        let a = log.append(code("PRD001"), TransactionKind::Inbound, 1, 24, None, None);
        let b = log.append(code("PRD001"), TransactionKind::Inbound, 1, 24, None, None);
        assert_ne!(a, b);
    }
}
