//! `shelftrack-ledger` — the inventory mutation engine.
//!
//! One [`Ledger`] value owns the product catalog, the shelf layout, and the
//! append-only transaction log. Every mutating operation validates against
//! the current state before touching any field, so callers never observe a
//! partially applied change. Read-side display concerns (level folding,
//! slot status, alerts) live in [`projections`].

pub mod history;
pub mod ledger;
pub mod projections;

pub use history::{Transaction, TransactionKind, TransactionLog};
pub use ledger::Ledger;
pub use projections::{LowStockAlert, OverviewStats, SlotStatus, SlotStock};
