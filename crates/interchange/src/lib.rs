//! `shelftrack-interchange` — CSV import reconciliation and report export.
//!
//! This is the I/O boundary of the system: it decodes CSV files into rows,
//! enforces the header contracts, and reconciles surviving rows into the
//! ledger; on the way out it renders the ledger's projections as UTF-8 CSV
//! with a BOM, the format the original spreadsheets expect.

pub mod error;
pub mod export;
pub mod import;

pub use error::{ExportError, ExportResult, ImportError, ImportResult};
pub use export::{
    export_alerts, export_assignments, export_history, export_inventory, export_product_catalog,
};
pub use import::{
    import_assignments, import_products, AssignmentImportSummary, ProductImportSummary,
};
