//! CSV report writers.
//!
//! Every export is UTF-8 with a leading BOM so the files open cleanly in
//! the spreadsheet tools the warehouse staff use. Column labels, the
//! timestamp format, and the location labels follow the report contract.

use std::io::Write;

use csv::Writer;

use shelftrack_ledger::Ledger;
use shelftrack_shelf::Location;

use crate::error::ExportResult;
use crate::import::{ASSIGNMENT_HEADERS, PRODUCT_HEADERS};

const BOM: &[u8] = "\u{feff}".as_bytes();

/// Header row of the current-inventory report.
pub const INVENTORY_HEADERS: [&str; 5] = ["商品コード", "商品名", "総ケース数", "総在庫数", "最小在庫数"];

/// Header row of the low-stock report.
pub const ALERT_HEADERS: [&str; 5] = ["商品コード", "商品名", "現在庫数", "最小在庫数", "不足数"];

/// Header row of the transaction history report.
pub const HISTORY_HEADERS: [&str; 8] =
    ["日時", "商品コード", "商品名", "操作", "ケース数", "数量", "移動元", "移動先"];

/// Sample product catalog file, matching the import contract.
pub const PRODUCT_TEMPLATE: &str = "商品コード,商品名,ケースあたりの数量,最小在庫数\n\
                                    PRD001,プレミアムコーヒー豆,24,800\n\
                                    PRD002,オーガニック紅茶,36,720\n\
                                    PRD003,抹茶パウダー,20,400\n";

/// Sample shelf assignment file, matching the import contract.
pub const ASSIGNMENT_TEMPLATE: &str = "商品コード,列,番目,レベル,ケース数\n\
                                       PRD001,A,1,1,24\n\
                                       PRD001,B,3,2,26\n\
                                       PRD002,A,1,1,12\n";

/// Current inventory status, one row per product in code order.
pub fn export_inventory(ledger: &Ledger) -> ExportResult<Vec<u8>> {
    let mut writer = bom_writer();
    writer.write_record(INVENTORY_HEADERS)?;
    for product in ledger.products() {
        writer.write_record(vec![
            product.code().to_string(),
            product.name().to_string(),
            product.total_cases().to_string(),
            product.total_quantity().to_string(),
            product.minimum_stock().to_string(),
        ])?;
    }
    finish(writer)
}

/// Products below their minimum, with the shortfall.
pub fn export_alerts(ledger: &Ledger) -> ExportResult<Vec<u8>> {
    let mut writer = bom_writer();
    writer.write_record(ALERT_HEADERS)?;
    for alert in ledger.low_stock_alerts() {
        writer.write_record(vec![
            alert.code.to_string(),
            alert.name.clone(),
            alert.total_quantity.to_string(),
            alert.minimum_stock.to_string(),
            alert.shortfall.to_string(),
        ])?;
    }
    finish(writer)
}

/// Transaction history, newest first.
pub fn export_history(ledger: &Ledger) -> ExportResult<Vec<u8>> {
    let mut writer = bom_writer();
    writer.write_record(HISTORY_HEADERS)?;
    for tx in ledger.history().iter_newest_first() {
        let name = ledger
            .product(&tx.product_code)
            .map(|p| p.name().to_string())
            .unwrap_or_default();
        writer.write_record(vec![
            tx.timestamp.format("%Y/%m/%d %H:%M:%S").to_string(),
            tx.product_code.to_string(),
            name,
            tx.kind.label().to_string(),
            tx.cases.to_string(),
            tx.quantity.to_string(),
            location_label(tx.from),
            location_label(tx.to),
        ])?;
    }
    finish(writer)
}

/// The catalog in product-import format, so an exported file can be fed
/// back through `import_products` on another ledger.
pub fn export_product_catalog(ledger: &Ledger) -> ExportResult<Vec<u8>> {
    let mut writer = bom_writer();
    writer.write_record(PRODUCT_HEADERS)?;
    for product in ledger.products() {
        writer.write_record(vec![
            product.code().to_string(),
            product.name().to_string(),
            product.quantity_per_case().to_string(),
            product.minimum_stock().to_string(),
        ])?;
    }
    finish(writer)
}

/// Shelf assignments in import format, one row per stocked entry.
pub fn export_assignments(ledger: &Ledger) -> ExportResult<Vec<u8>> {
    let mut writer = bom_writer();
    writer.write_record(ASSIGNMENT_HEADERS)?;
    for product in ledger.products() {
        for entry in product.locations() {
            writer.write_record(vec![
                product.code().to_string(),
                entry.location.column.to_string(),
                entry.location.position.to_string(),
                entry.location.level.to_string(),
                entry.cases.to_string(),
            ])?;
        }
    }
    finish(writer)
}

fn location_label(location: Option<Location>) -> String {
    location.map(|l| l.to_string()).unwrap_or_default()
}

fn bom_writer() -> Writer<Vec<u8>> {
    let mut buffer = Vec::new();
    // Writing the BOM into a Vec cannot fail.
    let _ = buffer.write_all(BOM);
    Writer::from_writer(buffer)
}

fn finish(writer: Writer<Vec<u8>>) -> ExportResult<Vec<u8>> {
    writer.into_inner().map_err(|e| e.into_error().into())
}
