//! Bulk CSV import reconciler.
//!
//! Two file kinds: product catalog rows and shelf assignment rows. The
//! header row must match the expected labels in order (extra trailing
//! columns are tolerated). Silent-skip policy: rows with empty or
//! unparsable required fields, assignment rows whose slot lies outside the
//! configured layout, and assignment rows for unknown product codes are
//! dropped and logged while everything else imports. Only a header
//! mismatch or an import that would apply nothing at all is an error.

use std::io::Read;

use csv::ReaderBuilder;
use serde::Serialize;
use tracing::{debug, warn};

use shelftrack_catalog::{ProductCode, StockedLocation};
use shelftrack_ledger::Ledger;
use shelftrack_shelf::{Column, Location};

use crate::error::{ImportError, ImportResult};

/// Header row of a product catalog file.
pub const PRODUCT_HEADERS: [&str; 4] = ["商品コード", "商品名", "ケースあたりの数量", "最小在庫数"];

/// Header row of a shelf assignment file.
pub const ASSIGNMENT_HEADERS: [&str; 5] = ["商品コード", "列", "番目", "レベル", "ケース数"];

/// Outcome of a product catalog import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductImportSummary {
    /// Products newly registered.
    pub registered: usize,
    /// Rows dropped for empty or unparsable required fields.
    pub skipped_rows: usize,
    /// Rows dropped because the code is already in the catalog.
    pub duplicate_codes: usize,
}

/// Outcome of a shelf assignment import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssignmentImportSummary {
    /// Products whose distribution was replaced.
    pub products_updated: usize,
    /// Assignment rows applied (one history entry each).
    pub applied_rows: usize,
    /// Rows dropped for empty/unparsable fields or out-of-layout slots.
    pub skipped_rows: usize,
    /// Distinct codes ignored because no such product is registered.
    pub unknown_codes: usize,
}

/// Register catalog rows into the ledger.
///
/// Existing codes are never overwritten; new products start with an empty
/// distribution and zero totals.
pub fn import_products<R: Read>(
    ledger: &mut Ledger,
    reader: R,
) -> ImportResult<ProductImportSummary> {
    let rows = read_rows(reader, &PRODUCT_HEADERS)?;

    let mut summary = ProductImportSummary {
        registered: 0,
        skipped_rows: 0,
        duplicate_codes: 0,
    };
    let mut candidates = 0usize;

    for row in rows {
        if row.len() < PRODUCT_HEADERS.len() || row[..4].iter().any(|cell| cell.is_empty()) {
            summary.skipped_rows += 1;
            continue;
        }
        let (Ok(quantity_per_case), Ok(minimum_stock)) =
            (row[2].parse::<u32>(), row[3].parse::<u32>())
        else {
            warn!(code = %row[0], "skipping product row with unparsable numbers");
            summary.skipped_rows += 1;
            continue;
        };
        let Ok(code) = ProductCode::new(row[0].as_str()) else {
            summary.skipped_rows += 1;
            continue;
        };
        candidates += 1;

        if ledger.product(&code).is_some() {
            debug!(code = %code, "product code already registered, row dropped");
            summary.duplicate_codes += 1;
            continue;
        }
        match ledger.register_product(code.clone(), &row[1], quantity_per_case, minimum_stock) {
            Ok(_) => summary.registered += 1,
            Err(err) => {
                warn!(code = %code, %err, "product row rejected by the ledger");
                summary.skipped_rows += 1;
            }
        }
    }

    if summary.registered == 0 {
        let reason = if candidates > 0 && summary.duplicate_codes == candidates {
            "every product code already exists"
        } else {
            "no valid product rows found"
        };
        return Err(ImportError::NoValidRows(reason.to_string()));
    }
    Ok(summary)
}

/// Reconcile shelf assignment rows into the ledger.
///
/// Rows are grouped by product code; each matching product's entire
/// distribution is replaced by its group (not merged with what was there)
/// and one inbound history entry is appended per applied row. Unknown
/// codes are ignored.
pub fn import_assignments<R: Read>(
    ledger: &mut Ledger,
    reader: R,
) -> ImportResult<AssignmentImportSummary> {
    let rows = read_rows(reader, &ASSIGNMENT_HEADERS)?;

    let mut summary = AssignmentImportSummary {
        products_updated: 0,
        applied_rows: 0,
        skipped_rows: 0,
        unknown_codes: 0,
    };

    // Parse and filter, preserving file order within each product group.
    let mut groups: Vec<(ProductCode, Vec<StockedLocation>)> = Vec::new();
    for row in rows {
        let Some((code, entry)) = parse_assignment_row(ledger, &row) else {
            summary.skipped_rows += 1;
            continue;
        };
        match groups.iter_mut().find(|(c, _)| *c == code) {
            Some((_, entries)) => entries.push(entry),
            None => groups.push((code, vec![entry])),
        }
    }

    if groups.is_empty() {
        return Err(ImportError::NoValidRows(
            "no valid shelf assignment rows found".to_string(),
        ));
    }

    for (code, entries) in groups {
        if ledger.product(&code).is_none() {
            debug!(code = %code, "assignment rows for unknown product ignored");
            summary.unknown_codes += 1;
            continue;
        }
        let applied = entries.len();
        ledger.replace_product_locations(&code, entries)?;
        summary.products_updated += 1;
        summary.applied_rows += applied;
    }
    Ok(summary)
}

fn parse_assignment_row(ledger: &Ledger, row: &[String]) -> Option<(ProductCode, StockedLocation)> {
    if row.len() < ASSIGNMENT_HEADERS.len() || row[..5].iter().any(|cell| cell.is_empty()) {
        return None;
    }
    let code = ProductCode::new(row[0].as_str()).ok()?;
    let column = row[1].parse::<Column>().ok()?;
    let position = row[2].parse::<u32>().ok()?;
    let level = row[3].parse::<u32>().ok()?;
    let cases = row[4].parse::<u32>().ok()?;
    if cases == 0 {
        return None;
    }
    let location = Location::new(column, position, level).ok()?;
    if let Err(err) = ledger.layout().validate(&location) {
        warn!(code = %code, %location, %err, "assignment row outside the shelf layout, skipped");
        return None;
    }
    Some((code, StockedLocation { location, cases }))
}

/// Decode a CSV stream, enforce the header contract, and return trimmed
/// data rows with fully blank rows dropped.
fn read_rows<R: Read>(
    reader: R,
    expected: &'static [&'static str],
) -> ImportResult<Vec<Vec<String>>> {
    let mut csv = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut headers: Vec<String> = csv
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    // Spreadsheet exports often carry a BOM on the first cell.
    if let Some(first) = headers.first_mut() {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.trim().to_string();
        }
    }

    let matches = headers.len() >= expected.len()
        && expected.iter().zip(&headers).all(|(want, got)| got == want);
    if !matches {
        return Err(ImportError::HeaderMismatch {
            expected,
            found: headers,
        });
    }

    let mut rows = Vec::new();
    for record in csv.records() {
        let record = record?;
        let row: Vec<String> = record.iter().map(|cell| cell.trim().to_string()).collect();
        if row.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        rows.push(row);
    }
    Ok(rows)
}
