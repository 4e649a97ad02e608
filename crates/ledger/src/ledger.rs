use std::collections::BTreeMap;

use tracing::info;

use shelftrack_catalog::{Product, ProductCode, StockedLocation};
use shelftrack_core::{DomainError, DomainResult, TransactionId};
use shelftrack_shelf::{Column, ColumnSpec, Location, ShelfLayout};

use crate::history::{TransactionKind, TransactionLog};

/// Authoritative owner of the product catalog, the shelf layout, and the
/// transaction history.
///
/// All precondition checks live here (or in the types this delegates to),
/// so every caller (forms, bulk import, tests) gets identical validation.
/// Each operation validates first and mutates after; an error return means
/// nothing changed.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    products: BTreeMap<ProductCode, Product>,
    layout: ShelfLayout,
    log: TransactionLog,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_layout(layout: ShelfLayout) -> Self {
        Self {
            layout,
            ..Self::default()
        }
    }

    pub fn product(&self, code: &ProductCode) -> Option<&Product> {
        self.products.get(code)
    }

    /// Products in code order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn layout(&self) -> &ShelfLayout {
        &self.layout
    }

    pub fn history(&self) -> &TransactionLog {
        &self.log
    }

    // --- catalog ------------------------------------------------------

    /// Register a new product with an empty stock distribution.
    pub fn register_product(
        &mut self,
        code: ProductCode,
        name: &str,
        quantity_per_case: u32,
        minimum_stock: u32,
    ) -> DomainResult<&Product> {
        if self.products.contains_key(&code) {
            return Err(DomainError::validation(format!(
                "product code {code} is already registered"
            )));
        }
        let product = Product::register(code.clone(), name, quantity_per_case, minimum_stock)?;
        info!(code = %code, "product registered");
        Ok(self.products.entry(code).or_insert(product))
    }

    /// Update name, quantity per case, and minimum stock. The total
    /// quantity is recomputed from the existing case count.
    pub fn edit_product(
        &mut self,
        code: &ProductCode,
        name: &str,
        quantity_per_case: u32,
        minimum_stock: u32,
    ) -> DomainResult<&Product> {
        let product = self.products.get_mut(code).ok_or_else(|| {
            DomainError::not_found(format!("product {code} is not registered"))
        })?;
        product.edit(name, quantity_per_case, minimum_stock)?;
        info!(code = %code, "product edited");
        Ok(product)
    }

    /// Remove a product from the catalog. Refused while any cases remain
    /// on the shelf.
    pub fn delete_product(&mut self, code: &ProductCode) -> DomainResult<()> {
        let product = self.products.get(code).ok_or_else(|| {
            DomainError::not_found(format!("product {code} is not registered"))
        })?;
        if product.total_cases() > 0 {
            return Err(DomainError::conflict(format!(
                "product {code} still has {} cases on the shelf",
                product.total_cases()
            )));
        }
        self.products.remove(code);
        info!(code = %code, "product deleted");
        Ok(())
    }

    // --- stock movements ----------------------------------------------

    /// Receive cases into a slot, creating the entry when absent.
    ///
    /// No capacity cap is enforced here; the viewer's "full" marking is a
    /// display threshold only.
    pub fn inbound(
        &mut self,
        code: &ProductCode,
        location: Location,
        cases: u32,
    ) -> DomainResult<TransactionId> {
        ensure_positive_cases(cases)?;
        self.layout.validate(&location)?;
        let product = self.products.get_mut(code).ok_or_else(|| {
            DomainError::not_found(format!("product {code} is not registered"))
        })?;
        product.deposit(location, cases);
        let quantity = cases * product.quantity_per_case();
        info!(code = %code, %location, cases, "inbound");
        Ok(self.log.append(
            code.clone(),
            TransactionKind::Inbound,
            cases,
            quantity,
            None,
            Some(location),
        ))
    }

    /// Ship cases out of a slot. The entry disappears when it reaches
    /// exactly zero.
    pub fn outbound(
        &mut self,
        code: &ProductCode,
        location: Location,
        cases: u32,
    ) -> DomainResult<TransactionId> {
        ensure_positive_cases(cases)?;
        let product = self.products.get_mut(code).ok_or_else(|| {
            DomainError::not_found(format!("product {code} is not registered"))
        })?;
        product.withdraw(location, cases)?;
        let quantity = cases * product.quantity_per_case();
        info!(code = %code, %location, cases, "outbound");
        Ok(self.log.append(
            code.clone(),
            TransactionKind::Outbound,
            cases,
            quantity,
            Some(location),
            None,
        ))
    }

    /// Relocate cases between slots as one transaction. Totals are
    /// unchanged and a single combined history entry is appended.
    ///
    /// A move onto the source slot itself is accepted: it nets out to no
    /// change but is still logged.
    pub fn move_stock(
        &mut self,
        code: &ProductCode,
        from: Location,
        to: Location,
        cases: u32,
    ) -> DomainResult<TransactionId> {
        ensure_positive_cases(cases)?;
        self.layout.validate(&to)?;
        let product = self.products.get_mut(code).ok_or_else(|| {
            DomainError::not_found(format!("product {code} is not registered"))
        })?;
        // The withdrawal carries every fallible source check; once it has
        // gone through, the deposit cannot fail.
        product.withdraw(from, cases)?;
        product.deposit(to, cases);
        let quantity = cases * product.quantity_per_case();
        info!(code = %code, %from, %to, cases, "move");
        Ok(self.log.append(
            code.clone(),
            TransactionKind::Move,
            cases,
            quantity,
            Some(from),
            Some(to),
        ))
    }

    // --- shelf layout -------------------------------------------------

    /// Add a column with the default geometry.
    pub fn add_column(&mut self, column: Column) -> DomainResult<()> {
        self.add_column_with(column, ColumnSpec::default())
    }

    pub fn add_column_with(&mut self, column: Column, spec: ColumnSpec) -> DomainResult<()> {
        self.layout.insert(column, spec)?;
        info!(%column, positions = spec.positions, levels = spec.levels, "column added");
        Ok(())
    }

    /// Remove a column. Refused while any product stores cases in it.
    pub fn remove_column(&mut self, column: Column) -> DomainResult<()> {
        if self.column_has_stock(column) {
            return Err(DomainError::conflict(format!(
                "column {column} still holds stock"
            )));
        }
        self.layout.remove(column)?;
        info!(%column, "column removed");
        Ok(())
    }

    /// Change a column's geometry. Refused when shrinking would orphan
    /// stock at a position or level outside the new bounds.
    pub fn resize_column(
        &mut self,
        column: Column,
        positions: u32,
        levels: u32,
    ) -> DomainResult<()> {
        let spec = ColumnSpec::new(positions, levels)?;
        let orphaned = self.products.values().any(|product| {
            product.locations().iter().any(|entry| {
                entry.location.column == column
                    && (entry.location.position > spec.positions
                        || entry.location.level > spec.levels)
            })
        });
        if orphaned {
            return Err(DomainError::conflict(format!(
                "column {column} holds stock beyond {positions} positions / {levels} levels"
            )));
        }
        self.layout.resize(column, spec)?;
        info!(%column, positions, levels, "column resized");
        Ok(())
    }

    fn column_has_stock(&self, column: Column) -> bool {
        self.products.values().any(|product| {
            product
                .locations()
                .iter()
                .any(|entry| entry.location.column == column)
        })
    }

    // --- bulk reconciliation ------------------------------------------

    /// Replace a product's entire stock distribution with imported rows
    /// and log each row as an inbound movement.
    ///
    /// Rows naming the same slot are merged for storage, but one history
    /// entry is appended per row, mirroring the import file. Every row is
    /// validated against the layout before anything mutates.
    pub fn replace_product_locations(
        &mut self,
        code: &ProductCode,
        rows: Vec<StockedLocation>,
    ) -> DomainResult<()> {
        for row in &rows {
            ensure_positive_cases(row.cases)?;
            self.layout.validate(&row.location)?;
        }
        let product = self.products.get_mut(code).ok_or_else(|| {
            DomainError::not_found(format!("product {code} is not registered"))
        })?;
        product.replace_locations(rows.clone());
        let quantity_per_case = product.quantity_per_case();
        info!(code = %code, rows = rows.len(), "stock distribution replaced");
        for row in rows {
            self.log.append(
                code.clone(),
                TransactionKind::Inbound,
                row.cases,
                row.cases * quantity_per_case,
                None,
                Some(row.location),
            );
        }
        Ok(())
    }
}

fn ensure_positive_cases(cases: u32) -> DomainResult<()> {
    if cases == 0 {
        return Err(DomainError::validation("cases must be at least 1"));
    }
    Ok(())
}
