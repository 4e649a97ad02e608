use core::fmt;

use serde::{Deserialize, Serialize};

use shelftrack_core::{DomainError, DomainResult};
use shelftrack_shelf::Location;

/// Product catalog identifier. Immutable once registered; uniqueness is
/// enforced by the ledger at registration time.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductCode(String);

impl ProductCode {
    pub fn new(code: impl Into<String>) -> DomainResult<Self> {
        let code = code.into().trim().to_string();
        if code.is_empty() {
            return Err(DomainError::validation("product code cannot be empty"));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Cases stored at one shelf slot.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockedLocation {
    pub location: Location,
    pub cases: u32,
}

/// Catalog entry plus its live distribution across shelf slots.
///
/// Invariants, restored by every mutating method before it returns:
/// - `total_cases == sum(locations[*].cases)`
/// - `total_quantity == total_cases * quantity_per_case`
/// - at most one stocked entry per distinct location, none with zero cases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    code: ProductCode,
    name: String,
    quantity_per_case: u32,
    minimum_stock: u32,
    locations: Vec<StockedLocation>,
    total_cases: u32,
    total_quantity: u32,
}

impl Product {
    /// Create a fresh record with no stock on the shelf.
    pub fn register(
        code: ProductCode,
        name: impl Into<String>,
        quantity_per_case: u32,
        minimum_stock: u32,
    ) -> DomainResult<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if quantity_per_case == 0 {
            return Err(DomainError::validation(
                "quantity per case must be at least 1",
            ));
        }
        Ok(Self {
            code,
            name,
            quantity_per_case,
            minimum_stock,
            locations: Vec::new(),
            total_cases: 0,
            total_quantity: 0,
        })
    }

    pub fn code(&self) -> &ProductCode {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity_per_case(&self) -> u32 {
        self.quantity_per_case
    }

    pub fn minimum_stock(&self) -> u32 {
        self.minimum_stock
    }

    pub fn locations(&self) -> &[StockedLocation] {
        &self.locations
    }

    pub fn total_cases(&self) -> u32 {
        self.total_cases
    }

    pub fn total_quantity(&self) -> u32 {
        self.total_quantity
    }

    /// Whether the current stock sits below the configured minimum.
    pub fn is_low_stock(&self) -> bool {
        self.total_quantity < self.minimum_stock
    }

    pub fn cases_at(&self, location: &Location) -> Option<u32> {
        self.locations
            .iter()
            .find(|e| e.location == *location)
            .map(|e| e.cases)
    }

    /// Update catalog fields. The stock distribution is untouched; the
    /// total quantity is recomputed against the existing case count.
    pub fn edit(
        &mut self,
        name: impl Into<String>,
        quantity_per_case: u32,
        minimum_stock: u32,
    ) -> DomainResult<()> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if quantity_per_case == 0 {
            return Err(DomainError::validation(
                "quantity per case must be at least 1",
            ));
        }
        self.name = name;
        self.quantity_per_case = quantity_per_case;
        self.minimum_stock = minimum_stock;
        self.total_quantity = self.total_cases * self.quantity_per_case;
        Ok(())
    }

    /// Add cases at a slot, creating the entry when absent.
    pub fn deposit(&mut self, location: Location, cases: u32) {
        if cases == 0 {
            return;
        }
        match self.locations.iter_mut().find(|e| e.location == location) {
            Some(entry) => entry.cases += cases,
            None => self.locations.push(StockedLocation { location, cases }),
        }
        self.total_cases += cases;
        self.total_quantity += cases * self.quantity_per_case;
    }

    /// Remove cases from a slot. The entry disappears when it reaches
    /// exactly zero; a zero-case row is never kept.
    pub fn withdraw(&mut self, location: Location, cases: u32) -> DomainResult<()> {
        let index = self
            .locations
            .iter()
            .position(|e| e.location == location)
            .ok_or_else(|| {
                DomainError::not_found(format!("no stock at {location} for {}", self.code))
            })?;
        let available = self.locations[index].cases;
        if available < cases {
            return Err(DomainError::insufficient_stock(cases, available));
        }
        if available == cases {
            self.locations.remove(index);
        } else {
            self.locations[index].cases -= cases;
        }
        self.total_cases -= cases;
        self.total_quantity -= cases * self.quantity_per_case;
        Ok(())
    }

    /// Wholesale replacement of the stock distribution (bulk import).
    ///
    /// Entries naming the same slot are merged by summing their cases so
    /// the one-entry-per-location invariant survives duplicated input
    /// rows; zero-case entries are dropped.
    pub fn replace_locations(&mut self, entries: Vec<StockedLocation>) {
        let mut merged: Vec<StockedLocation> = Vec::with_capacity(entries.len());
        for entry in entries {
            if entry.cases == 0 {
                continue;
            }
            match merged.iter_mut().find(|e| e.location == entry.location) {
                Some(existing) => existing.cases += entry.cases,
                None => merged.push(entry),
            }
        }
        self.locations = merged;
        self.recalculate();
    }

    fn recalculate(&mut self) {
        self.total_cases = self.locations.iter().map(|e| e.cases).sum();
        self.total_quantity = self.total_cases * self.quantity_per_case;
    }
}
