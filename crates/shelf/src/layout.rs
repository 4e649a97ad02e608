use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use shelftrack_core::{DomainError, DomainResult};

use crate::location::{Column, Location};

/// Geometry of one column: slot count along the aisle and vertical levels.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub positions: u32,
    pub levels: u32,
}

impl ColumnSpec {
    pub fn new(positions: u32, levels: u32) -> DomainResult<Self> {
        if positions == 0 {
            return Err(DomainError::validation("a column needs at least one position"));
        }
        if levels == 0 {
            return Err(DomainError::validation("a column needs at least one level"));
        }
        Ok(Self { positions, levels })
    }
}

impl Default for ColumnSpec {
    /// Geometry installed for a newly added column.
    fn default() -> Self {
        Self {
            positions: 15,
            levels: 3,
        }
    }
}

/// Shelf grid configuration: per-column geometry, ordered by column letter.
///
/// The layout only knows geometry. Whether a column may be removed or
/// shrunk depends on what stock references it, which the ledger checks
/// before calling in here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShelfLayout {
    columns: BTreeMap<Column, ColumnSpec>,
}

impl ShelfLayout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, column: Column) -> bool {
        self.columns.contains_key(&column)
    }

    pub fn spec(&self, column: Column) -> Option<ColumnSpec> {
        self.columns.get(&column).copied()
    }

    /// Columns in letter order.
    pub fn columns(&self) -> impl Iterator<Item = (Column, ColumnSpec)> + '_ {
        self.columns.iter().map(|(c, s)| (*c, *s))
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// The widest column, used by the viewer to size its grid.
    pub fn max_positions(&self) -> u32 {
        self.columns.values().map(|s| s.positions).max().unwrap_or(0)
    }

    pub fn insert(&mut self, column: Column, spec: ColumnSpec) -> DomainResult<()> {
        if self.columns.contains_key(&column) {
            return Err(DomainError::validation(format!(
                "column {column} already exists"
            )));
        }
        self.columns.insert(column, spec);
        Ok(())
    }

    pub fn remove(&mut self, column: Column) -> DomainResult<()> {
        if self.columns.remove(&column).is_none() {
            return Err(DomainError::not_found(format!(
                "column {column} is not configured"
            )));
        }
        Ok(())
    }

    pub fn resize(&mut self, column: Column, spec: ColumnSpec) -> DomainResult<()> {
        match self.columns.get_mut(&column) {
            Some(existing) => {
                *existing = spec;
                Ok(())
            }
            None => Err(DomainError::not_found(format!(
                "column {column} is not configured"
            ))),
        }
    }

    /// Check that a location lies within the configured grid.
    pub fn validate(&self, location: &Location) -> DomainResult<()> {
        let spec = self.spec(location.column).ok_or_else(|| {
            DomainError::validation(format!(
                "column {} is not configured",
                location.column
            ))
        })?;
        if location.position > spec.positions {
            return Err(DomainError::validation(format!(
                "position {} exceeds column {} ({} positions)",
                location.position, location.column, spec.positions
            )));
        }
        if location.level > spec.levels {
            return Err(DomainError::validation(format!(
                "level {} exceeds column {} ({} levels)",
                location.level, location.column, spec.levels
            )));
        }
        Ok(())
    }
}
