//! `shelftrack-shelf` — shelf grid geometry.
//!
//! The three-axis coordinate system (column letter, position along the
//! aisle, vertical level) and the per-column configuration that bounds it.

pub mod layout;
pub mod location;

pub use layout::{ColumnSpec, ShelfLayout};
pub use location::{Column, Location};
