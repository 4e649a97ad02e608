//! `shelftrack-catalog` — product records and their stock distribution.

pub mod product;

pub use product::{Product, ProductCode, StockedLocation};
