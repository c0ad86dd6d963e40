//! Typed row models.

pub mod compound;

pub use compound::{ClassCount, Compound, Synonym, from_row, from_rows};
