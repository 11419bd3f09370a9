//! Core types and extraction logic shared across the raincell map services.

pub mod extract;
pub mod grid;
pub mod point;

pub use extract::extract_cells;
pub use grid::RainGrid;
pub use point::RainPoint;
