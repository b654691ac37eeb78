//! Pixels to terrain: cumulative elevation grid, per-column normalization and
//! water containment.

pub mod grid;
pub mod normalize;
pub mod water;

pub use grid::{build_grid, Cell, Grid, SEED_BLOCK, SEED_ELEVATION, WATER_BLOCK};
pub use normalize::{normalize, SeedPolicy};
pub use water::{water_blockers, BlockPos};
