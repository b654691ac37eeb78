use crate::terrain::grid::Grid;
use serde::Deserialize;

/// Whether the seed row counts when looking for a column's lowest point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// The seed row is part of the column; nothing ends up below zero.
    #[default]
    Include,
    /// Only image rows count; the seed row may end up below zero.
    Exclude,
}

/// Shifts each column so that its lowest elevation is zero. Columns are independent.
pub fn normalize(grid: &mut Grid, policy: SeedPolicy) {
    let skip = match policy {
        SeedPolicy::Include => 0,
        SeedPolicy::Exclude => 1,
    };

    for x in 0..grid.width() {
        let floor = grid
            .column(x)
            .skip(skip)
            .map(|cell| cell.elevation)
            .min();
        let Some(floor) = floor else {
            continue;
        };

        for row in grid.rows_mut() {
            row[x].elevation -= floor;
        }
    }
}
