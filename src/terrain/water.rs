use crate::terrain::grid::Grid;
use std::collections::BTreeSet;

/// Grid-space position `(x, y, z)`: column, elevation, row.
pub type BlockPos = (i32, i32, i32);

/// Positions that need a containment block so water doesn't spill off a ledge.
///
/// For each water cell at elevation `y`, every lateral neighbor strictly below it gets
/// a block at `(neighbor x, y - 1, neighbor z)`. Results are deduplicated and sorted.
pub fn water_blockers(grid: &Grid) -> Vec<BlockPos> {
    let mut blockers = BTreeSet::new();

    for (z, row) in grid.rows() {
        for (x, cell) in row.iter().enumerate() {
            if !cell.is_water() {
                continue;
            }
            let x = x as i32;
            for (nx, nz) in [(x - 1, z), (x + 1, z), (x, z - 1), (x, z + 1)] {
                let Ok(column) = usize::try_from(nx) else {
                    continue;
                };
                let Some(neighbor) = grid.get(column, nz) else {
                    continue;
                };
                if neighbor.elevation < cell.elevation {
                    blockers.insert((nx, cell.elevation - 1, nz));
                }
            }
        }
    }

    blockers.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::grid::{Cell, SEED_BLOCK, WATER_BLOCK};

    fn cell(block: &str, elevation: i32) -> Cell {
        Cell::new(block, elevation)
    }

    #[test]
    fn test_blocker_below_lower_neighbor() {
        // Seed row, then a water cell at 3 next to a dirt cell at 1
        let grid = Grid::from_rows(vec![
            vec![cell(SEED_BLOCK, 3), cell(SEED_BLOCK, 5)],
            vec![cell(WATER_BLOCK, 3), cell("dirt", 1)],
        ]);

        assert_eq!(water_blockers(&grid), vec![(1, 2, 0)]);
    }

    #[test]
    fn test_no_blocker_for_equal_or_higher() {
        let grid = Grid::from_rows(vec![
            vec![cell(SEED_BLOCK, 3), cell(SEED_BLOCK, 3)],
            vec![cell(WATER_BLOCK, 3), cell("dirt", 4)],
            vec![cell("dirt", 3), cell("dirt", 9)],
        ]);

        assert!(water_blockers(&grid).is_empty());
    }

    #[test]
    fn test_blockers_deduplicated() {
        // Two water cells both overhang the dirt cell between them
        let grid = Grid::from_rows(vec![
            vec![cell(SEED_BLOCK, 5); 3],
            vec![cell(WATER_BLOCK, 2), cell("dirt", 0), cell(WATER_BLOCK, 2)],
        ]);

        assert_eq!(water_blockers(&grid), vec![(1, 1, 0)]);
    }

    #[test]
    fn test_seed_row_is_a_neighbor() {
        let grid = Grid::from_rows(vec![
            vec![cell(SEED_BLOCK, 0)],
            vec![cell(WATER_BLOCK, 2)],
        ]);

        assert_eq!(water_blockers(&grid), vec![(0, 1, -1)]);
    }

    #[test]
    fn test_blockers_on_all_sides() {
        let grid = Grid::from_rows(vec![
            vec![cell(SEED_BLOCK, 0); 3],
            vec![cell("dirt", 0), cell(WATER_BLOCK, 4), cell("dirt", 0)],
            vec![cell("dirt", 0); 3],
        ]);

        assert_eq!(
            water_blockers(&grid),
            vec![(0, 3, 0), (1, 3, -1), (1, 3, 1), (2, 3, 0)]
        );
    }
}
