use crate::cache::ColorCache;
use crate::color::Color;
use crate::error::{MapartError, Result};
use crate::matcher::ColorMatcher;
use crate::observer::{Event, Observer};

/// Block of the synthetic row north of the image.
pub const SEED_BLOCK: &str = "stone";
/// Elevation of the synthetic row before normalization.
pub const SEED_ELEVATION: i32 = -1;
pub const WATER_BLOCK: &str = "water";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub block: String,
    pub elevation: i32,
}

impl Cell {
    pub fn new(block: impl Into<String>, elevation: i32) -> Self {
        Self {
            block: block.into(),
            elevation,
        }
    }

    pub fn is_water(&self) -> bool {
        self.block == WATER_BLOCK
    }
}

/// Terrain cells addressed by column `x` and row `z`. Row `-1` is the seed row; image
/// rows are `0..depth`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    /// `rows[0]` is the seed row.
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    /// Builds a grid from rows that already include the seed row first.
    /// Panics if there is no row or the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Self {
        assert!(!rows.is_empty(), "a grid needs at least its seed row");
        let width = rows[0].len();
        assert!(
            rows.iter().all(|row| row.len() == width),
            "grid rows must all be {} cells wide",
            width
        );
        Self { width, rows }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of image rows, not counting the seed row.
    pub fn depth(&self) -> usize {
        self.rows.len() - 1
    }

    pub fn get(&self, x: usize, z: i32) -> Option<&Cell> {
        self.rows.get(row_index(z)?)?.get(x)
    }

    pub fn get_mut(&mut self, x: usize, z: i32) -> Option<&mut Cell> {
        self.rows.get_mut(row_index(z)?)?.get_mut(x)
    }

    /// Rows in order with their `z`, starting from the seed row.
    pub fn rows(&self) -> impl Iterator<Item = (i32, &[Cell])> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| (index as i32 - 1, row.as_slice()))
    }

    /// Cells of column `x` from the seed row southwards.
    ///
    /// Panics when iterated if `x` is not below [`Grid::width`]; use [`Grid::get`] for a
    /// checked lookup.
    pub fn column(&self, x: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[x])
    }

    pub fn column_elevations(&self, x: usize) -> Vec<i32> {
        self.column(x).map(|cell| cell.elevation).collect()
    }

    pub fn max_elevation(&self) -> i32 {
        self.rows
            .iter()
            .flatten()
            .map(|cell| cell.elevation)
            .max()
            .unwrap_or(SEED_ELEVATION)
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [Vec<Cell>] {
        &mut self.rows
    }
}

fn row_index(z: i32) -> Option<usize> {
    usize::try_from(z + 1).ok()
}

/// Matches every pixel and chains the offsets down each column, starting from the
/// seed row: `elevation(z, x) = elevation(z - 1, x) + offset(pixel(z, x))`.
///
/// `pixels` is indexed `[z][x]`. It must be non-empty and rectangular.
pub fn build_grid<O>(
    pixels: &[Vec<Color>],
    matcher: &ColorMatcher,
    cache: &mut ColorCache,
    observer: &mut O,
) -> Result<Grid>
where
    O: Observer + ?Sized,
{
    let width = pixels.first().map_or(0, Vec::len);
    if width == 0 {
        return Err(MapartError::InputError("image has no pixels".to_owned()));
    }
    if let Some(z) = pixels.iter().position(|row| row.len() != width) {
        return Err(MapartError::InputError(format!(
            "pixel row {} has {} pixels, expected {}",
            z,
            pixels[z].len(),
            width
        )));
    }

    let total = pixels.len();
    let mut rows = Vec::with_capacity(total + 1);
    rows.push(vec![Cell::new(SEED_BLOCK, SEED_ELEVATION); width]);

    for (z, pixel_row) in pixels.iter().enumerate() {
        let previous = &rows[z];
        let row: Vec<Cell> = pixel_row
            .iter()
            .zip(previous)
            .map(|(pixel, above)| {
                let entry = matcher.get_block(*pixel, cache);
                Cell::new(entry.block(), above.elevation + entry.offset())
            })
            .collect();
        rows.push(row);
        observer.on_event(&Event::RowMatched { row: z, total });
    }

    Ok(Grid::from_rows(rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::DistanceMetric;
    use crate::observer::NoopObserver;
    use crate::palette::{Palette, PaletteEntry, DEFAULT_PALETTE};
    use assert_matches::assert_matches;

    fn gray_palette() -> Palette {
        Palette::new(vec![PaletteEntry::new(
            "A",
            [
                Color::new(0, 0, 0),
                Color::new(10, 10, 10),
                Color::new(20, 20, 20),
            ],
        )])
    }

    #[test]
    fn test_build_grid_accumulates_offsets() {
        let palette = gray_palette();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::SquaredRgb);
        let mut cache = ColorCache::in_memory();

        // One column, two rows: offsets -1 then +1
        let pixels = vec![vec![Color::new(0, 0, 0)], vec![Color::new(20, 20, 20)]];
        let grid = build_grid(&pixels, &matcher, &mut cache, &mut NoopObserver).unwrap();

        assert_eq!(grid.width(), 1);
        assert_eq!(grid.depth(), 2);
        assert_eq!(grid.get(0, -1), Some(&Cell::new(SEED_BLOCK, SEED_ELEVATION)));
        assert_eq!(grid.column_elevations(0), vec![-1, -2, -1]);
    }

    #[test]
    fn test_build_grid_recurrence_holds() {
        let matcher = ColorMatcher::new(&DEFAULT_PALETTE, DistanceMetric::SquaredRgb);
        let mut cache = ColorCache::in_memory();
        let pixels: Vec<Vec<Color>> = (0..8u8)
            .map(|z| {
                (0..8u8)
                    .map(|x| Color::new(x * 31, z * 29, (x ^ z) * 17))
                    .collect()
            })
            .collect();

        let grid = build_grid(&pixels, &matcher, &mut cache, &mut NoopObserver).unwrap();

        for z in 0..8i32 {
            for x in 0..8usize {
                let entry = matcher.nearest(&pixels[z as usize][x]);
                let cell = grid.get(x, z).unwrap();
                let above = grid.get(x, z - 1).unwrap();
                assert_eq!(cell.block, entry.block());
                assert_eq!(cell.elevation, above.elevation + entry.offset());
            }
        }
    }

    #[test]
    fn test_build_grid_reports_rows() {
        let palette = gray_palette();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::SquaredRgb);
        let mut cache = ColorCache::in_memory();
        let mut events: Vec<Event> = Vec::new();
        let pixels = vec![vec![Color::new(0, 0, 0); 2]; 2];

        build_grid(&pixels, &matcher, &mut cache, &mut events).unwrap();

        assert_eq!(
            events,
            vec![
                Event::RowMatched { row: 0, total: 2 },
                Event::RowMatched { row: 1, total: 2 }
            ]
        );
    }

    #[test]
    fn test_build_grid_shapes() {
        let palette = gray_palette();
        let matcher = ColorMatcher::new(&palette, DistanceMetric::SquaredRgb);
        let mut cache = ColorCache::in_memory();

        let empty: Vec<Vec<Color>> = Vec::new();
        assert_matches!(
            build_grid(&empty, &matcher, &mut cache, &mut NoopObserver),
            Err(MapartError::InputError(_))
        );

        let ragged = vec![vec![Color::new(0, 0, 0); 2], vec![Color::new(0, 0, 0)]];
        assert_matches!(
            build_grid(&ragged, &matcher, &mut cache, &mut NoopObserver),
            Err(MapartError::InputError(_))
        );

        // Rectangles are fine, square or not
        let wide = vec![vec![Color::new(10, 10, 10); 3]];
        let grid = build_grid(&wide, &matcher, &mut cache, &mut NoopObserver).unwrap();
        assert_eq!((grid.width(), grid.depth()), (3, 1));
    }

    #[test]
    #[should_panic]
    fn test_column_out_of_bounds_panics() {
        let grid = Grid::from_rows(vec![vec![Cell::new(SEED_BLOCK, -1); 2]]);
        let _ = grid.column(2).count();
    }

    #[test]
    fn test_get_out_of_bounds() {
        let grid = Grid::from_rows(vec![vec![Cell::new(SEED_BLOCK, -1); 2]]);
        assert!(grid.get(0, -2).is_none());
        assert!(grid.get(0, 0).is_none());
        assert!(grid.get(2, -1).is_none());
        assert_eq!(grid.max_elevation(), -1);
    }
}
