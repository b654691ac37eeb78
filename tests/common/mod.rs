use image::{Rgb, RgbImage};
use mapart::Color;
use std::path::{Path, PathBuf};

/// Creates a unique, empty directory for one test.
pub fn test_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "mapart_integration_{}_{}",
        name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

/// A square gradient with a band of water-blue across the middle.
pub fn gradient_pixels(edge: u8) -> Vec<Vec<Color>> {
    (0..edge)
        .map(|z| {
            (0..edge)
                .map(|x| {
                    if z >= edge / 3 && z < edge / 2 {
                        Color::new(55, 55, 220)
                    } else {
                        Color::new(x.wrapping_mul(9), z.wrapping_mul(7), 128)
                    }
                })
                .collect()
        })
        .collect()
}

/// Writes `pixels` as a PNG.
pub fn write_png(path: &Path, pixels: &[Vec<Color>]) {
    let edge = pixels.len() as u32;
    let image = RgbImage::from_fn(edge, edge, |x, y| {
        let c = pixels[y as usize][x as usize];
        Rgb([c.r(), c.g(), c.b()])
    });
    image.save(path).unwrap();
}

pub fn assert_columns_floored(grid: &mapart::terrain::Grid) {
    for x in 0..grid.width() {
        let min = grid.column(x).map(|cell| cell.elevation).min();
        assert_eq!(min, Some(0), "column {} is not rebased to zero", x);
    }
}
