use crate::color::Color;
use crate::error::{MapartError, Result};
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView};
use std::path::Path;

/// Decodes `path`, crops the centered square and resamples it to `edge × edge`.
/// The result is indexed `[z][x]`, top row first, with alpha dropped.
pub fn load_pixels(path: impl AsRef<Path>, edge: usize) -> Result<Vec<Vec<Color>>> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|err| {
        MapartError::InputError(format!("{} is not a readable image: {}", path.display(), err))
    })?;
    Ok(square_thumbnail(&image, edge))
}

/// Centered square crop of `image`, resampled to `edge × edge`.
pub fn square_thumbnail(image: &DynamicImage, edge: usize) -> Vec<Vec<Color>> {
    let (width, height) = image.dimensions();
    let side = width.min(height);
    let left = (width - side) / 2;
    let top = (height - side) / 2;

    let edge = edge as u32;
    let thumbnail = image
        .crop_imm(left, top, side, side)
        .resize_exact(edge, edge, FilterType::Lanczos3)
        .to_rgb8();

    thumbnail
        .rows()
        .map(|row| row.map(|pixel| Color::from(pixel.0)).collect())
        .collect()
}
