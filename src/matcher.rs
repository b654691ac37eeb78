use crate::cache::{CacheEntry, ColorCache};
use crate::color::Color;
use crate::palette::{offset_for_index, Palette};
use serde::Deserialize;

const HUE_WEIGHT: f64 = 0.47;
const SATURATION_WEIGHT: f64 = 0.29;
const VALUE_WEIGHT: f64 = 0.24;

/// How far apart two colors are. The metric is fixed for the lifetime of a cache: a cache
/// filled with one metric gives answers the other metric would not, so switching metrics
/// means starting a new cache file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceMetric {
    /// Sum of squared per-channel RGB differences.
    #[default]
    SquaredRgb,
    /// Weighted squared HSV differences, with the hue term scaled by the brightness
    /// (channel sum) of the reference color.
    HsvWeighted,
}

impl DistanceMetric {
    /// Distance from `reference` (a palette color) to `target` (a pixel).
    pub fn distance(&self, reference: &Color, target: &Color) -> f64 {
        match self {
            DistanceMetric::SquaredRgb => reference.squared_distance(target) as f64,
            DistanceMetric::HsvWeighted => {
                let (rh, rs, rv) = reference.to_hsv();
                let (th, ts, tv) = target.to_hsv();

                let hue = HUE_WEIGHT * (th - rh).powi(2) * reference.channel_sum() as f64;
                let saturation = SATURATION_WEIGHT * (ts - rs).powi(2);
                let value = VALUE_WEIGHT * (tv - rv).powi(2);
                hue + saturation + value
            }
        }
    }
}

/// Nearest-color lookup over a palette, memoized in a [`ColorCache`].
pub struct ColorMatcher<'p> {
    palette: &'p Palette,
    metric: DistanceMetric,
}

impl<'p> ColorMatcher<'p> {
    pub fn new(palette: &'p Palette, metric: DistanceMetric) -> Self {
        Self { palette, metric }
    }

    pub fn palette(&self) -> &Palette {
        self.palette
    }

    pub fn metric(&self) -> DistanceMetric {
        self.metric
    }

    /// Returns the block and elevation offset for `color`.
    ///
    /// A cached answer is returned as is, even if the palette has changed since it was
    /// stored. Otherwise every reference color is scanned in palette order, the first
    /// closest one wins, and the answer is cached before it is returned.
    pub fn get_block(&self, color: Color, cache: &mut ColorCache) -> CacheEntry {
        if let Some(entry) = cache.find(&color) {
            return entry.clone();
        }

        let entry = self.nearest(&color);
        cache.insert(color, entry.clone());
        entry
    }

    /// Uncached palette scan.
    pub fn nearest(&self, color: &Color) -> CacheEntry {
        let mut best: Option<(f64, &str, usize)> = None;

        'scan: for entry in self.palette.entries() {
            for (index, reference) in entry.colors().iter().enumerate() {
                let distance = self.metric.distance(reference, color);
                if best.map_or(true, |(closest, _, _)| distance < closest) {
                    best = Some((distance, entry.block(), index));
                    if distance == 0.0 {
                        break 'scan;
                    }
                }
            }
        }

        match best {
            Some((_, block, index)) => CacheEntry::new(block, offset_for_index(index)),
            None => unreachable!("palettes are never empty"),
        }
    }
}
