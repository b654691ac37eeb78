pub mod cache;
pub mod color;
pub mod commands;
pub mod config;
pub mod datapack;
pub mod error;
pub mod image_input;
pub mod logger;
pub mod matcher;
pub mod observer;
pub mod palette;
pub mod pipeline;
pub mod terrain;

// Re-export commonly used items
pub use cache::{CacheEntry, ColorCache};
pub use color::Color;
pub use config::Config;
pub use error::{MapartError, Result};
pub use logger::{log, LogSeverity};
pub use matcher::{ColorMatcher, DistanceMetric};
pub use palette::{Palette, PaletteEntry, DEFAULT_PALETTE};
pub use pipeline::{render, CommandPlan};
