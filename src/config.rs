use crate::commands::{Layout, DEFAULT_CHUNK_LIMIT, MAX_FILL_VOLUME};
use crate::error::{MapartError, Result};
use crate::logger::LogSeverity;
use crate::matcher::DistanceMetric;
use crate::terrain::SeedPolicy;
use serde::Deserialize;
use std::fs;
use std::io;
use std::path::Path;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "mapart.json";

/// Pipeline settings. Every field has a default, so a config file only needs the
/// fields it changes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Edge length of the image in pixels, before the size multiplier.
    pub image_size: usize,
    /// Commands per function file.
    pub chunk_limit: usize,
    pub cache_path: String,
    pub metric: DistanceMetric,
    pub seed_policy: SeedPolicy,
    pub origin: [i32; 3],
    pub clear_height: i32,
    pub view_height: i32,
    pub platform_radius: i32,
    pub namespace: String,
    pub pack_format: u32,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        let layout = Layout::default();
        Self {
            image_size: 128,
            chunk_limit: DEFAULT_CHUNK_LIMIT,
            cache_path: "color.cache".to_owned(),
            metric: DistanceMetric::default(),
            seed_policy: SeedPolicy::default(),
            origin: layout.origin,
            clear_height: layout.clear_height,
            view_height: layout.view_height,
            platform_radius: layout.platform_radius,
            namespace: "mapart".to_owned(),
            pack_format: 48,
            log_level: "info".to_owned(),
        }
    }
}

impl Config {
    /// Reads a JSON config file. A missing file gives the defaults.
    pub fn read_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
            Err(err) => return Err(err.into()),
        };
        let config: Config = serde_json::from_str(&text).map_err(|err| {
            MapartError::ConfigError(format!("{}: {}", path.display(), err))
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.image_size == 0 {
            return Err(MapartError::ConfigError(
                "image_size must be positive".to_owned(),
            ));
        }
        if self.chunk_limit == 0 {
            return Err(MapartError::ConfigError(
                "chunk_limit must be positive".to_owned(),
            ));
        }
        if self.clear_height < 1 {
            return Err(MapartError::ConfigError(
                "clear_height must be at least 1".to_owned(),
            ));
        }
        // Clears are split along z, but one row of a column must still fit in a fill
        if self.clear_height > MAX_FILL_VOLUME {
            return Err(MapartError::ConfigError(format!(
                "clear_height must be at most {}",
                MAX_FILL_VOLUME
            )));
        }
        if !is_resource_name(&self.namespace) {
            return Err(MapartError::ConfigError(format!(
                "invalid namespace: {:?}",
                self.namespace
            )));
        }
        self.log_severity()?;
        Ok(())
    }

    pub fn log_severity(&self) -> Result<LogSeverity> {
        self.log_level.parse().map_err(MapartError::ConfigError)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            origin: self.origin,
            clear_height: self.clear_height,
            view_height: self.view_height,
            platform_radius: self.platform_radius,
        }
    }
}

/// Namespaces and function names may only use `[a-z0-9_.-]`.
pub fn is_resource_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | '-' | '.'))
}
