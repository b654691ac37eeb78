use crate::color::Color;
use std::error::Error;
use std::fmt;

pub type Result<T> = std::result::Result<T, MapartError>;

#[derive(Debug)]
pub enum MapartError {
    IoError(std::io::Error),
    /// The source image is missing, unreadable or not an image.
    InputError(String),
    /// A cache key that is not a triple of 8-bit components.
    InvalidKey(String),
    /// A non-replacing cache insert hit an existing key.
    DuplicateKey(Color),
    CacheFormatError(serde_json::Error),
    ConfigError(String),
}

impl fmt::Display for MapartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapartError::IoError(err) => write!(f, "IO error: {}", err),
            MapartError::InputError(msg) => write!(f, "Input error: {}", msg),
            MapartError::InvalidKey(msg) => write!(f, "Invalid cache key: {}", msg),
            MapartError::DuplicateKey(color) => {
                write!(f, "Duplicate cache key: {}", color)
            }
            MapartError::CacheFormatError(err) => write!(f, "Cache format error: {}", err),
            MapartError::ConfigError(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl Error for MapartError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MapartError::IoError(err) => Some(err),
            MapartError::CacheFormatError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for MapartError {
    fn from(err: std::io::Error) -> Self {
        MapartError::IoError(err)
    }
}

impl From<serde_json::Error> for MapartError {
    fn from(err: serde_json::Error) -> Self {
        MapartError::CacheFormatError(err)
    }
}

impl From<image::ImageError> for MapartError {
    fn from(err: image::ImageError) -> Self {
        MapartError::InputError(err.to_string())
    }
}
