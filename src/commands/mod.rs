//! Turning terrain into command text: placement commands, chunking to the
//! per-function command limit, and the setup chain that runs the chunks in order.

pub mod chain;
pub mod emitter;

pub use chain::{build_setup, FunctionName};
pub use emitter::{
    chunk_commands, emit_commands, fill, setblock, DEFAULT_CHUNK_LIMIT, MAX_FILL_VOLUME,
};

/// Where the build goes in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// World position of grid cell `x = 0, z = 0` at elevation 0.
    pub origin: [i32; 3],
    /// How many blocks above each column's highest point get cleared.
    pub clear_height: i32,
    /// Height of the viewing platform above the highest terrain block.
    pub view_height: i32,
    pub platform_radius: i32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            origin: [0, 64, 0],
            clear_height: 32,
            view_height: 48,
            platform_radius: 2,
        }
    }
}

impl Layout {
    /// World coordinates of grid position `(x, elevation, z)`.
    pub fn world(&self, x: i32, y: i32, z: i32) -> (i32, i32, i32) {
        (self.origin[0] + x, self.origin[1] + y, self.origin[2] + z)
    }
}
