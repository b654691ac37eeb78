use crate::commands::emitter::{fill, setblock};
use crate::commands::Layout;
use crate::terrain::Grid;

const PLATFORM_BLOCK: &str = "glass";

/// Namespaced name of the generated functions. Chunk `i` is `<namespace>:<name>_<i>`,
/// the setup function is `<namespace>:<name>_setup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionName {
    pub namespace: String,
    pub name: String,
}

impl FunctionName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// File stem of chunk `index`.
    pub fn chunk_stem(&self, index: usize) -> String {
        format!("{}_{}", self.name, index)
    }

    pub fn setup_stem(&self) -> String {
        format!("{}_setup", self.name)
    }

    /// Fully qualified id of chunk `index`, as used by `function`.
    pub fn chunk_id(&self, index: usize) -> String {
        format!("{}:{}", self.namespace, self.chunk_stem(index))
    }
}

/// Builds the setup function: a glass viewing platform above the middle of the build,
/// a row of command blocks on it that run the chunks one after another, and a teleport
/// onto the platform.
///
/// The first command block is an impulse block with a button on top. Every later one is
/// an always-active chain block, so pressing the button runs chunk 0, then 1, and so on,
/// each in its own invocation.
pub fn build_setup(
    grid: &Grid,
    chunk_count: usize,
    layout: &Layout,
    function: &FunctionName,
) -> Vec<String> {
    let radius = layout.platform_radius.max(1);
    let center_x = grid.width() as i32 / 2;
    let center_z = (grid.depth() as i32 - 2).div_euclid(2);
    let platform_y = grid.max_elevation() + layout.view_height;

    let chain_x = center_x - radius;
    let chain_z = center_z - radius;
    let chain_end_x = chain_x + chunk_count as i32 - 1;

    let mut commands = Vec::with_capacity(chunk_count + 3);
    commands.push(fill(
        layout.world(center_x - radius, platform_y, center_z - radius),
        layout.world(
            (center_x + radius).max(chain_end_x),
            platform_y,
            center_z + radius,
        ),
        PLATFORM_BLOCK,
    ));

    for index in 0..chunk_count {
        let pos = layout.world(chain_x + index as i32, platform_y + 1, chain_z);
        let block = if index == 0 {
            format!(
                "command_block[facing=east]{{Command:\"function {}\"}}",
                function.chunk_id(index)
            )
        } else {
            format!(
                "chain_command_block[facing=east]{{Command:\"function {}\",auto:1b}}",
                function.chunk_id(index)
            )
        };
        commands.push(setblock(pos, &block, true));

        if index == 0 {
            let button = layout.world(chain_x, platform_y + 2, chain_z);
            commands.push(setblock(button, "stone_button[face=floor]", true));
        }
    }

    let (x, y, z) = layout.world(center_x, platform_y + 1, center_z);
    commands.push(format!("tp @s {} {} {}", x, y, z));
    commands
}
