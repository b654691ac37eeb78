use crate::cache::ColorCache;
use crate::color::Color;
use crate::commands::{build_setup, chunk_commands, emit_commands, FunctionName};
use crate::config::Config;
use crate::error::Result;
use crate::matcher::ColorMatcher;
use crate::observer::{Event, Observer};
use crate::palette::Palette;
use crate::terrain::{build_grid, normalize, water_blockers, Grid};

/// Everything needed to write the datapack.
#[derive(Debug, Clone)]
pub struct CommandPlan {
    /// Command chunks, each at most `chunk_limit` long, in execution order.
    pub chunks: Vec<Vec<String>>,
    /// The setup function: platform, trigger chain and teleport.
    pub setup: Vec<String>,
    /// The normalized terrain the commands were generated from.
    pub grid: Grid,
}

impl CommandPlan {
    pub fn command_count(&self) -> usize {
        self.chunks.iter().map(Vec::len).sum()
    }
}

/// Runs the whole pipeline over an already decoded image (`pixels[z][x]`).
pub fn render<O>(
    pixels: &[Vec<Color>],
    palette: &Palette,
    cache: &mut ColorCache,
    config: &Config,
    function: &FunctionName,
    observer: &mut O,
) -> Result<CommandPlan>
where
    O: Observer + ?Sized,
{
    let matcher = ColorMatcher::new(palette, config.metric);
    let mut grid = build_grid(pixels, &matcher, cache, observer)?;
    normalize(&mut grid, config.seed_policy);
    let blockers = water_blockers(&grid);

    let layout = config.layout();
    let commands = emit_commands(&grid, &blockers, &layout);
    let command_count = commands.len();
    let chunks = chunk_commands(commands, config.chunk_limit);
    observer.on_event(&Event::CommandsEmitted {
        commands: command_count,
        chunks: chunks.len(),
    });

    let setup = build_setup(&grid, chunks.len(), &layout, function);
    Ok(CommandPlan {
        chunks,
        setup,
        grid,
    })
}
