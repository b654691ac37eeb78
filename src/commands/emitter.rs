use crate::commands::Layout;
use crate::terrain::{BlockPos, Grid};

/// Commands a single function invocation may run.
pub const DEFAULT_CHUNK_LIMIT: usize = 65536;

/// Most blocks a single `fill` may cover.
pub const MAX_FILL_VOLUME: i32 = 32768;

const CONTAINMENT_BLOCK: &str = "glass";

/// `setblock <x> <y> <z> minecraft:<block> [replace]`
pub fn setblock(pos: (i32, i32, i32), block: &str, replace: bool) -> String {
    let (x, y, z) = pos;
    if replace {
        format!("setblock {} {} {} minecraft:{} replace", x, y, z, block)
    } else {
        format!("setblock {} {} {} minecraft:{}", x, y, z, block)
    }
}

/// `fill <x1> <y1> <z1> <x2> <y2> <z2> minecraft:<block>`
pub fn fill(from: (i32, i32, i32), to: (i32, i32, i32), block: &str) -> String {
    format!(
        "fill {} {} {} {} {} {} minecraft:{}",
        from.0, from.1, from.2, to.0, to.1, to.2, block
    )
}

/// Emits, in order: every cell row by row from the seed row, the clear-above `fill`s of
/// each column, then a glass block per water blocker. A column's clear is split along z
/// into as few `fill`s as keep each under [`MAX_FILL_VOLUME`]. Replaying the list in order rebuilds
/// the terrain; later commands at the same position win.
pub fn emit_commands(grid: &Grid, blockers: &[BlockPos], layout: &Layout) -> Vec<String> {
    let mut commands =
        Vec::with_capacity(grid.width() * (grid.depth() + 2) + blockers.len());

    for (z, row) in grid.rows() {
        for (x, cell) in row.iter().enumerate() {
            let pos = layout.world(x as i32, cell.elevation, z);
            commands.push(setblock(pos, &cell.block, true));
        }
    }

    let last_z = grid.depth() as i32 - 1;
    let rows_per_fill = (MAX_FILL_VOLUME / layout.clear_height.max(1)).max(1);
    for x in 0..grid.width() {
        let top = grid
            .column(x)
            .map(|cell| cell.elevation)
            .max()
            .unwrap_or_default();
        let mut start_z = -1;
        while start_z <= last_z {
            let end_z = (start_z + rows_per_fill - 1).min(last_z);
            let from = layout.world(x as i32, top + 1, start_z);
            let to = layout.world(x as i32, top + layout.clear_height, end_z);
            commands.push(fill(from, to, "air"));
            start_z = end_z + 1;
        }
    }

    for &(x, y, z) in blockers {
        commands.push(setblock(layout.world(x, y, z), CONTAINMENT_BLOCK, true));
    }

    commands
}

/// Splits `commands` into consecutive chunks of at most `limit`, preserving order.
/// Panics if `limit` is zero.
pub fn chunk_commands(commands: Vec<String>, limit: usize) -> Vec<Vec<String>> {
    assert!(limit > 0, "chunk limit must be positive");
    let mut chunks = Vec::with_capacity(commands.len().div_ceil(limit));
    let mut commands = commands.into_iter().peekable();
    while commands.peek().is_some() {
        chunks.push(commands.by_ref().take(limit).collect());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Cell, SEED_BLOCK, WATER_BLOCK};

    fn layout_at_origin() -> Layout {
        Layout {
            origin: [0, 0, 0],
            clear_height: 4,
            ..Layout::default()
        }
    }

    #[test]
    fn test_setblock_and_fill_format() {
        assert_eq!(
            setblock((1, -2, 3), "stone", true),
            "setblock 1 -2 3 minecraft:stone replace"
        );
        assert_eq!(
            setblock((1, 2, 3), "stone", false),
            "setblock 1 2 3 minecraft:stone"
        );
        assert_eq!(
            fill((0, 1, 2), (3, 4, 5), "air"),
            "fill 0 1 2 3 4 5 minecraft:air"
        );
    }

    #[test]
    fn test_emit_commands_order() {
        let grid = Grid::from_rows(vec![
            vec![Cell::new(SEED_BLOCK, 1), Cell::new(SEED_BLOCK, 0)],
            vec![Cell::new(WATER_BLOCK, 2), Cell::new("dirt", 0)],
        ]);
        let blockers = vec![(1, 1, 0)];

        let commands = emit_commands(&grid, &blockers, &layout_at_origin());

        assert_eq!(
            commands,
            vec![
                "setblock 0 1 -1 minecraft:stone replace",
                "setblock 1 0 -1 minecraft:stone replace",
                "setblock 0 2 0 minecraft:water replace",
                "setblock 1 0 0 minecraft:dirt replace",
                "fill 0 3 -1 0 6 0 minecraft:air",
                "fill 1 1 -1 1 4 0 minecraft:air",
                "setblock 1 1 0 minecraft:glass replace",
            ]
        );
    }

    #[test]
    fn test_emit_commands_offsets_by_origin() {
        let grid = Grid::from_rows(vec![vec![Cell::new(SEED_BLOCK, 0)]]);
        let layout = Layout {
            origin: [100, 64, -20],
            clear_height: 2,
            ..Layout::default()
        };

        let commands = emit_commands(&grid, &[], &layout);
        assert_eq!(
            commands,
            vec![
                "setblock 100 64 -21 minecraft:stone replace",
                "fill 100 65 -21 100 66 -21 minecraft:air",
            ]
        );
    }

    #[test]
    fn test_clear_above_split_to_fill_limit() {
        // 128 image rows plus the seed row, 300 high: 38700 blocks in one fill
        let grid = Grid::from_rows(vec![vec![Cell::new(SEED_BLOCK, 0)]; 129]);
        let layout = Layout {
            origin: [0, 0, 0],
            clear_height: 300,
            ..Layout::default()
        };

        let commands = emit_commands(&grid, &[], &layout);
        let fills: Vec<&String> = commands.iter().filter(|c| c.starts_with("fill")).collect();

        // 32768 / 300 = 109 rows per fill
        assert_eq!(
            fills,
            vec![
                "fill 0 1 -1 0 300 107 minecraft:air",
                "fill 0 1 108 0 300 127 minecraft:air",
            ]
        );
        for command in fills {
            let coords: Vec<i32> = command
                .split(' ')
                .skip(1)
                .take(6)
                .map(|n| n.parse().unwrap())
                .collect();
            let volume = (coords[3] - coords[0] + 1)
                * (coords[4] - coords[1] + 1)
                * (coords[5] - coords[2] + 1);
            assert!(volume <= MAX_FILL_VOLUME, "{} covers {}", command, volume);
        }
    }

    #[test]
    fn test_chunk_sizes() {
        let commands: Vec<String> = (0..200_000).map(|i| i.to_string()).collect();
        let chunks = chunk_commands(commands.clone(), DEFAULT_CHUNK_LIMIT);

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![65536, 65536, 65536, 3392]);
        assert_eq!(chunks.concat(), commands);
    }

    #[test]
    fn test_chunk_count_is_ceiling() {
        for (len, limit, expected) in [(0, 3, 0), (1, 3, 1), (3, 3, 1), (4, 3, 2), (9, 3, 3)] {
            let commands: Vec<String> = (0..len).map(|i| format!("say {}", i)).collect();
            let chunks = chunk_commands(commands.clone(), limit);
            assert_eq!(chunks.len(), expected, "len {} limit {}", len, limit);
            assert_eq!(chunks.concat(), commands);
        }
    }

    #[test]
    #[should_panic(expected = "chunk limit must be positive")]
    fn test_zero_chunk_limit_panics() {
        chunk_commands(vec!["say hi".to_owned()], 0);
    }
}
