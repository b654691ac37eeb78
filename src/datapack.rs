use crate::commands::FunctionName;
use crate::error::Result;
use crate::pipeline::CommandPlan;
use futures::future::try_join_all;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Serialize)]
struct PackMeta {
    pack: PackInfo,
}

#[derive(Serialize)]
struct PackInfo {
    pack_format: u32,
    description: String,
}

/// Files written by [`write_datapack`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatapackSummary {
    pub root: PathBuf,
    pub chunk_files: Vec<PathBuf>,
    pub setup_file: PathBuf,
}

/// Writes `plan` as a datapack at `<out_dir>/<pack_name>`:
///
/// ```text
/// pack.mcmeta
/// data/<namespace>/function/<name>_<i>.mcfunction   one per chunk
/// data/<namespace>/function/<name>_setup.mcfunction
/// ```
///
/// Chunk files are independent of each other and are written concurrently.
pub async fn write_datapack(
    out_dir: impl AsRef<Path>,
    pack_name: &str,
    function: &FunctionName,
    plan: &CommandPlan,
    pack_format: u32,
) -> Result<DatapackSummary> {
    let root = out_dir.as_ref().join(pack_name);
    let function_dir = root
        .join("data")
        .join(&function.namespace)
        .join("function");
    fs::create_dir_all(&function_dir).await?;

    let meta = PackMeta {
        pack: PackInfo {
            pack_format,
            description: format!("Map art: {}", function.name),
        },
    };
    fs::write(root.join("pack.mcmeta"), serde_json::to_vec_pretty(&meta)?).await?;

    let chunk_files: Vec<PathBuf> = (0..plan.chunks.len())
        .map(|index| function_dir.join(format!("{}.mcfunction", function.chunk_stem(index))))
        .collect();
    try_join_all(
        chunk_files
            .iter()
            .zip(&plan.chunks)
            .map(|(path, commands)| write_function(path, commands)),
    )
    .await?;

    let setup_file = function_dir.join(format!("{}.mcfunction", function.setup_stem()));
    write_function(&setup_file, &plan.setup).await?;

    Ok(DatapackSummary {
        root,
        chunk_files,
        setup_file,
    })
}

async fn write_function(path: &Path, commands: &[String]) -> Result<()> {
    let mut text = commands.join("\n");
    text.push('\n');
    fs::write(path, text).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terrain::{Cell, Grid, SEED_BLOCK};

    fn test_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "mapart_datapack_test_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    fn small_plan() -> CommandPlan {
        CommandPlan {
            chunks: vec![
                vec!["setblock 0 0 0 minecraft:stone replace".to_owned(); 2],
                vec!["fill 0 1 0 0 2 0 minecraft:air".to_owned()],
            ],
            setup: vec!["tp @s 0 10 0".to_owned()],
            grid: Grid::from_rows(vec![vec![Cell::new(SEED_BLOCK, 0)]]),
        }
    }

    #[tokio::test]
    async fn test_write_datapack_layout() {
        let dir = test_dir("layout");
        let function = FunctionName::new("mapart", "art");

        let summary = write_datapack(&dir, "art_pack", &function, &small_plan(), 48)
            .await
            .unwrap();

        let function_dir = dir.join("art_pack/data/mapart/function");
        assert_eq!(summary.root, dir.join("art_pack"));
        assert_eq!(
            summary.chunk_files,
            vec![
                function_dir.join("art_0.mcfunction"),
                function_dir.join("art_1.mcfunction")
            ]
        );
        assert_eq!(summary.setup_file, function_dir.join("art_setup.mcfunction"));

        let chunk0 = std::fs::read_to_string(&summary.chunk_files[0]).unwrap();
        assert_eq!(
            chunk0,
            "setblock 0 0 0 minecraft:stone replace\nsetblock 0 0 0 minecraft:stone replace\n"
        );
        let setup = std::fs::read_to_string(&summary.setup_file).unwrap();
        assert_eq!(setup, "tp @s 0 10 0\n");

        let meta: serde_json::Value =
            serde_json::from_slice(&std::fs::read(dir.join("art_pack/pack.mcmeta")).unwrap())
                .unwrap();
        assert_eq!(meta["pack"]["pack_format"], 48);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_write_datapack_blocking() {
        let dir = test_dir("blocking");
        let function = FunctionName::new("ns", "x");

        let summary =
            tokio_test::block_on(write_datapack(&dir, "p", &function, &small_plan(), 48))
                .unwrap();

        assert!(summary.setup_file.exists());
        assert!(summary.chunk_files.iter().all(|path| path.exists()));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
