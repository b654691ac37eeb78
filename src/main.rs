use clap::{Parser, ValueEnum};
use mapart::commands::FunctionName;
use mapart::config::{is_resource_name, Config, DEFAULT_CONFIG_FILE};
use mapart::datapack::write_datapack;
use mapart::image_input::load_pixels;
use mapart::logger::{log, set_min_severity, LogSeverity::*};
use mapart::observer::LogObserver;
use mapart::{render, ColorCache, MapartError, Result, DEFAULT_PALETTE};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Build an image as relief map art in a Minecraft datapack.
#[derive(Parser, Debug)]
#[command(name = "mapart", version)]
struct Cli {
    /// Image to convert
    #[arg(value_name = "FILENAME")]
    filename: PathBuf,

    /// Directory the datapack is written into
    #[arg(long = "out", short = 'o', value_name = "DIR", default_value = ".")]
    out_dir: PathBuf,

    /// Pack and function name (defaults to the image file name)
    #[arg(long, short = 'n')]
    name: Option<String>,

    /// Function namespace, overriding the config file
    #[arg(long, value_name = "NS")]
    namespace: Option<String>,

    /// Scale the image edge by this factor
    #[arg(long, short = 'm', value_enum, default_value_t = Multiplier::One)]
    multiplier: Multiplier,

    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Multiplier {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
}

impl Multiplier {
    fn factor(self) -> usize {
        match self {
            Multiplier::One => 1,
            Multiplier::Two => 2,
        }
    }
}

/// Default function name: the image file stem, lowercased, with anything a function
/// name can't hold replaced by `_`.
fn default_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let name: String = stem
        .chars()
        .map(|c| match c {
            'a'..='z' | '0'..='9' | '_' | '-' | '.' => c,
            _ => '_',
        })
        .collect();
    if name.is_empty() {
        "mapart".to_owned()
    } else {
        name
    }
}

async fn run(args: Cli, mut config: Config) -> Result<()> {
    if let Some(namespace) = args.namespace {
        config.namespace = namespace;
    }
    let name = args.name.unwrap_or_else(|| default_name(&args.filename));
    for value in [&config.namespace, &name] {
        if !is_resource_name(value) {
            return Err(MapartError::ConfigError(format!(
                "{:?} is not a valid function or namespace name",
                value
            )));
        }
    }
    let function = FunctionName::new(config.namespace.clone(), name.clone());

    let edge = config.image_size * args.multiplier.factor();
    log(
        format!("Loading {} at {}x{}", args.filename.display(), edge, edge),
        Info,
    );
    let pixels = load_pixels(&args.filename, edge)?;

    let mut observer = LogObserver;
    let plan = ColorCache::scoped(&config.cache_path, &mut observer, |cache, observer| {
        render(&pixels, &DEFAULT_PALETTE, cache, &config, &function, observer)
    })?;

    let summary = write_datapack(&args.out_dir, &name, &function, &plan, config.pack_format).await?;
    log(
        format!(
            "Wrote {} function files to {}, run /function {}:{} to set up",
            summary.chunk_files.len() + 1,
            summary.root.display(),
            function.namespace,
            function.setup_stem()
        ),
        Info,
    );
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    let config = match Config::read_file(&args.config) {
        Ok(config) => config,
        Err(err) => {
            log(err.to_string(), Fatal);
            return ExitCode::FAILURE;
        }
    };
    if let Ok(severity) = config.log_severity() {
        set_min_severity(severity);
    }

    log("mapart init".to_owned(), Debug);
    match run(args, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log(err.to_string(), Fatal);
            ExitCode::FAILURE
        }
    }
}
