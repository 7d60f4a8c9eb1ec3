use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use gridfill::{BoardBuilder, TileGrid, WordIndex};
use log::{info, LevelFilter};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Enumerate every way to fill a grid template with dictionary words
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Word list, one word per line
    dictionary: Option<PathBuf>,

    /// Template, one row per line: 'O' for an open tile, 'X' for a closed tile
    template: Option<PathBuf>,

    /// Print every board found
    #[arg(short, long)]
    print: bool,

    /// Stop after this many boards
    #[arg(short = 'n', long)]
    limit: Option<usize>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long)]
    debug: bool,
}

/// Log to stderr at info level, or debug level with `--debug`.
fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn run(cli: &Cli) -> Result<()> {
    let (dictionary, template) = match (&cli.dictionary, &cli.template) {
        (Some(dictionary), Some(template)) => (dictionary, template),
        _ => {
            println!("2 arguments required (dictionary file, template file)");
            println!("{}", Cli::command().render_usage());
            return Ok(());
        }
    };

    let t0 = Instant::now();
    let index = WordIndex::from_file(dictionary)
        .with_context(|| format!("loading dictionary {}", dictionary.display()))?;
    let grid = TileGrid::from_file(template)
        .with_context(|| format!("loading template {}", template.display()))?;
    info!(
        "Loaded {} and a {}x{} template in {:?}",
        index,
        grid.width(),
        grid.height(),
        t0.elapsed()
    );

    let mut builder = BoardBuilder::new();
    if let Some(limit) = cli.limit {
        builder = builder.with_limit(limit);
    }
    let t0 = Instant::now();
    let (status, stats) = builder.visit(&index, &grid, |board| {
        if cli.print {
            println!("{}\n", board);
        }
        ControlFlow::Continue(())
    });
    info!("Search {:?} took {:?}: {:?}", status, t0.elapsed(), stats);
    println!("Boards found: {}", stats.boards);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logger(cli.debug);
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:?}", err);
            ExitCode::FAILURE
        }
    }
}
