#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use canvas::doc::{Asset, AssetId};
use clap::{Args, Parser, Subcommand};
use profileboard::state::{self, BoardState};
use profileboard::{export, ingest};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Ingest(#[from] ingest::IngestError),
    #[error(transparent)]
    Export(#[from] export::ExportError),
    #[error(transparent)]
    Board(#[from] state::BoardError),
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },
    #[error("invalid asset list in {}: {source}", path.display())]
    AssetList { path: PathBuf, source: serde_json::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "profileboard", about = "Compose profile boards from images and SVGs")]
struct Cli {
    /// Most verbose level logged to stderr.
    #[arg(long, env = "PROFILEBOARD_LOG_LEVEL", default_value = "info", global = true)]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Turn files and URLs into an asset list (JSON on stdout).
    Ingest {
        #[arg(required = true)]
        sources: Vec<String>,
    },
    /// Place assets on a fresh board and print the exported layout.
    Place(PlaceArgs),
    /// Draw an exported layout as a standalone SVG document.
    Render(RenderArgs),
}

#[derive(Args, Debug)]
struct PlaceArgs {
    /// Asset list produced by `ingest`.
    #[arg(long, env = "PROFILEBOARD_ASSETS")]
    assets: PathBuf,

    /// Assets to place, in order. Defaults to every asset in the list.
    asset_ids: Vec<AssetId>,

    /// Also copy the layout to the system clipboard.
    #[arg(long, env = "PROFILEBOARD_CLIPBOARD")]
    clipboard: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[arg(long)]
    layout: PathBuf,

    /// Asset list used to restore inline vector content.
    #[arg(long, env = "PROFILEBOARD_ASSETS")]
    assets: Option<PathBuf>,

    /// Output file, or stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt().with_max_level(cli.log_level).with_writer(std::io::stderr).init();

    let result = match cli.command {
        Command::Ingest { sources } => run_ingest(&sources),
        Command::Place(args) => run_place(args),
        Command::Render(args) => run_render(args),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_ingest(sources: &[String]) -> Result<(), CliError> {
    let assets = sources.iter().map(|s| ingest::ingest(s)).collect::<Result<Vec<_>, _>>()?;
    tracing::info!(count = assets.len(), "assets ingested");
    print_json(&assets)
}

fn run_place(args: PlaceArgs) -> Result<(), CliError> {
    let board = build_board(read_assets(&args.assets)?, &args.asset_ids)?;
    let layout = export::export_layout(&board.items)?;
    println!("{layout}");
    if args.clipboard {
        export::copy_to_clipboard(&layout)?;
    }
    Ok(())
}

fn run_render(args: RenderArgs) -> Result<(), CliError> {
    let mut items = export::import_layout(&read_file(&args.layout)?)?;
    if let Some(path) = &args.assets {
        export::reattach_content(&mut items, &read_assets(path)?);
    }
    let document = export::compose_document(&items);
    match &args.out {
        Some(path) => {
            fs::write(path, document).map_err(|source| CliError::Write { path: path.clone(), source })?;
            tracing::info!(items = items.len(), out = %path.display(), "layout rendered");
        }
        None => println!("{document}"),
    }
    Ok(())
}

/// Load `assets` into a board and activate `ids` in order (every asset when empty).
fn build_board(assets: Vec<Asset>, ids: &[AssetId]) -> Result<BoardState, CliError> {
    let ids: Vec<AssetId> = if ids.is_empty() { assets.iter().map(|a| a.id).collect() } else { ids.to_vec() };
    let mut board = BoardState::new();
    for asset in assets {
        board.add_asset(asset);
    }
    for id in &ids {
        board.add_to_canvas(id)?;
    }
    Ok(board)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn read_assets(path: &Path) -> Result<Vec<Asset>, CliError> {
    serde_json::from_str(&read_file(path)?).map_err(|source| CliError::AssetList { path: path.to_path_buf(), source })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
