mod args;
mod error;

use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use simplelog::{Config, LevelFilter, WriteLogger};
use splitdom::{Element, MemorySurface, Surface};
use splitgrid::prelude::*;

use crate::args::{Args, SortArg};
use crate::error::CliError;

const CONTAINER_ID: &str = "grid";

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<String, CliError> {
    init_logger(&args.log, args.verbose)?;

    let text = fs::read_to_string(&args.data).map_err(|e| CliError::io(&args.data, e))?;
    let data: serde_json::Value =
        serde_json::from_str(&text).map_err(|e| CliError::json(&args.data, e))?;
    let options = load_options(args.options.as_deref())?;

    log::info!("Rendering {}", args.data.display());
    render(data, options, &args.sorts, &args.select).ok_or_else(|| CliError::Empty(args.data.clone()))
}

fn init_logger(path: &Path, verbose: bool) -> Result<(), CliError> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = File::create(path).map_err(|e| CliError::io(path, e))?;
    WriteLogger::init(level, Config::default(), log_file)?;
    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<Options, CliError> {
    let Some(path) = path else {
        return Ok(Options::default());
    };
    let text = fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
    let overrides: OptionOverrides =
        serde_json::from_str(&text).map_err(|e| CliError::json(path, e))?;
    overrides.validate()?;
    Ok(Options::default().merged(&overrides))
}

/// Build a grid over `data`, apply sorts then selection, and return the
/// container markup followed by the style sheet. `None` when nothing rendered.
fn render(
    data: serde_json::Value,
    options: Options,
    sorts: &[SortArg],
    select: &[usize],
) -> Option<String> {
    let mut surface = MemorySurface::new();
    let root = surface.document().root();
    surface
        .document_mut()
        .mount(root, &Element::div().id(CONTAINER_ID))?;

    let options = Options {
        source_type: SourceType::Object,
        ..options
    };
    let mut grid = Grid::new(surface, CONTAINER_ID, data, options, PlatformCapabilities::mouse());
    if !grid.is_live() {
        return None;
    }

    for sort in sorts {
        grid.sort_column(sort.column, sort.ascending);
    }
    if !select.is_empty() {
        if !grid.options().allow_selection {
            log::warn!("Ignoring --select: allowSelection is off");
        }
        grid.select_indexes(select);
    }
    log::debug!("{grid:?}");

    Some(format!("{}\n{}", grid.markup(), grid.css()))
}
