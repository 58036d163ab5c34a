use std::io::{self, BufRead, Write};

use clap::CommandFactory;
use clap_complete::generate;
use tracing::{debug, instrument};

use crate::application::services::{SessionEvent, SessionOutcome, SourceKind, TreemapSession};
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands, SourceArgs, ViewportArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, Settings};
use crate::domain::{Point, Tile, TreeArena, TreeNodeConvert};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    match &cli.command {
        Some(Commands::Layout { source, viewport }) => _layout(cli, source, viewport),
        Some(Commands::Locate {
            source,
            viewport,
            x,
            y,
        }) => _locate(cli, source, viewport, Point::new(*x, *y)),
        Some(Commands::Tree { source }) => _tree(cli, source),
        Some(Commands::Session { source, viewport }) => _session(cli, source, viewport),
        Some(Commands::Config { command }) => _config(cli, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(*shell, &mut cmd, name, &mut io::stdout());
            Ok(())
        }
        None => Err(CliError::Usage(
            "no command given, see --help".to_string(),
        )),
    }
}

/// Settings from all layers, with the command line on top.
fn settings(cli: &Cli, viewport: Option<&ViewportArgs>) -> CliResult<Settings> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        settings.colors.seed = Some(seed);
    }
    if let Some(viewport) = viewport {
        if let Some(width) = viewport.width {
            settings.viewport.width = width;
        }
        if let Some(height) = viewport.height {
            settings.viewport.height = height;
        }
    }
    debug!("settings: {:?}", settings);
    Ok(settings)
}

fn load(settings: Settings, kind: &SourceKind) -> CliResult<TreeArena> {
    let container = ServiceContainer::new(settings)?;
    Ok(container.load_tree(kind)?)
}

fn tile_line(tile: &Tile) -> String {
    let r = tile.rect;
    format!("{} {} {} {} {}", r.x, r.y, r.width, r.height, tile.color)
}

#[instrument(skip(cli))]
fn _layout(cli: &Cli, source: &SourceArgs, viewport: &ViewportArgs) -> CliResult<()> {
    let settings = settings(cli, Some(viewport))?;
    let rect = settings.viewport.rect();
    let tree = load(settings, &source.kind())?;
    for tile in tree.layout(rect)? {
        output::info(&tile_line(&tile));
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _locate(
    cli: &Cli,
    source: &SourceArgs,
    viewport: &ViewportArgs,
    point: Point,
) -> CliResult<()> {
    let settings = settings(cli, Some(viewport))?;
    let rect = settings.viewport.rect();
    let tree = load(settings, &source.kind())?;
    match tree.locate(point, rect)? {
        Some(hit) => output::info(&hit),
        None => output::warning(&format!("no leaf at ({}, {})", point.x, point.y)),
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _tree(cli: &Cli, source: &SourceArgs) -> CliResult<()> {
    let settings = settings(cli, None)?;
    let tree = load(settings, &source.kind())?;
    output::info(&tree.to_tree_string());
    output::action(
        "Total",
        &format!(
            "{} in {} leaves, depth {}",
            tree.total(),
            tree.leaves().len(),
            tree.depth()
        ),
    );
    Ok(())
}

#[instrument(skip(cli))]
fn _session(cli: &Cli, source: &SourceArgs, viewport: &ViewportArgs) -> CliResult<()> {
    let settings = settings(cli, Some(viewport))?;
    let rect = settings.viewport.rect();
    let tree = load(settings, &source.kind())?;
    let mut session = TreemapSession::new(tree, rect)?;
    let stdin = io::stdin();
    run_session(&mut session, stdin.lock(), &mut io::stdout())
}

/// Feeds each input line to the session and writes what it did.
///
/// Unparseable lines are reported and skipped; errors from the tree stop the
/// session.
pub fn run_session(
    session: &mut TreemapSession,
    input: impl BufRead,
    out: &mut impl Write,
) -> CliResult<()> {
    let write_err = |e: io::Error| InfraError::io("write session output", e);
    for line in input.lines() {
        let line = line.map_err(|e| InfraError::io("read session input", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let event: SessionEvent = match line.parse() {
            Ok(event) => event,
            Err(e @ ApplicationError::InvalidEvent(_)) => {
                output::warning(&e);
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        match session.apply(event)? {
            SessionOutcome::Quit => break,
            SessionOutcome::Frame(tiles) => {
                for tile in &tiles {
                    writeln!(out, "{}", tile_line(tile)).map_err(write_err)?;
                }
            }
            SessionOutcome::Deleted(Some(deleted)) => {
                writeln!(out, "deleted {}", deleted).map_err(write_err)?;
            }
            SessionOutcome::Deleted(None) => {
                writeln!(out, "nothing to delete").map_err(write_err)?;
            }
            SessionOutcome::Selected(_) | SessionOutcome::Resized(_) => {
                writeln!(out, "{}", session.status_line()).map_err(write_err)?;
            }
        }
    }
    Ok(())
}

#[instrument(skip(cli))]
fn _config(cli: &Cli, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            let settings = settings(cli, None)?;
            output::info(&settings.to_toml()?);
        }
        ConfigCommands::Path => {
            output::header("Config files");
            match global_config_path() {
                Some(path) => output::detail(&format!("global: {}", path.display())),
                None => output::detail(&"global: <no config directory>"),
            }
            if let Some(path) = &cli.config {
                output::detail(&format!("explicit: {}", path.display()));
            }
        }
    }
    Ok(())
}
