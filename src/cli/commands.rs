//! Command dispatch: settings, services, output

use std::io;
use std::path::Path;

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use tracing::{debug, instrument};

use crate::application::services::Extraction;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};
use crate::domain::{RenderOutcome, TreeModelBuilder, TreeNodeConvert, TreeRenderer};
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::table_file::format_table;
use crate::infrastructure::InfraError;

const NO_DATA: &str = "no data: the document contains no elements";

/// Run the parsed command line.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage(
            "no command given, see `svgtree --help`".to_string(),
        ));
    };

    match command {
        Commands::Completion { shell } => cmd_completion(*shell),
        Commands::Config { command } => {
            let settings = load_settings(cli)?;
            match command {
                ConfigCommands::Show => cmd_config_show(&settings),
                ConfigCommands::Template => cmd_config_template(),
                ConfigCommands::Path => cmd_config_path(),
            }
        }
        Commands::Tree { source } => {
            let container = ServiceContainer::new(load_settings(cli)?);
            cmd_tree(&container, cli.from_table, source)
        }
        Commands::Model { source } => {
            let container = ServiceContainer::new(load_settings(cli)?);
            cmd_model(&container, cli.from_table, source)
        }
        Commands::Table { source } => {
            let container = ServiceContainer::new(load_settings(cli)?);
            cmd_table(&container, cli.from_table, source)
        }
        Commands::Export {
            source,
            destination,
        } => {
            if cli.from_table {
                return Err(CliError::InvalidArgs(
                    "--from-table cannot be combined with export".to_string(),
                ));
            }
            let container = ServiceContainer::new(load_settings(cli)?);
            cmd_export(&container, source, destination)
        }
    }
}

/// Settings from files and environment, then command line flags on top.
fn load_settings(cli: &Cli) -> CliResult<Settings> {
    let cwd = std::env::current_dir()
        .map_err(|e| InfraError::io("determine working directory", e))?;
    let mut settings = Settings::load(Some(&cwd))?;

    if let Some(program) = &cli.engine {
        settings.engine.program = program.clone();
    }
    if cli.no_color {
        settings.render.color = false;
    }
    if !settings.render.color {
        colored::control::set_override(false);
    }

    debug!("effective settings: {:?}", settings);
    Ok(settings)
}

fn extract(container: &ServiceContainer, from_table: bool, source: &Path) -> CliResult<Extraction> {
    let service = container.extraction_service(from_table);
    Ok(service.extract(source)?)
}

#[instrument(level = "debug", skip(container))]
fn cmd_tree(container: &ServiceContainer, from_table: bool, source: &Path) -> CliResult<()> {
    let extraction = extract(container, from_table, source)?;
    let renderer = TreeRenderer::new(container.settings.render.style());

    match renderer.render_parallel(&extraction.graph) {
        RenderOutcome::Ready(lines) => {
            for line in &lines {
                println!("{}", renderer.format_line(line));
            }
        }
        RenderOutcome::Empty => output::info(NO_DATA),
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_model(container: &ServiceContainer, from_table: bool, source: &Path) -> CliResult<()> {
    let extraction = extract(container, from_table, source)?;

    match TreeModelBuilder::build_model(&extraction.graph) {
        RenderOutcome::Ready(model) => {
            debug!("model: {} nodes, depth {}", model.len(), model.depth());
            for tree in model.to_tree_string() {
                print!("{}", tree);
            }
        }
        RenderOutcome::Empty => output::info(NO_DATA),
    }
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_table(container: &ServiceContainer, from_table: bool, source: &Path) -> CliResult<()> {
    let service = container.extraction_service(from_table);
    let table = service.extract_table(source)?;

    if table.len() <= 1 {
        output::info(NO_DATA);
        return Ok(());
    }
    print!("{}", format_table(&table, '\t'));
    Ok(())
}

#[instrument(level = "debug", skip(container))]
fn cmd_export(container: &ServiceContainer, source: &Path, destination: &Path) -> CliResult<()> {
    let service = container.extraction_service(false);
    service.export(source, destination)?;
    output::action("Exported", &destination.display());
    Ok(())
}

fn cmd_config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn cmd_config_template() -> CliResult<()> {
    output::info(&Settings::template());
    Ok(())
}

fn cmd_config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::info(&path.display()),
        None => output::warning("no home directory, global config unavailable"),
    }
    Ok(())
}

fn cmd_completion(shell: Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}
