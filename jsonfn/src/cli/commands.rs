use std::io::{self, Read};
use std::path::Path;

use clap::CommandFactory;
use clap_complete::generate;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::{Marshaller, NamingConvention, ProjectionError};
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::error::{CliError, CliResult};
use crate::cli::output;
use crate::config::{global_config_path, Settings};

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let Some(command) = &cli.command else {
        return Err(CliError::Usage("no command given, see --help".into()));
    };
    if let Commands::Completion { shell } = command {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(*shell, &mut cmd, name, &mut io::stdout());
        return Ok(());
    }

    let settings = Settings::load(cli.config.as_deref())?;
    match command {
        Commands::Project {
            file,
            selectors,
            pretty,
            verbatim,
            max_depth,
        } => project(
            &settings,
            file.as_deref(),
            selectors,
            *pretty,
            *verbatim,
            *max_depth,
        ),
        Commands::Tree { selectors } => tree(&settings, selectors),
        Commands::Config { command } => match command {
            ConfigCommands::Show => config_show(&settings),
            ConfigCommands::Path => config_path(),
        },
        Commands::Completion { .. } => Ok(()),
    }
}

#[instrument(skip(settings))]
fn project(
    settings: &Settings,
    file: Option<&Path>,
    selectors: &[String],
    pretty: bool,
    verbatim: bool,
    max_depth: Option<usize>,
) -> CliResult<()> {
    let input = read_input(file)?;
    let document: Value = serde_json::from_str(&input).map_err(CliError::InvalidInput)?;

    let mut options = settings.projection_options();
    if verbatim {
        options.naming = NamingConvention::Verbatim;
    }
    if let Some(depth) = max_depth {
        options.max_depth = depth;
    }
    debug!("options: {:?}", options);

    let value = Marshaller::new(options).to_value(&document, selectors)?;
    let rendered = if pretty || settings.output.pretty {
        serde_json::to_string_pretty(&value)
    } else {
        serde_json::to_string(&value)
    }
    .map_err(ProjectionError::Encode)?;

    output::info(&rendered);
    Ok(())
}

fn read_input(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .map_err(|e| CliError::io(format!("read {}", path.display()), e)),
        _ => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| CliError::io("read stdin", e))?;
            Ok(input)
        }
    }
}

#[instrument(skip(settings))]
fn tree(settings: &Settings, selectors: &[String]) -> CliResult<()> {
    let tree = Marshaller::new(settings.projection_options()).selection(selectors)?;
    if tree.is_empty() {
        output::warning("no selector parsed, every plain field is kept");
    }
    output::header(&tree.outline());
    output::info(&tree.to_tree_string());
    Ok(())
}

fn config_show(settings: &Settings) -> CliResult<()> {
    output::info(&settings.to_toml()?);
    Ok(())
}

fn config_path() -> CliResult<()> {
    match global_config_path() {
        Some(path) => {
            output::info(&path.display());
            if !path.exists() {
                output::warning("global config file does not exist");
            }
            Ok(())
        }
        None => Err(CliError::Usage(
            "no home directory, cannot locate global config".into(),
        )),
    }
}
