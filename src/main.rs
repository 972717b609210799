//! Desktop widgets command-line entry point.
//!
//! Loads the configuration, makes sure the built-in plugins are installed,
//! and dispatches `<category> <command> [args...]` to the CLI service.

use std::{error::Error, path::PathBuf, process, sync::Arc};

use clap::Parser;
use desktop_widgets::{
    cli::{CliService, formatting::format_error},
    config::{Config, ConfigPaths},
    plugins::{PluginCatalog, install_builtin_plugins},
    profiles::ProfileStore,
    settings::FileSettings,
    tracing_config,
};
use tracing::{debug, info, instrument, warn};

#[derive(Parser)]
#[command(name = "desktop-widgets")]
#[command(about = "Manage desktop widget profiles and layouts")]
#[command(disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Configuration file to use instead of the default location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Also write logs to the application log directory.
    #[arg(long)]
    log_file: bool,

    /// `<category> <command> [args...]`, or `help [category] [command]`.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if cli.log_file {
        tracing_config::init_with_file(config.general.log_level)?;
    } else {
        tracing_config::init(config.general.log_level)?;
    }

    let plugin_dir = ConfigPaths::plugin_dir(&config)?;
    prepare_plugins(&plugin_dir).await;

    let catalog = Arc::new(PluginCatalog::builtin(&plugin_dir));
    let discovered = catalog.discover().await?;
    debug!(discovered, "plugins ready");

    let settings = FileSettings::open(ConfigPaths::settings_file(&config)?);
    let store = ProfileStore::new(settings);
    let cli_service = CliService::new(&config, store, catalog);

    run_cli_command(&cli_service, &cli.args).await;
    Ok(())
}

/// Installs the built-in plugins; a failure leaves only user plugins.
#[instrument(skip_all, fields(dir = %plugin_dir.display()))]
async fn prepare_plugins(plugin_dir: &std::path::Path) {
    if !plugin_dir.exists() {
        info!("Creating plugin directory");
    }
    if let Err(e) = install_builtin_plugins(plugin_dir).await {
        warn!(error = %e, "cannot install built-in plugins");
    }
}

/// Executes one CLI command through the CliService.
///
/// Prints the output on success; prints the error and exits with status 1
/// on failure.
async fn run_cli_command(cli_service: &CliService, args: &[String]) {
    let category = args.first().map(String::as_str).unwrap_or("help");
    let command = args.get(1).map(String::as_str).unwrap_or("");
    let command_args = args.get(2..).unwrap_or(&[]);

    match cli_service
        .execute_command(category, command, command_args)
        .await
    {
        Ok(output) => {
            if !output.trim().is_empty() {
                println!("{output}");
            }
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            process::exit(1);
        }
    }
}
