use clap::Parser;
use color_eyre::eyre::WrapErr;
use color_eyre::Result;
use emulation_system::config::Container;
use emulation_system::settings::SETTINGS_FILE_ENV_VAR;
use emulation_system::{compose, orchestrator, Settings, SystemConfiguration};
use env_logger::Env;
use log::info;
use std::path::PathBuf;

/// Validate emulated system configurations and generate compose files
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the system configuration file (JSON, or YAML with a .yaml/.yml extension)
    #[arg(short, long)]
    config: PathBuf,

    /// Path to the settings file
    #[arg(short, long, env = SETTINGS_FILE_ENV_VAR)]
    settings: Option<PathBuf>,

    /// Output path for the compose file; written to stdout when omitted
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only validate the configuration, do not generate a compose file
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Configuration file: {:?}", args.config);

    let system = SystemConfiguration::from_file(&args.config)
        .wrap_err_with(|| format!("Invalid system configuration '{}'", args.config.display()))?;

    for (id, container) in system.containers() {
        info!(
            "{}: {} ({} emulation, {} source at {})",
            id,
            container.hardware(),
            container.emulation_level(),
            container.source_type(),
            container.source_location()
        );
    }

    if args.check {
        info!("Configuration is valid");
        return Ok(());
    }

    let settings = Settings::load(args.settings.as_deref()).wrap_err("Failed to load settings")?;
    let compose_file = orchestrator::generate_compose_file(&system, &settings);

    match &args.output {
        Some(path) => compose::write_compose_file(&compose_file, path)?,
        None => print!("{}", compose::to_yaml_string(&compose_file)?),
    }

    info!("Compose generation completed successfully");
    Ok(())
}
