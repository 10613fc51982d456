use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing::{error, info};
use varpanel::config::{RcConfig, RcLoader};
use varpanel::controller::App;
use varpanel::logging;
use varpanel::store::{MemoryStore, SystemClipboard};
use varpanel::variables_model::{OsEnvironment, StaticTable, SystemVariableSource};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SystemSource {
    /// Read the process environment
    Os,
    /// Use a fixed demo table
    Demo,
}

/// Browse and edit REST client variables in the terminal
#[derive(Debug, Parser)]
#[command(name = "varpanel", version)]
struct Args {
    /// Environment shown on start
    #[arg(short, long)]
    environment: Option<String>,

    /// JSON seed file: {"env": [{"name": .., "value": .., "enabled": ..}]}
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Where system variables come from
    #[arg(long, value_enum, default_value_t = SystemSource::Os)]
    system_source: SystemSource,

    /// Show values unmasked on start
    #[arg(long)]
    show_values: bool,

    /// Show system variables on start
    #[arg(long)]
    system_variables: bool,

    /// RC file to use instead of .varpanelrc lookup
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print a sample .varpanelrc and exit
    #[arg(long)]
    sample_config: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.sample_config {
        print!("{}", RcLoader::generate_sample_rc());
        return Ok(());
    }

    let log_path = args.log_file.clone().unwrap_or_else(logging::default_log_path);
    let _guard = logging::init(&log_path)?;

    // Load RC configuration, then let flags override it
    let mut config: RcConfig = match &args.config {
        Some(path) => RcLoader::load_from(path),
        None => RcLoader::load_config(),
    };
    if let Some(environment) = &args.environment {
        config.environment = environment.clone();
    }
    config.show_values |= args.show_values;
    config.system_variables |= args.system_variables;

    let store = match &args.seed {
        Some(path) => MemoryStore::from_seed_file(path)?,
        None => MemoryStore::new(),
    };
    let system_variables = match args.system_source {
        SystemSource::Os => OsEnvironment.variables(),
        SystemSource::Demo => StaticTable::demo().variables(),
    };
    info!(
        environment = %config.environment,
        system_variables = system_variables.len(),
        "Starting varpanel"
    );

    let mut app = App::new(
        Box::new(store),
        Box::new(SystemClipboard::new()),
        system_variables,
        &config,
    );
    if let Err(e) = app.load_environment(&config.environment) {
        error!(environment = %config.environment, error = %e, "Could not load environment");
        return Err(e.into());
    }

    app.run()
}
