use clap::Parser;
use std::io;
use std::path::PathBuf;
use task_manager::TaskStore;
use task_manager::config::{Config, DEFAULT_CONFIG_FILE};
use task_manager::menu::Menu;
use task_manager::storage;
use tracing::info;

#[derive(Parser, Debug)]
#[command(version, about = "Interactive task manager")]
struct Cli {
    /// TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Tasks file to load before the menu starts
    #[arg(long)]
    load: Option<PathBuf>,

    /// Overrides the configured log level (error, warn, info, debug, trace)
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let mut config = Config::load(&args.config)?;
    if let Some(level) = args.log_level {
        config.log_level = level;
    }

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.tracing_level())
        .init();

    let store = match &args.load {
        Some(path) => storage::load_from_file(path)?,
        None => TaskStore::default(),
    };
    info!(tasks = store.count(), save_dir = %config.save_dir.display(), "starting");

    let stdin = io::stdin();
    let mut menu = Menu::new(stdin.lock(), io::stdout(), store, config.save_dir);
    menu.run()?;
    Ok(())
}
