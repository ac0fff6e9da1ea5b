mod cli;
mod config;
mod content;
mod host;
mod model;
mod reducer;
mod storage;

use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;
use host::StateHost;
use reducer::SystemStamper;
use storage::StateStore;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            process::exit(1);
        }
    };

    let root = config
        .data_dir()
        .or_else(StateStore::default_root)
        .unwrap_or_else(|| {
            eprintln!("Could not determine home directory.");
            process::exit(1);
        });

    let store = match StateStore::new(root) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    // The host owns the live state until the end of main; dropping it
    // flushes any pending revision.
    let mut host = StateHost::new(store, Box::new(SystemStamper), config.debounce());

    if let Err(e) = cli::run(cli, &mut host) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
