//! Gamemaster - Main entry point.
//!
//! Loads a batch of content addons and reports what was loaded.
//!
//! Usage: gm [OPTIONS] [ADDONS]
//!
//! Options:
//!   --version, -v    Show version
//!   --json           Print the seeded game data as JSON
//!   --roll DICE      Roll dice (e.g. 2d6+1) and exit
//!
//! ADDONS is a comma-separated list of owner/repo pairs. When omitted, the
//! `addons` setting of ~/.gmrc (or APP_ADDONS) is used.

use std::env;
use std::process;

use gamemaster::logging;
use gamemaster::{Config, Dice, GameMaster};

/// Crate version.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Team id used when running from the command line.
const CLI_TEAM_ID: &str = "cli";

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let args: Vec<String> = env::args().collect();

    // Handle --version flag
    if args.iter().any(|a| a == "--version" || a == "-v") {
        println!("gamemaster v{}", VERSION);
        return;
    }

    // Handle --roll flag
    if let Some(pos) = args.iter().position(|a| a == "--roll") {
        let notation = args.get(pos + 1).map(String::as_str).unwrap_or_default();
        match Dice::parse(notation) {
            Ok(dice) => println!("{}", dice.roll(&mut rand::thread_rng())),
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        }
        return;
    }

    let as_json = args.iter().any(|a| a == "--json");

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            Config::default()
        }
    };

    if let Err(e) = logging::init(&config.log_config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // First positional argument overrides the configured batch
    let addons = args
        .iter()
        .skip(1)
        .find(|a| !a.starts_with('-'))
        .cloned()
        .unwrap_or_else(|| config.addons.clone());

    let mut gm = GameMaster::from_config(CLI_TEAM_ID, &config);
    if let Err(e) = gm.load_addons(&addons).await {
        tracing::error!("Addon load failed: {}", e);
        eprintln!("{}", e);
        process::exit(1);
    }

    if as_json {
        match serde_json::to_string_pretty(gm.seeds()) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize seeds: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let namespaces = gm.addon_namespaces();
    println!("Loaded {} addon namespace(s)", namespaces.len());
    for namespace in namespaces {
        println!("  {}", namespace);
    }
    if let Some(name) = gm.generate_name(&mut rand::thread_rng()) {
        println!("Sample name: {}", name);
    }
}
