//! Gamemaster
//!
//! Loads third-party RPG content addons (monsters, races, weapons, names,
//! locations) from GitHub repository archives and merges them into one
//! namespaced game-data store.
//!
//! # Architecture
//!
//! - **Addons Module**: specifier parsing, archive download, extraction,
//!   validation and concurrent batch loading
//! - **Seed Module**: the game-data store and per-category merge rules
//! - **GameMaster**: per-team facade with all-or-nothing reloads
//! - **Dice / Commands**: dice notation, rolling and chat command parsing
//! - **Config / Logging**: `~/.gmrc` settings and file logging
//!
//! # Usage
//!
//! ```no_run
//! use gamemaster::{Config, GameMaster};
//!
//! # async fn run() -> Result<(), gamemaster::addons::AddonError> {
//! let config = Config::default();
//! let mut gm = GameMaster::from_config("team-1", &config);
//! gm.load_addons("slack-rpg/addon-official").await?;
//! println!("{:?}", gm.addon_namespaces());
//! # Ok(())
//! # }
//! ```

// Clippy configuration - allow common patterns
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

pub mod addons;
pub mod commands;
pub mod config;
pub mod dice;
pub mod gamemaster;
pub mod logging;
pub mod seed;

// Re-export main types
pub use addons::{AddonBundle, AddonError, AddonLoader};
pub use commands::{Command, CommandError, CommandReply};
pub use config::Config;
pub use dice::{Dice, DiceError, DiceRoll};
pub use gamemaster::GameMaster;
pub use seed::SeedStore;
