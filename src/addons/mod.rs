//! Content addon ingestion.
//!
//! Addons are GitHub repositories holding JSON game data (monsters, races,
//! weapons, names, locations). This module resolves `owner/repo`
//! specifiers to zip archives, validates their documents and assembles them
//! into namespaced bundles.
//!
//! # Architecture
//!
//! - **types**: Core data structures (`AddonSpecifier`, `Category`, `AddonError`)
//! - **schema**: Typed addon documents and the `DocumentValidator` seam
//! - **parser**: Comma-separated specifier parsing
//! - **github**: Archive download (`ArchiveSource`, `GitHubArchiveClient`)
//! - **extractor**: Zip walking and document validation
//! - **bundle**: `owner/repo/folder` namespacing and listing
//! - **loader**: Concurrent batch loading with all-or-nothing results
//!
//! # Usage
//!
//! ```no_run
//! use gamemaster::addons::AddonLoader;
//!
//! # async fn run() -> Result<(), gamemaster::addons::AddonError> {
//! let loader: AddonLoader = AddonLoader::default();
//! let bundle = loader.load("slack-rpg/addon-official").await?;
//! for namespace in bundle.namespaces() {
//!     println!("{}", namespace);
//! }
//! # Ok(())
//! # }
//! ```

mod bundle;
mod extractor;
mod github;
mod loader;
mod parser;
mod schema;
mod types;

pub use bundle::{AddonBundle, FolderDocuments, Namespace};
pub use extractor::ArchiveExtractor;
pub use github::{
    ArchiveSource, DEFAULT_BRANCH, DEFAULT_SOURCE_HOST, DEFAULT_USER_AGENT, GitHubArchiveClient,
};
pub use loader::AddonLoader;
pub use parser::{parse_addons, parse_specifier};
pub use schema::{
    AddonContent, AddonDocument, ClassesData, DocumentValidator, Entity, LocationsData,
    Monster, MonstersData, NameParts, PlayerClass, Race, RacesData, SchemaValidator, Weapon,
    WeaponType, WeaponsData,
};
pub use types::{AddonError, AddonSpecifier, Category, IGNORED_FOLDERS, RawArchive};
