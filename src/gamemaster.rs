//! Game master state for one team.
//!
//! Owns the loaded addon bundle and the seed store built from it. A load
//! either fully succeeds and replaces both, or fails and leaves the previous
//! state untouched.
//!
//! Also answers the chat commands players send to the game (dice rolls).

use rand::Rng;
use tracing::{debug, info, warn};

use crate::addons::{AddonBundle, AddonError, AddonLoader, ArchiveSource, GitHubArchiveClient};
use crate::commands::{self, Command, CommandError, CommandReply};
use crate::config::Config;
use crate::dice::{Dice, DiceError, DiceRoll};
use crate::seed::{SeedStore, generate_name};

/// Addon-backed game state for one team.
pub struct GameMaster<S: ArchiveSource + 'static = GitHubArchiveClient> {
    team_id: String,
    loader: AddonLoader<S>,
    addons: AddonBundle,
    seeds: SeedStore,
}

impl GameMaster<GitHubArchiveClient> {
    /// Creates a game master fetching from the configured archive host.
    #[must_use]
    pub fn from_config(team_id: &str, config: &Config) -> Self {
        let client = GitHubArchiveClient::with_user_agent(
            &config.source_host,
            &config.branch,
            &config.user_agent,
        );
        Self::new(team_id, AddonLoader::new(client))
    }
}

impl<S: ArchiveSource + 'static> GameMaster<S> {
    /// Creates a game master with no addons loaded.
    #[must_use]
    pub fn new(team_id: &str, loader: AddonLoader<S>) -> Self {
        Self {
            team_id: team_id.to_string(),
            loader,
            addons: AddonBundle::new(),
            seeds: SeedStore::new(),
        }
    }

    /// Id of the team this game master serves.
    #[must_use]
    pub fn team_id(&self) -> &str {
        &self.team_id
    }

    /// Loads a comma-separated batch of addons and reseeds the store.
    ///
    /// On error nothing changes: the previous bundle and store stay active.
    pub async fn load_addons(&mut self, addons: &str) -> Result<&AddonBundle, AddonError> {
        let bundle = self.loader.load(addons).await?;
        let seeds = SeedStore::from_bundle(&bundle).inspect_err(|e| {
            warn!("[SEED] Team {}: seeding failed: {}", self.team_id, e);
        })?;

        info!(
            "[SEED] Team {}: {} namespace(s) active",
            self.team_id,
            bundle.namespaces().len()
        );
        self.addons = bundle;
        self.seeds = seeds;
        Ok(&self.addons)
    }

    /// Lists the `owner/repo/folder` namespaces currently loaded.
    #[must_use]
    pub fn addon_namespaces(&self) -> Vec<String> {
        self.addons.namespaces()
    }

    /// Currently loaded addons.
    #[must_use]
    pub fn addons(&self) -> &AddonBundle {
        &self.addons
    }

    /// Seed store built from the loaded addons.
    #[must_use]
    pub fn seeds(&self) -> &SeedStore {
        &self.seeds
    }

    /// Generates a character name from the seeded name parts.
    pub fn generate_name<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<String> {
        generate_name(&self.seeds.names, rng)
    }

    /// Parses `NdS[+-M]` dice notation.
    pub fn parse_dice(&self, dice: &str) -> Result<Dice, DiceError> {
        Dice::parse(dice)
    }

    /// Rolls a dice expression.
    pub fn roll<R: Rng + ?Sized>(&self, dice: &str, rng: &mut R) -> Result<DiceRoll, DiceError> {
        Ok(self.parse_dice(dice)?.roll(rng))
    }

    /// Finds the commands in a chat message.
    #[must_use]
    pub fn parse_commands(&self, message: &str) -> Vec<Command> {
        commands::parse_commands(message)
    }

    /// Runs every command in a player's message and returns the replies.
    ///
    /// A message without commands is an error, as is any command that fails.
    pub fn command<R: Rng + ?Sized>(
        &self,
        player_id: &str,
        message: &str,
        rng: &mut R,
    ) -> Result<Vec<CommandReply>, CommandError> {
        let found = self.parse_commands(message);
        if found.is_empty() {
            return Err(CommandError::NoCommands(message.to_string()));
        }

        found
            .into_iter()
            .map(|command| match command {
                Command::Roll(dice) => {
                    let roll = self.roll(&dice, rng)?;
                    debug!(
                        "[COMMAND] Team {}: {} rolled {}",
                        self.team_id, player_id, roll
                    );
                    Ok(CommandReply::public(roll.to_string()))
                }
            })
            .collect()
    }
}
