//! Batch addon loading.
//!
//! Fetches and extracts every addon of a batch concurrently, then merges the
//! per-addon bundles once all of them have settled.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::bundle::AddonBundle;
use super::extractor::ArchiveExtractor;
use super::github::{ArchiveSource, GitHubArchiveClient};
use super::parser::parse_addons;
use super::types::{AddonError, AddonSpecifier};

/// Loads batches of addons from an [`ArchiveSource`].
pub struct AddonLoader<S: ArchiveSource + 'static = GitHubArchiveClient> {
    source: Arc<S>,
    extractor: ArchiveExtractor,
}

impl<S: ArchiveSource + 'static> Clone for AddonLoader<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            extractor: self.extractor.clone(),
        }
    }
}

impl Default for AddonLoader<GitHubArchiveClient> {
    fn default() -> Self {
        Self::new(GitHubArchiveClient::default())
    }
}

impl<S: ArchiveSource + 'static> AddonLoader<S> {
    /// Creates a loader validating documents with the default schema.
    #[must_use]
    pub fn new(source: S) -> Self {
        Self::with_extractor(source, ArchiveExtractor::default())
    }

    /// Creates a loader with a custom extractor.
    #[must_use]
    pub fn with_extractor(source: S, extractor: ArchiveExtractor) -> Self {
        Self {
            source: Arc::new(source),
            extractor,
        }
    }

    /// Returns the archive source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Loads every addon named in a comma-separated batch string.
    ///
    /// Either every addon loads and the merged bundle is returned, or the
    /// first failure (in input order) is returned and nothing else.
    pub async fn load(&self, addons: &str) -> Result<AddonBundle, AddonError> {
        let specifiers = dedup(parse_addons(addons)?);
        info!("[ADDON-LOADER] Loading {} addon(s)", specifiers.len());

        let handles: Vec<(AddonSpecifier, JoinHandle<Result<AddonBundle, AddonError>>)> =
            specifiers
                .into_iter()
                .map(|addon| {
                    let handle = tokio::spawn(load_one(
                        Arc::clone(&self.source),
                        self.extractor.clone(),
                        addon.clone(),
                    ));
                    (addon, handle)
                })
                .collect();

        // Settle every unit before looking at any outcome.
        let mut outcomes = Vec::with_capacity(handles.len());
        for (addon, handle) in handles {
            let outcome = handle
                .await
                .unwrap_or_else(|e| Err(AddonError::TaskFailed(format!("{}: {}", addon, e))));
            outcomes.push((addon, outcome));
        }

        let mut bundles = Vec::with_capacity(outcomes.len());
        for (addon, outcome) in outcomes {
            match outcome {
                Ok(bundle) => bundles.push(bundle),
                Err(e) => {
                    warn!("[ADDON-LOADER] {} failed: {}", addon, e);
                    return Err(e);
                }
            }
        }

        let mut aggregate = AddonBundle::new();
        for bundle in bundles {
            aggregate.merge(bundle);
        }

        info!(
            "[ADDON-LOADER] Loaded {} addon(s), {} namespace(s)",
            aggregate.addon_count(),
            aggregate.namespaces().len()
        );
        Ok(aggregate)
    }
}

/// Fetch-then-extract for a single addon.
async fn load_one<S: ArchiveSource + 'static>(
    source: Arc<S>,
    extractor: ArchiveExtractor,
    addon: AddonSpecifier,
) -> Result<AddonBundle, AddonError> {
    let archive = source.fetch(&addon).await?;
    debug!("[ADDON-LOADER] Extracting {} ({} bytes)", addon, archive.len());

    let namespace = addon.namespace();
    tokio::task::spawn_blocking(move || extractor.extract(&archive, &namespace))
        .await
        .map_err(|e| AddonError::TaskFailed(format!("{}: {}", addon, e)))?
}

/// Drops repeated specifiers, keeping the first occurrence.
fn dedup(specifiers: Vec<AddonSpecifier>) -> Vec<AddonSpecifier> {
    let mut seen = HashSet::new();
    specifiers
        .into_iter()
        .filter(|spec| {
            let fresh = seen.insert(spec.clone());
            if !fresh {
                debug!("[ADDON-LOADER] Ignoring repeated addon {}", spec);
            }
            fresh
        })
        .collect()
}
