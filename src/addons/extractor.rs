//! Addon archive extraction.
//!
//! Walks a zip archive laid out as `<root>/<folder>/<file>.json`, validates
//! every eligible file and assembles the documents into an [`AddonBundle`].

use std::io::{Cursor, Read};
use std::sync::Arc;

use tracing::{debug, info};

use super::bundle::AddonBundle;
use super::schema::{AddonDocument, DocumentValidator, SchemaValidator};
use super::types::{AddonError, IGNORED_FOLDERS};

/// Number of path segments of an eligible entry: root, folder, file.
const CONTENT_DEPTH: usize = 3;

/// Extracts addon documents from archives.
#[derive(Clone)]
pub struct ArchiveExtractor {
    validator: Arc<dyn DocumentValidator>,
}

impl Default for ArchiveExtractor {
    fn default() -> Self {
        Self::new(Arc::new(SchemaValidator))
    }
}

impl std::fmt::Debug for ArchiveExtractor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArchiveExtractor").finish_non_exhaustive()
    }
}

impl ArchiveExtractor {
    /// Creates an extractor using the given validator.
    #[must_use]
    pub fn new(validator: Arc<dyn DocumentValidator>) -> Self {
        Self { validator }
    }

    /// Extracts every document of one addon.
    ///
    /// `namespace` must be `owner/repo`. Entries that are not exactly two
    /// levels below the archive root, have an empty path segment, or live in
    /// an ignored folder are skipped silently.
    pub fn extract(&self, archive: &[u8], namespace: &str) -> Result<AddonBundle, AddonError> {
        let (owner, repo) = split_namespace(namespace)?;

        let mut zip = zip::ZipArchive::new(Cursor::new(archive))
            .map_err(|e| AddonError::Archive(e.to_string()))?;

        let mut bundle = AddonBundle::new();
        bundle.ensure_addon(owner, repo);

        for index in 0..zip.len() {
            let mut entry = zip
                .by_index(index)
                .map_err(|e| AddonError::Archive(e.to_string()))?;

            if entry.is_dir() {
                continue;
            }

            let entry_path = entry.name().to_string();
            let segments: Vec<&str> = entry_path.split('/').collect();
            if segments.len() != CONTENT_DEPTH
                || segments.iter().any(|segment| segment.is_empty())
                || IGNORED_FOLDERS.contains(&segments[1])
            {
                debug!("[ADDON] Skipping entry {}", entry_path);
                continue;
            }
            let folder = segments[1];

            let mut text = String::new();
            entry.read_to_string(&mut text).map_err(|e| AddonError::Validation {
                entry_path: entry_path.clone(),
                detail: e.to_string(),
            })?;

            let document = self.parse_entry(&entry_path, &text)?;
            debug!(
                "[ADDON] {}: {} document v{}",
                entry_path,
                document.kind(),
                document.version
            );
            bundle.insert(owner, repo, folder, document)?;
        }

        info!(
            "[ADDON] Extracted {}: {} namespace(s)",
            namespace,
            bundle.namespaces().len()
        );
        Ok(bundle)
    }

    /// Validates and parses one entry.
    fn parse_entry(&self, entry_path: &str, text: &str) -> Result<AddonDocument, AddonError> {
        let validation_error = |detail: String| AddonError::Validation {
            entry_path: entry_path.to_string(),
            detail,
        };

        self.validator.check(text).map_err(validation_error)?;
        AddonDocument::from_json(text).map_err(|e| validation_error(e.to_string()))
    }
}

/// Splits `owner/repo`, rejecting anything else.
fn split_namespace(namespace: &str) -> Result<(&str, &str), AddonError> {
    match namespace.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
            Ok((owner, repo))
        }
        _ => Err(AddonError::Namespace(namespace.to_string())),
    }
}
