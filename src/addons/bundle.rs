//! Namespaced addon bundles.
//!
//! Documents are stored under `owner → repo → folder → type`. The folder is
//! the category folder inside the archive; the type is the document's own
//! [`Category`].

use std::collections::BTreeMap;
use std::fmt;

use super::schema::AddonDocument;
use super::types::{AddonError, Category};

/// Documents of one category folder, keyed by type.
pub type FolderDocuments = BTreeMap<Category, AddonDocument>;

type RepoFolders = BTreeMap<String, FolderDocuments>;
type OwnerRepos = BTreeMap<String, RepoFolders>;

/// Fully qualified `owner/repo/folder` namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    pub folder: &'a str,
}

impl Namespace<'_> {
    /// Prefixes an entity id with this namespace.
    #[must_use]
    pub fn qualify(&self, id: &str) -> String {
        format!("{}/{}", self, id)
    }
}

impl fmt::Display for Namespace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.owner, self.repo, self.folder)
    }
}

/// Addon documents organised by namespace.
///
/// Holds either one addon (as produced by extraction) or the aggregate of a
/// whole batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddonBundle {
    owners: BTreeMap<String, OwnerRepos>,
}

impl AddonBundle {
    /// Creates an empty bundle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an addon with no documents yet.
    pub fn ensure_addon(&mut self, owner: &str, repo: &str) {
        self.owners
            .entry(owner.to_string())
            .or_default()
            .entry(repo.to_string())
            .or_default();
    }

    /// Inserts a document, rejecting a second document of the same type in
    /// the same folder.
    pub fn insert(
        &mut self,
        owner: &str,
        repo: &str,
        folder: &str,
        document: AddonDocument,
    ) -> Result<(), AddonError> {
        let kind = document.kind();
        let folder_docs = self
            .owners
            .entry(owner.to_string())
            .or_default()
            .entry(repo.to_string())
            .or_default()
            .entry(folder.to_string())
            .or_default();

        if folder_docs.contains_key(&kind) {
            return Err(AddonError::DuplicateType {
                namespace: format!("{}/{}/{}", owner, repo, folder),
                kind,
            });
        }

        folder_docs.insert(kind, document);
        Ok(())
    }

    /// Moves every addon of `other` into this bundle.
    ///
    /// Addons are keyed by their own `owner/repo`, so bundles of distinct
    /// addons never overlap.
    pub fn merge(&mut self, other: AddonBundle) {
        for (owner, repos) in other.owners {
            self.owners.entry(owner).or_default().extend(repos);
        }
    }

    /// Looks up a document.
    #[must_use]
    pub fn get(&self, owner: &str, repo: &str, folder: &str, kind: Category) -> Option<&AddonDocument> {
        self.owners.get(owner)?.get(repo)?.get(folder)?.get(&kind)
    }

    /// Returns true if the addon `owner/repo` is part of this bundle.
    #[must_use]
    pub fn contains_addon(&self, owner: &str, repo: &str) -> bool {
        self.owners.get(owner).is_some_and(|repos| repos.contains_key(repo))
    }

    /// Number of addons in the bundle.
    #[must_use]
    pub fn addon_count(&self) -> usize {
        self.owners.values().map(BTreeMap::len).sum()
    }

    /// Returns true if the bundle holds no addons.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.addon_count() == 0
    }

    /// Iterates over every folder with its namespace.
    pub fn folders(&self) -> impl Iterator<Item = (Namespace<'_>, &FolderDocuments)> {
        self.owners.iter().flat_map(|(owner, repos)| {
            repos.iter().flat_map(move |(repo, folders)| {
                folders.iter().map(move |(folder, docs)| {
                    (
                        Namespace {
                            owner: owner.as_str(),
                            repo: repo.as_str(),
                            folder: folder.as_str(),
                        },
                        docs,
                    )
                })
            })
        })
    }

    /// Iterates over every document with its namespace.
    pub fn documents(&self) -> impl Iterator<Item = (Namespace<'_>, &AddonDocument)> {
        self.folders()
            .flat_map(|(namespace, docs)| docs.values().map(move |doc| (namespace, doc)))
    }

    /// Lists every loaded `owner/repo/folder` namespace.
    #[must_use]
    pub fn namespaces(&self) -> Vec<String> {
        self.folders().map(|(namespace, _)| namespace.to_string()).collect()
    }
}
