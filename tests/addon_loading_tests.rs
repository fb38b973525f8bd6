//! Integration tests for fetching and loading addons from a source host.
//!
//! A local wiremock server stands in for GitHub.

mod common;

use common::*;
use gamemaster::addons::{
    AddonError, ArchiveExtractor, ArchiveSource, Category, GitHubArchiveClient, parse_specifier,
};
use wiremock::MockServer;

// ============================================================================
// Archive Fetcher
// ============================================================================

mod fetch {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Test fetch returns archive bytes.
    #[tokio::test]
    async fn test_fetch_returns_archive_bytes() {
        let server = MockServer::start().await;
        let archive = addon_archive("pack", &[("default/names.json", NAMES)]);
        serve_archive(&server, "alice", "pack", archive.clone()).await;

        let client = GitHubArchiveClient::new(&server.uri(), "master");
        let addon = parse_specifier("alice/pack").unwrap();
        let bytes = client.fetch(&addon).await.unwrap();
        assert_eq!(bytes, archive);
    }

    /// Test fetch unknown repo is remote 404.
    #[tokio::test]
    async fn test_fetch_unknown_repo_is_remote_404() {
        let server = MockServer::start().await;

        let client = GitHubArchiveClient::new(&server.uri(), "master");
        let addon = parse_specifier("not/real").unwrap();
        let err = client.fetch(&addon).await.unwrap_err();
        assert_eq!(err, AddonError::Remote { status: 404 });
        assert_eq!(err.to_string(), "GitHub responded with: 404");
    }
}

// ============================================================================
// Extraction of downloaded archives
// ============================================================================

mod extract {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Test fetched archive extracts.
    #[tokio::test]
    async fn test_fetched_archive_extracts() {
        let server = MockServer::start().await;
        let archive = addon_archive(
            "pack",
            &[
                ("default/names.json", NAMES),
                ("default/monsters.json", MONSTERS),
                ("arms/weapons.json", WEAPONS),
            ],
        );
        serve_archive(&server, "alice", "pack", archive).await;

        let client = GitHubArchiveClient::new(&server.uri(), "master");
        let bytes = client.fetch(&parse_specifier("alice/pack").unwrap()).await.unwrap();
        let bundle = ArchiveExtractor::default().extract(&bytes, "alice/pack").unwrap();

        assert_eq!(bundle.namespaces(), vec!["alice/pack/arms", "alice/pack/default"]);
        assert!(bundle.get("alice", "pack", "arms", Category::Weapons).is_some());
    }

    /// Test duplicate type names namespace.
    #[test]
    fn test_duplicate_type_names_namespace() {
        let archive = addon_archive(
            "pack",
            &[("default/one.json", MONSTERS), ("default/two.json", MONSTERS)],
        );
        let err = ArchiveExtractor::default().extract(&archive, "alice/pack").unwrap_err();
        assert_eq!(err.to_string(), "alice/pack/default has more than one monsters");
    }
}

// ============================================================================
// Batch loading
// ============================================================================

mod batch {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Test load lists one namespace per folder.
    #[tokio::test]
    async fn test_load_lists_one_namespace_per_folder() {
        let server = MockServer::start().await;
        serve_archive(
            &server,
            "alice",
            "pack",
            addon_archive(
                "pack",
                &[
                    ("default/names.json", NAMES),
                    ("default/locations.json", LOCATIONS),
                    ("bestiary/monsters.json", MONSTERS),
                ],
            ),
        )
        .await;
        serve_archive(
            &server,
            "bob",
            "arsenal",
            addon_archive("arsenal", &[("arms/weapons.json", WEAPONS)]),
        )
        .await;

        let bundle = loader_for(&server)
            .load("alice/pack, bob/arsenal")
            .await
            .unwrap();

        assert_eq!(
            bundle.namespaces(),
            vec!["alice/pack/bestiary", "alice/pack/default", "bob/arsenal/arms"]
        );
    }

    /// Test valid and missing addon fails batch.
    #[tokio::test]
    async fn test_valid_and_missing_addon_fails_batch() {
        let server = MockServer::start().await;
        serve_archive(
            &server,
            "alice",
            "pack",
            addon_archive("pack", &[("default/names.json", NAMES)]),
        )
        .await;

        let err = loader_for(&server)
            .load("alice/pack,not/real")
            .await
            .unwrap_err();
        assert!(err.is_remote_status(404), "got {:?}", err);
    }

    /// Test invalid document fails batch.
    #[tokio::test]
    async fn test_invalid_document_fails_batch() {
        let server = MockServer::start().await;
        let bad = r#"{ "type": "names", "version": "1", "data": { "pre": [], "name": [], "sur": [] }, "author": "me" }"#;
        serve_archive(
            &server,
            "alice",
            "broken",
            addon_archive("broken", &[("default/names.json", bad)]),
        )
        .await;

        let err = loader_for(&server).load("alice/broken").await.unwrap_err();
        match err {
            AddonError::Validation { entry_path, .. } => {
                assert_eq!(entry_path, "broken-master/default/names.json");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    /// Test parse errors pass through.
    #[tokio::test]
    async fn test_parse_errors_pass_through() {
        let server = MockServer::start().await;
        let err = loader_for(&server).load("parsefail").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid Addon Name: parsefail");
    }
}
