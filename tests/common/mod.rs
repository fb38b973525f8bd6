//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};

use gamemaster::addons::{AddonLoader, GitHubArchiveClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;

pub const NAMES: &str = r#"{
    "type": "names",
    "version": "1.0.0",
    "data": { "pre": ["Al", "Bra"], "name": ["dor", "kan"], "sur": ["ic", "us"] }
}"#;

pub const LOCATIONS: &str = r#"{
    "type": "locations",
    "version": "1.0.0",
    "data": {
        "names": { "pre": ["North"], "name": ["wood"], "sur": ["shire"] },
        "descriptions": ["A quiet place"],
        "adjectives": ["misty"]
    }
}"#;

pub const MONSTERS: &str = r#"{
    "type": "monsters",
    "version": "1.0.0",
    "data": {
        "monsters": [
            { "id": "goblin", "name": "Goblin", "level": 1, "health": 7, "damage": "1d6" }
        ]
    }
}"#;

pub const WEAPONS: &str = r#"{
    "type": "weapons",
    "version": "1.0.0",
    "data": {
        "types": [ { "id": "sword", "name": "Sword" } ],
        "weapons": [ { "id": "longsword", "name": "Longsword", "type": "sword", "damage": "1d8" } ]
    }
}"#;

/// Builds a zip archive; paths ending in `/` become directory entries.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    for (entry_path, content) in entries {
        if entry_path.ends_with('/') {
            writer.add_directory(*entry_path, options).unwrap();
        } else {
            writer.start_file(*entry_path, options).unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
    }
    writer.finish().unwrap().into_inner()
}

/// Archive laid out like a GitHub branch download of `repo`.
pub fn addon_archive(repo: &str, files: &[(&str, &str)]) -> Vec<u8> {
    let root = format!("{}-master/", repo);
    let mut entries: Vec<(String, &str)> = vec![
        (root.clone(), ""),
        (format!("{}README.md", root), "# Addon"),
    ];
    for (file, content) in files {
        entries.push((format!("{}{}", root, file), *content));
    }
    let borrowed: Vec<(&str, &str)> = entries.iter().map(|(p, c)| (p.as_str(), *c)).collect();
    build_zip(&borrowed)
}

/// Serves `archive` for `owner/repo` on the mock host.
pub async fn serve_archive(server: &MockServer, owner: &str, repo: &str, archive: Vec<u8>) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/{}/archive/master.zip", owner, repo)))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/zip")
                .set_body_bytes(archive),
        )
        .mount(server)
        .await;
}

/// Loader pointed at the mock host.
pub fn loader_for(server: &MockServer) -> AddonLoader {
    AddonLoader::new(GitHubArchiveClient::new(&server.uri(), "master"))
}
