//! End-to-end runs of the command line front end against temporary files.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::path::{Path, PathBuf};

use clap::Parser;
use meridian::{Cli, run};
use pretty_assertions::assert_eq;
use tempfile::{TempDir, tempdir};

const PETSTORE: &str = r"
openapi: 3.1.0
info:
  title: Petstore
paths:
  /pets:
    get:
      operationId: listPets
    post:
      operationId: createPet
      requestBody:
        content:
          application/json:
            examples:
              dog:
                value:
                  kind: dog
";

struct Fixture {
    dir: TempDir,
    document: PathBuf,
    storage: PathBuf,
}

fn fixture() -> Fixture {
    let dir = tempdir().expect("temp dir");
    let document = dir.path().join("petstore.yaml");
    std::fs::write(&document, PETSTORE).unwrap();
    let storage = dir.path().join("storage.json");
    Fixture {
        dir,
        document,
        storage,
    }
}

fn cli(fixture: &Fixture, args: &[&str]) -> Cli {
    let mut argv = vec![
        "meridian".to_string(),
        "--document".to_string(),
        path(&fixture.document),
        "--storage".to_string(),
        path(&fixture.storage),
    ];
    argv.extend(args.iter().map(ToString::to_string));
    Cli::try_parse_from(argv).unwrap()
}

fn path(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn route_prints_request_location() {
    let fixture = fixture();

    let output = run(&cli(&fixture, &["route", "/pets", "get", "--source", "gitbook"]))
        .await
        .unwrap();

    assert_eq!(
        output,
        "/workspace/default/document/Petstore/path/%2Fpets/method/get?_source=gitbook\n"
    );
}

#[tokio::test]
async fn hash_history_prefixes_location() {
    let fixture = fixture();

    let output = run(&cli(&fixture, &["--history", "hash", "route", "/pets", "POST"]))
        .await
        .unwrap();

    assert!(output.starts_with("#/workspace/default/"));
}

#[tokio::test]
async fn unknown_route_is_an_error() {
    let fixture = fixture();

    let error = run(&cli(&fixture, &["route", "/owners", "get"]))
        .await
        .unwrap_err();

    assert!(error.to_string().contains("/owners"));
}

#[tokio::test]
async fn lists_imported_requests() {
    let fixture = fixture();

    let output = run(&cli(&fixture, &["requests"])).await.unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("/pets listPets [Petstore]"));
    assert!(lines[1].starts_with("POST"));
}

#[tokio::test]
async fn selected_client_survives_restart() {
    let fixture = fixture();

    run(&cli(&fixture, &["select-client", "node/undici"]))
        .await
        .unwrap();
    let shown = run(&cli(&fixture, &["show"])).await.unwrap();

    let workspace: serde_json::Value = serde_json::from_str(&shown).unwrap();
    assert_eq!(workspace["x-scalar-default-client"], "node/undici");
    let stored = std::fs::read_to_string(&fixture.storage).unwrap();
    assert!(stored.contains("meridian-selected-client"));
    assert!(stored.contains("meridian-workspace"));
}

#[tokio::test]
async fn read_only_never_touches_storage() {
    let fixture = fixture();

    run(&cli(&fixture, &["--read-only", "requests"]))
        .await
        .unwrap();

    assert!(!fixture.storage.exists());
}

#[tokio::test]
async fn configuration_proxy_reaches_workspace() {
    let fixture = fixture();
    let config = fixture.dir.path().join("meridian.json");
    std::fs::write(&config, r#"{"darkMode": true, "proxyUrl": "https://proxy.example"}"#).unwrap();

    let config = path(&config);

    let shown = run(&cli(&fixture, &["--config", config.as_str(), "show"]))
        .await
        .unwrap();

    let workspace: serde_json::Value = serde_json::from_str(&shown).unwrap();
    // `darkMode` is only applied on later changes.
    assert_eq!(workspace["x-scalar-dark-mode"], false);
    assert_eq!(workspace["proxyUrl"], "https://proxy.example");
}

#[tokio::test]
async fn configured_authentication_reaches_document() {
    let fixture = fixture();
    let config = fixture.dir.path().join("meridian.json");
    std::fs::write(
        &config,
        r#"{"authentication": {
            "securitySchemes": {"apiKey": {"token": "T"}},
            "preferredSecurityScheme": "apiKey"
        }}"#,
    )
    .unwrap();

    let config = path(&config);

    let shown = run(&cli(&fixture, &["--config", config.as_str(), "show"]))
        .await
        .unwrap();

    let workspace: serde_json::Value = serde_json::from_str(&shown).unwrap();
    let document = &workspace["documents"]["Petstore"];
    assert_eq!(document["components"]["securitySchemes"]["apiKey"]["token"], "T");
    assert_eq!(document["x-scalar-active-auth"], "apiKey");
}

#[tokio::test]
async fn read_only_selection_is_not_stored() {
    let fixture = fixture();

    let output = run(&cli(&fixture, &["--read-only", "select-client", "shell/curl"]))
        .await
        .unwrap();

    assert_eq!(output, "selected shell/curl\n");
    assert!(!fixture.storage.exists());
}
