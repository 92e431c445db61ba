//! Integration tests for the filedocs-web crate.
//!
//! These tests verify the web server configuration and construction.
//! Request/response behaviour is covered by `e2e_api.rs`.

use std::path::PathBuf;

use filedocs_store::DocStore;
use filedocs_web::{WebConfig, WebServer};

#[test]
fn web_config_defaults() {
    let config = WebConfig::default();
    assert_eq!(config.bind_addr, "127.0.0.1");
    assert_eq!(config.port, 5000);
    assert_eq!(config.root, PathBuf::from("files"));
}

#[test]
fn web_config_custom() {
    let config = WebConfig {
        bind_addr: "0.0.0.0".into(),
        port: 8080,
        root: PathBuf::from("/srv/docs"),
    };
    assert_eq!(config.bind_addr, "0.0.0.0");
    assert_eq!(config.port, 8080);
}

#[tokio::test]
async fn server_addr_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = WebConfig {
        bind_addr: "0.0.0.0".into(),
        port: 9000,
        root: dir.path().to_path_buf(),
    };
    let store = DocStore::open(&config.root).await.unwrap();

    let server = WebServer::new(config, store);
    assert_eq!(server.addr(), "0.0.0.0:9000");
}

#[tokio::test]
async fn open_creates_missing_root() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("files");
    let config = WebConfig {
        root: root.clone(),
        ..WebConfig::default()
    };

    WebServer::open(config).await.unwrap();
    assert!(root.is_dir());
}
