use crate::common::write_file;
use statics::tooling::cli::{CliContext, Commands};
use statics::Node;
use std::path::PathBuf;
use tempfile::TempDir;

fn workspace() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "static/index.html", "<h1>hi</h1>\n");
    write_file(temp.path(), "static/js/app.js", "'use strict';\n");
    write_file(temp.path(), "static/js/app.js.map", "{}");
    temp
}

fn snapshot_command(output: Option<&str>) -> Commands {
    Commands::Snapshot {
        input: None,
        output: output.map(PathBuf::from),
        ignore: Some(r"\.map$".to_string()),
        prefix: None,
        init: false,
    }
}

#[test]
fn test_snapshot_to_stdout_returns_document() {
    let temp = workspace();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let json = ctx.execute(&snapshot_command(None)).unwrap();

    let tree = Node::from_json(&json).unwrap();
    assert_eq!(tree.path, "/static");
    assert!(tree.find("/static/js/app.js").is_some());
    assert!(tree.find("/static/js/app.js.map").is_none());
}

#[test]
fn test_snapshot_inspect_cat_round_trip() {
    let temp = workspace();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();

    let message = ctx.execute(&snapshot_command(Some("gen/static.json"))).unwrap();
    assert!(message.contains("gen/static.json"));
    assert!(temp.path().join("gen/static.json").is_file());

    let listing = ctx
        .execute(&Commands::Inspect {
            file: PathBuf::from("gen/static.json"),
            format: "text".to_string(),
        })
        .unwrap();
    assert!(listing.contains("/static/index.html"));
    assert!(listing.contains("4 nodes, 2 files"));

    let rows = ctx
        .execute(&Commands::Inspect {
            file: PathBuf::from("gen/static.json"),
            format: "json".to_string(),
        })
        .unwrap();
    let rows: serde_json::Value = serde_json::from_str(&rows).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 4);

    let body = ctx
        .execute(&Commands::Cat {
            file: PathBuf::from("gen/static.json"),
            path: "/static/js/app.js".to_string(),
        })
        .unwrap();
    assert_eq!(body, "'use strict';\n");
}

#[test]
fn test_cat_missing_path_fails() {
    let temp = workspace();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    ctx.execute(&snapshot_command(Some("static.json"))).unwrap();
    let err = ctx
        .execute(&Commands::Cat {
            file: PathBuf::from("static.json"),
            path: "/static/missing.css".to_string(),
        })
        .unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_workspace_config_supplies_snapshot_defaults() {
    let temp = workspace();
    std::fs::write(
        temp.path().join("statics.toml"),
        "[snapshot]\ninput = \"static/js\"\nprefix = \"static\"\n",
    )
    .unwrap();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let json = ctx
        .execute(&Commands::Snapshot {
            input: None,
            output: None,
            ignore: None,
            prefix: None,
            init: false,
        })
        .unwrap();
    let tree = Node::from_json(&json).unwrap();
    assert_eq!(tree.path, "/js");
    assert!(tree.find("/js/app.js.map").is_some());
}

#[test]
fn test_init_writes_placeholder_without_walking() {
    let temp = TempDir::new().unwrap();
    let ctx = CliContext::new(temp.path().to_path_buf(), None).unwrap();
    let json = ctx
        .execute(&Commands::Snapshot {
            input: Some(PathBuf::from("not-yet")),
            output: None,
            ignore: None,
            prefix: None,
            init: true,
        })
        .unwrap();
    let tree = Node::from_json(&json).unwrap();
    assert_eq!(tree.path, "/not-yet");
    assert!(tree.files.is_empty());
}
