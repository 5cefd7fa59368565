use crate::common::{embedded, snapshot, sorted_paths, write_file};
use statics::codec;
use statics::tree::FileMode;
use statics::{SnapshotError, TreeBuilder, WalkerConfig};
use tempfile::TempDir;

fn example_dir() -> TempDir {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a/x.txt", "hi\n");
    write_file(temp.path(), "a/b/y.log", "log\n");
    temp
}

#[test]
fn test_ignore_file_pattern_keeps_rest() {
    let temp = example_dir();
    let tree = snapshot(temp.path(), "a", Some(r"\.txt$"), None);
    assert_eq!(sorted_paths(&tree), vec!["/a", "/a/b", "/a/b/y.log"]);

    let files = embedded(&tree);
    let all = files.read_files("/a", true).unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all["/a/b/y.log"], b"log\n");
}

#[test]
fn test_ignore_directory_drops_subtree() {
    let temp = example_dir();
    let tree = snapshot(temp.path(), "a", Some("a/b$"), None);
    assert_eq!(sorted_paths(&tree), vec!["/a", "/a/x.txt"]);
}

#[test]
fn test_leaf_records_size_and_payload() {
    let temp = example_dir();
    let tree = snapshot(temp.path(), "a", None, None);
    let leaf = tree.find("/a/b/y.log").unwrap();
    assert_eq!(leaf.name, "y.log");
    assert_eq!(leaf.size, 4);
    assert!(!leaf.is_dir);
    assert_eq!(codec::decode(&leaf.compressed).unwrap(), b"log\n");
    assert!(leaf.compressed.lines().all(|l| l.len() <= 80));

    let dir = tree.find("/a/b").unwrap();
    assert!(dir.is_dir);
    assert_eq!(dir.size, 0);
    assert!(dir.compressed.is_empty());
    assert!(dir.mode.is_dir());
}

#[test]
fn test_prefix_is_stripped_from_every_path() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "static/css/site.css", "body{}");
    let tree = snapshot(temp.path(), "static", None, Some("static"));
    assert_eq!(sorted_paths(&tree), vec!["/", "/css", "/css/site.css"]);
}

#[test]
fn test_empty_directory_is_kept() {
    let temp = example_dir();
    std::fs::create_dir_all(temp.path().join("a/empty")).unwrap();
    let tree = snapshot(temp.path(), "a", None, None);
    let empty = tree.find("/a/empty").unwrap();
    assert!(empty.is_dir);
    assert!(empty.files.is_empty());
}

#[test]
fn test_file_root_is_rejected() {
    let temp = example_dir();
    let err = TreeBuilder::new("a/x.txt".into())
        .with_base(temp.path().to_path_buf())
        .build()
        .unwrap_err();
    assert!(matches!(err, SnapshotError::InvalidRoot(_)));
}

#[test]
fn test_invalid_pattern_is_rejected() {
    assert!(matches!(
        WalkerConfig::from_patterns(Some("a["), None),
        Err(SnapshotError::InvalidPattern(_))
    ));
}

#[cfg(unix)]
#[test]
fn test_nested_symlink_chain_uses_logical_paths() {
    use std::os::unix::fs::{symlink, PermissionsExt};

    let temp = TempDir::new().unwrap();
    let root = temp.path();
    write_file(root, "elsewhere/realdir/deep/leaf.txt", "data\n");
    write_file(root, "other/linked.txt", "data\n");
    std::fs::create_dir_all(root.join("site")).unwrap();
    // site/linkdir -> elsewhere, elsewhere/realdir/double -> elsewhere/realdir/deep
    symlink(root.join("elsewhere"), root.join("site/linkdir")).unwrap();
    symlink(
        root.join("elsewhere/realdir/deep"),
        root.join("elsewhere/realdir/double"),
    )
    .unwrap();
    symlink(root.join("other/linked.txt"), root.join("site/linked.txt")).unwrap();
    std::fs::set_permissions(
        root.join("other/linked.txt"),
        std::fs::Permissions::from_mode(0o640),
    )
    .unwrap();

    let tree = snapshot(root, "site", None, None);
    let paths = sorted_paths(&tree);
    assert!(paths.contains(&"/site/linkdir/realdir/double/leaf.txt".to_string()));
    assert!(paths.contains(&"/site/linkdir/realdir/deep/leaf.txt".to_string()));
    assert!(paths.iter().all(|p| !p.contains("elsewhere")));

    let linked = tree.find("/site/linked.txt").unwrap();
    assert!(!linked.is_dir);
    assert_eq!(linked.mode, FileMode(0o640));

    let files = embedded(&tree);
    assert_eq!(
        files.read_file("/site/linkdir/realdir/double/leaf.txt").unwrap(),
        b"data\n"
    );
    assert_eq!(files.read_file("/site/linked.txt").unwrap(), b"data\n");
}

#[cfg(unix)]
#[test]
fn test_symlink_cycle_fails() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "site/sub/file.txt", "x");
    std::os::unix::fs::symlink(temp.path().join("site"), temp.path().join("site/sub/up")).unwrap();

    let err = TreeBuilder::new("site".into())
        .with_base(temp.path().to_path_buf())
        .build()
        .unwrap_err();
    assert!(matches!(err, SnapshotError::SymlinkLoop { .. }));
}

#[test]
fn test_placeholder_serves_empty_root() {
    let placeholder = TreeBuilder::new("static".into()).placeholder().unwrap();
    let files = embedded(&placeholder);
    assert_eq!(files.len(), 1);
    assert!(files.read_dir("/static").unwrap().is_empty());
}
