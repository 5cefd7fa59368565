use crate::common::{snapshot, write_file};
use statics::{ApiError, Files, FsConfig};
use tempfile::TempDir;

fn setup() -> (TempDir, String) {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "a/x.txt", "hi\n");
    write_file(temp.path(), "a/b/y.log", "log\n");
    let base = temp.path().to_string_lossy().into_owned();
    (temp, base)
}

#[test]
fn test_fallback_serves_file_missing_from_index() {
    let (temp, base) = setup();
    let tree = snapshot(temp.path(), "a", None, None);
    write_file(temp.path(), "a/late.txt", "late\n");

    let files = Files::new(&FsConfig::with_fallback(base), &tree).unwrap();
    assert!(files.open("/a/x.txt").unwrap().is_embedded());

    let handle = files.open("/a/late.txt").unwrap();
    assert!(!handle.is_embedded());
    assert_eq!(handle.stat().unwrap().name(), "late.txt");
    assert_eq!(files.read_file("/a/late.txt").unwrap(), b"late\n");
}

#[test]
fn test_without_fallback_missing_is_not_found() {
    let (temp, _base) = setup();
    let tree = snapshot(temp.path(), "a", None, None);
    write_file(temp.path(), "a/late.txt", "late\n");

    let files = Files::new(&FsConfig::embedded(), &tree).unwrap();
    assert!(matches!(
        files.read_file("/a/late.txt"),
        Err(ApiError::NotFound(_))
    ));
}

#[test]
fn test_fallback_passes_os_error_through() {
    let (temp, base) = setup();
    let tree = snapshot(temp.path(), "a", None, None);
    let files = Files::new(&FsConfig::with_fallback(base), &tree).unwrap();
    let err = files.read_file("/a/nope.txt").unwrap_err();
    assert!(matches!(err, ApiError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
    assert!(err.is_not_found());
}

#[test]
fn test_disk_mode_reads_current_disk_state() {
    let (temp, base) = setup();
    let tree = snapshot(temp.path(), "a", None, None);
    std::fs::write(temp.path().join("a/x.txt"), "changed\n").unwrap();

    let files = Files::new(&FsConfig::disk(base), &tree).unwrap();
    assert!(files.is_empty());
    assert_eq!(files.read_file("/a/x.txt").unwrap(), b"changed\n");

    let names: Vec<String> = files
        .read_dir("/a")
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect();
    assert_eq!(names, vec!["b", "x.txt"]);

    let all = files.read_files("/a", true).unwrap();
    let keys: Vec<&str> = all.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["/a/b/y.log", "/a/x.txt"]);
    assert_eq!(files.read_files("/a", false).unwrap().len(), 1);
}

#[test]
fn test_disk_mode_paginates_directories() {
    let (_temp, base) = setup();
    let tree = statics::TreeBuilder::new("unused".into()).placeholder().unwrap();
    let files = Files::new(&FsConfig::disk(base), &tree).unwrap();

    let mut handle = files.open("/a").unwrap();
    let info = handle.stat().unwrap();
    assert!(info.is_dir());
    assert_eq!(info.size(), 0);

    let mut seen = Vec::new();
    while let Some(page) = handle.readdir(1).unwrap() {
        assert_eq!(page.len(), 1);
        seen.extend(page.into_iter().map(|e| e.name().to_string()));
    }
    seen.sort();
    assert_eq!(seen, vec!["b", "x.txt"]);

    let mut leaf = files.open("/a/x.txt").unwrap();
    assert!(matches!(leaf.readdir(-1), Err(ApiError::NotADirectory(_))));
}

#[test]
fn test_disk_modes_require_absolute_base() {
    let tree = statics::TreeBuilder::new("static".into()).placeholder().unwrap();
    for config in [FsConfig::disk(""), FsConfig::with_fallback("rel/dir")] {
        assert!(matches!(
            Files::new(&config, &tree),
            Err(ApiError::ConfigError(_))
        ));
    }
}

#[cfg(unix)]
#[test]
fn test_disk_read_files_follows_symlinked_directory() {
    let temp = TempDir::new().unwrap();
    write_file(temp.path(), "real/f.txt", "linked\n");
    std::fs::create_dir_all(temp.path().join("a")).unwrap();
    std::os::unix::fs::symlink(temp.path().join("real"), temp.path().join("a/link")).unwrap();
    let base = temp.path().to_string_lossy().into_owned();

    let tree = statics::TreeBuilder::new("unused".into()).placeholder().unwrap();
    let files = Files::new(&FsConfig::disk(base), &tree).unwrap();

    let entries = files.read_dir("/a").unwrap();
    assert_eq!(entries.len(), 1);
    assert!(entries[0].is_dir());

    let all = files.read_files("/a", true).unwrap();
    let keys: Vec<&str> = all.keys().map(String::as_str).collect();
    assert_eq!(keys, vec!["/a/link/f.txt"]);
    assert_eq!(all["/a/link/f.txt"], b"linked\n");
    assert!(files.read_files("/a", false).unwrap().is_empty());
}
