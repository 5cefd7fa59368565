use statics::tree::{FileMode, Node};
use statics::{Files, FsConfig, TreeBuilder, WalkerConfig};
use std::path::Path;

/// Create `rel` under `root` with `content`, making parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

/// Snapshot `rel` (relative to `base`) so stored paths start at `/rel`.
pub fn snapshot(base: &Path, rel: &str, ignore: Option<&str>, prefix: Option<&str>) -> Node {
    TreeBuilder::new(rel.into())
        .with_base(base.to_path_buf())
        .with_walker_config(WalkerConfig::from_patterns(ignore, prefix).unwrap())
        .build()
        .unwrap()
}

pub fn embedded(tree: &Node) -> Files {
    Files::new(&FsConfig::embedded(), tree).unwrap()
}

/// Every stored path, sorted.
pub fn sorted_paths(tree: &Node) -> Vec<String> {
    let mut paths: Vec<String> = tree.iter().map(|n| n.path.clone()).collect();
    paths.sort();
    paths
}

const DATA: &str = "\nH4sIAAAJbogA/0pJLEnkAgQAAP//gsXB5gUAAAA=\n";
const PALINDATA: &str = "\nH4sIAAAJbogA/ypIzMnMS0ksSeQCBAAA//9+mKzVCgAAAA==\n";

fn dir(path: &str, mod_time: i64, files: Vec<Node>) -> Node {
    let name = path.rsplit('/').next().unwrap().to_string();
    let mut node = Node::directory(path.to_string(), name, FileMode(0o755), mod_time);
    node.files = files;
    node
}

fn leaf(path: &str, size: u64, mod_time: i64, compressed: &str) -> Node {
    let name = path.rsplit('/').next().unwrap().to_string();
    Node::file(
        path.to_string(),
        name,
        size,
        FileMode(0o644),
        mod_time,
        compressed.to_string(),
    )
}

/// A snapshot produced by an earlier generator, payloads included verbatim.
pub fn fixture_tree() -> Node {
    let base = "/static/test-files/teststart";
    let nested = format!("{base}/symlinkeddir/realdir/doublesymlinkeddir");
    dir(
        base,
        1446650128,
        vec![
            dir(
                &format!("{base}/symlinkeddir"),
                1446648191,
                vec![
                    dir(
                        &format!("{base}/symlinkeddir/realdir"),
                        1446648584,
                        vec![
                            dir(
                                &nested,
                                1447163695,
                                vec![
                                    leaf(
                                        &format!("{nested}/doublesymlinkedfile.txt"),
                                        5,
                                        1446648265,
                                        DATA,
                                    ),
                                    dir(
                                        &format!("{nested}/triplesymlinkeddir"),
                                        1447163709,
                                        vec![leaf(
                                            &format!("{nested}/triplesymlinkeddir/triplefile.txt"),
                                            5,
                                            1447163511,
                                            DATA,
                                        )],
                                    ),
                                ],
                            ),
                            leaf(
                                &format!("{base}/symlinkeddir/realdir/realdirfile.txt"),
                                5,
                                1446648207,
                                DATA,
                            ),
                        ],
                    ),
                    leaf(
                        &format!("{base}/symlinkeddir/symlinkeddirfile.txt"),
                        5,
                        1446647769,
                        DATA,
                    ),
                ],
            ),
            leaf(&format!("{base}/plainfile.txt"), 10, 1446650128, PALINDATA),
            leaf(&format!("{base}/symlinkedfile.txt"), 5, 1446647746, DATA),
        ],
    )
}
