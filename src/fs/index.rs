//! Path index
//!
//! Rehydrates a snapshot tree into runtime nodes with decoded payloads and a
//! flat lookup from logical path to node. Built once, read-only afterwards.

use crate::codec;
use crate::error::ApiError;
use crate::fs::file::FileInfo;
use crate::tree::Node;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A node with its payload decoded.
#[derive(Debug)]
pub struct RuntimeNode {
    pub(crate) path: String,
    pub(crate) info: FileInfo,
    pub(crate) data: Arc<[u8]>,
    pub(crate) children: Vec<Arc<RuntimeNode>>,
}

impl RuntimeNode {
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn info(&self) -> &FileInfo {
        &self.info
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn children(&self) -> &[Arc<RuntimeNode>] {
        &self.children
    }
}

/// Logical path → runtime node.
#[derive(Debug, Default)]
pub struct PathIndex {
    nodes: HashMap<String, Arc<RuntimeNode>>,
    root: Option<Arc<RuntimeNode>>,
}

impl PathIndex {
    /// Rehydrate `tree`, decoding every leaf.
    ///
    /// Fails on the first corrupt payload or on a path that appears twice.
    pub fn build(tree: &Node) -> Result<Self, ApiError> {
        let mut nodes = HashMap::with_capacity(tree.count());
        let root = rehydrate(tree, &mut nodes)?;
        debug!(nodes = nodes.len(), root = %root.path, "Rehydrated snapshot");
        Ok(Self {
            nodes,
            root: Some(root),
        })
    }

    pub fn get(&self, path: &str) -> Option<&Arc<RuntimeNode>> {
        self.nodes.get(path)
    }

    pub fn root(&self) -> Option<&Arc<RuntimeNode>> {
        self.root.as_ref()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(String::as_str)
    }
}

fn rehydrate(
    node: &Node,
    nodes: &mut HashMap<String, Arc<RuntimeNode>>,
) -> Result<Arc<RuntimeNode>, ApiError> {
    let (data, children): (Arc<[u8]>, _) = if node.is_dir {
        let children = node
            .files
            .iter()
            .map(|child| rehydrate(child, nodes))
            .collect::<Result<Vec<_>, _>>()?;
        (Arc::from(Vec::new()), children)
    } else {
        let bytes = codec::decode(&node.compressed).map_err(|source| ApiError::Decode {
            path: node.path.clone(),
            source,
        })?;
        (Arc::from(bytes), Vec::new())
    };

    let runtime = Arc::new(RuntimeNode {
        path: node.path.clone(),
        info: FileInfo::new(
            node.name.clone(),
            node.size,
            node.mode,
            node.mod_time,
            node.is_dir,
        ),
        data,
        children,
    });

    match nodes.entry(node.path.clone()) {
        Entry::Occupied(_) => Err(ApiError::DuplicatePath(node.path.clone())),
        Entry::Vacant(slot) => {
            slot.insert(Arc::clone(&runtime));
            Ok(runtime)
        }
    }
}
