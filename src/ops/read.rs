//! `open`/`read` (§4.6). `read` ignores offset and length and always
//! returns the whole stored value (Open Question O3); `open` is folded into
//! this module since it shares the same leaf-kind check and `fs_ops` calls
//! both against the same resolved leaf.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

/// Validates that `path` exists as a file; EISDIR for a group or root.
pub async fn open(graph: &dyn GraphGateway, path: &str) -> Result<()> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::File(_) => Ok(()),
        Leaf::Group(_) | Leaf::Root => Err(GraphFsError::IsDir),
        Leaf::Absent(_) => Err(GraphFsError::NotFound),
    }
}

/// Returns the whole stored value of the file at `path`.
pub async fn read(graph: &dyn GraphGateway, path: &str) -> Result<Vec<u8>> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::File(name) => Ok(graph.read_file_value(&name).await?.unwrap_or_default()),
        Leaf::Group(_) | Leaf::Root => Err(GraphFsError::IsDir),
        Leaf::Absent(_) => Err(GraphFsError::NotFound),
    }
}
