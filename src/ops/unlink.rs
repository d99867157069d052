//! `unlink(path)` (§4.6). The leaf must exist and be a file; deletes the
//! node and all incident edges (G4). Groups and the root reject with EPERM.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

pub async fn unlink(graph: &dyn GraphGateway, path: &str) -> Result<()> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::File(name) => graph.delete_file(&name).await,
        Leaf::Group(_) => Err(GraphFsError::Permission),
        Leaf::Root => Err(GraphFsError::Permission),
        Leaf::Absent(_) => Err(GraphFsError::NotFound),
    }
}
