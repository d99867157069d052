//! `mkdir(path, mode)` (§4.6). The prefix must already be existing groups;
//! the leaf must not exist as either a group or a file (invariant G1).

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

pub async fn mkdir(graph: &dyn GraphGateway, path: &str) -> Result<()> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, false).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::Absent(name) => graph.create_group(&name).await,
        Leaf::Root => Err(GraphFsError::Permission),
        Leaf::Group(_) | Leaf::File(_) => Err(GraphFsError::Exists),
    }
}
