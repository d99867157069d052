//! `truncate(path, length)` (§4.6). Always clears the stored value to
//! `None`, regardless of the requested `length`.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

pub async fn truncate(graph: &dyn GraphGateway, path: &str) -> Result<()> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::File(name) => graph.clear_file_value(&name).await,
        Leaf::Group(_) | Leaf::Root => Err(GraphFsError::IsDir),
        Leaf::Absent(_) => Err(GraphFsError::NotFound),
    }
}
