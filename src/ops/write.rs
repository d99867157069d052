//! `write(path, buf, offset)` (§4.6). The written bytes replace the entire
//! stored value regardless of `offset` (§1 Non-goals); `buf` must decode as
//! UTF-8 (IQ3) or the call fails with `Invalid`.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

pub async fn write(graph: &dyn GraphGateway, path: &str, buf: &[u8]) -> Result<()> {
    if std::str::from_utf8(buf).is_err() {
        return Err(GraphFsError::Invalid);
    }

    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::File(name) => graph.write_file_value(&name, buf).await,
        Leaf::Group(_) | Leaf::Root => Err(GraphFsError::IsDir),
        Leaf::Absent(_) => Err(GraphFsError::NotFound),
    }
}
