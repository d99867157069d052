//! `rename(old, new)` (§4.6): resolves both leaves and delegates the actual
//! graph edits to [`crate::rename_engine`].

use crate::error::Result;
use crate::graph::GraphGateway;
use crate::rename_engine;
use crate::resolver::{Leaf, PathResolver};

/// Runs the full rename: resolves `old` (leaf must exist) and `new` (leaf
/// may or may not exist), then applies the §4.5 matrix. Returns the
/// classified leaves so the caller (`fs_ops`) can decide how to update its
/// inode table without re-resolving.
pub async fn rename(graph: &dyn GraphGateway, old: &str, new: &str) -> Result<(Leaf, Leaf)> {
    let resolver = PathResolver::new(graph);
    let old_segments = resolver.validate(old, true).await?;
    let new_segments = resolver.validate(new, false).await?;
    let old_leaf = resolver.classify_leaf(&old_segments).await?;
    let new_leaf = resolver.classify_leaf(&new_segments).await?;

    rename_engine::rename(graph, &old_segments, &new_segments, &old_leaf, &new_leaf).await?;

    Ok((old_leaf, new_leaf))
}
