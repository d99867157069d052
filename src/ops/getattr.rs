//! `getattr(path)` (§4.6).

use crate::error::Result;
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

use super::{Attr, Kind};

/// Classifies `path` and reports the size-bearing part of its attributes.
/// Root and groups are directories of fixed size 1024; a file's size is the
/// byte length of its stored value (0 if it has none). Absent -> ENOENT.
pub async fn getattr(graph: &dyn GraphGateway, path: &str) -> Result<Attr> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    let leaf = resolver.classify_leaf(&segments).await?;

    match leaf {
        Leaf::Root | Leaf::Group(_) => Ok(Attr { kind: Kind::Directory, size: 1024 }),
        Leaf::File(name) => {
            let size = graph.read_file_value(&name).await?.map(|v| v.len()).unwrap_or(0);
            Ok(Attr { kind: Kind::File, size: size as u64 })
        }
        Leaf::Absent(_) => Err(crate::error::GraphFsError::NotFound),
    }
}
