//! `create(path, mode)` (§4.6). A group or the root is EISDIR. A leaf name
//! that already denotes a file is idempotent *only* if that file is already
//! visible in this exact directory (connected to every group in `prefix`)
//! --- re-creating what's already there; a same-named file that lives
//! elsewhere is a name collision (§8 scenario 2, P1) and fails with
//! `Exists`, same as a fresh name would against an existing group.
//! Otherwise a new file is created and linked to every group in `prefix`.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

pub async fn create(graph: &dyn GraphGateway, path: &str, prefix: &[String]) -> Result<()> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, false).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::File(name) => {
            let visible_here = graph.list_files_under_filter(prefix).await?;
            if visible_here.contains(&name) {
                Ok(())
            } else {
                Err(GraphFsError::Exists)
            }
        }
        Leaf::Group(_) | Leaf::Root => Err(GraphFsError::IsDir),
        Leaf::Absent(name) => {
            graph.create_file(&name).await?;
            for group in prefix {
                graph.link_file_to_group(&name, group).await?;
            }
            Ok(())
        }
    }
}
