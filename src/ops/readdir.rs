//! `readdir(path)` (§4.6): validates `path`, then delegates to
//! [`crate::directory_view`] for the §4.4 union. `.` and `..` are added by
//! [`crate::fs_ops`], which is the layer that knows their inode numbers.

use crate::directory_view::{self, Entry};
use crate::error::Result;
use crate::resolver::PathResolver;

pub async fn readdir(
    graph: &dyn crate::graph::GraphGateway,
    path: &str,
    groups: &[String],
) -> Result<Vec<Entry>> {
    PathResolver::new(graph).validate(path, true).await?;
    directory_view::list(graph, groups).await
}
