//! `rmdir(path)` (§4.6). The leaf must be an existing group with no
//! attached files.

use crate::error::{GraphFsError, Result};
use crate::graph::GraphGateway;
use crate::resolver::{Leaf, PathResolver};

pub async fn rmdir(graph: &dyn GraphGateway, path: &str) -> Result<()> {
    let resolver = PathResolver::new(graph);
    let segments = resolver.validate(path, true).await?;
    match resolver.classify_leaf(&segments).await? {
        Leaf::Group(name) => {
            if graph.group_has_files(&name).await? {
                return Err(GraphFsError::NotEmpty);
            }
            graph.delete_group(&name).await
        }
        Leaf::Root => Err(GraphFsError::Permission),
        Leaf::File(_) => Err(GraphFsError::Permission),
        Leaf::Absent(_) => Err(GraphFsError::NotFound),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::in_memory::InMemoryGateway;

    #[tokio::test]
    async fn removes_an_empty_group() {
        let gw = InMemoryGateway::new();
        gw.create_group("a").await.unwrap();
        rmdir(&gw, "/a").await.unwrap();
        assert!(!gw.is_group("a").await.unwrap());
    }

    #[tokio::test]
    async fn non_empty_group_is_not_empty_error() {
        let gw = InMemoryGateway::new();
        gw.create_group("a").await.unwrap();
        gw.create_file("x").await.unwrap();
        gw.link_file_to_group("x", "a").await.unwrap();
        assert_eq!(rmdir(&gw, "/a").await, Err(GraphFsError::NotEmpty));
    }

    #[tokio::test]
    async fn file_leaf_is_permission_denied() {
        let gw = InMemoryGateway::new();
        gw.create_file("x").await.unwrap();
        assert_eq!(rmdir(&gw, "/x").await, Err(GraphFsError::Permission));
    }

    #[tokio::test]
    async fn root_is_permission_denied() {
        let gw = InMemoryGateway::new();
        assert_eq!(rmdir(&gw, "/").await, Err(GraphFsError::Permission));
    }
}
