//! `access(path, mode)` (§4.6). No mode-bit enforcement: this validates
//! existence only, matching the spec's "returns 0 or ENOENT".

use crate::error::Result;
use crate::graph::GraphGateway;
use crate::resolver::PathResolver;

pub async fn access(graph: &dyn GraphGateway, path: &str) -> Result<()> {
    PathResolver::new(graph).validate(path, true).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::in_memory::InMemoryGateway;

    #[tokio::test]
    async fn root_is_always_accessible() {
        let gw = InMemoryGateway::new();
        assert!(access(&gw, "/").await.is_ok());
    }

    #[tokio::test]
    async fn missing_path_is_not_found() {
        let gw = InMemoryGateway::new();
        assert!(access(&gw, "/missing").await.is_err());
    }
}
