//! Neo4j-backed implementation of [`super::GraphGateway`], speaking Cypher
//! over Bolt via `neo4rs`.
//!
//! Groups and files are both `(:Node {name})` vertices; a file is
//! distinguished by also carrying a `value` property (absent, or a byte
//! string) and by the direction of its `isInGroup` edges. This mirrors the
//! reference implementation's `py2neo` schema: `GraphObject` nodes connected
//! by a single `RelatedTo`/`RelatedFrom` edge type.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use neo4rs::{query, Graph};
use tracing::{trace, warn};

use crate::error::{GraphFsError, Result};

use super::{validate_identifier, GraphGateway};

/// Queries slower than this are logged at `warn!` (§10.2).
const SLOW_QUERY_THRESHOLD: Duration = Duration::from_millis(100);

/// A single authenticated Bolt connection to a Neo4j server.
pub struct Neo4jGateway {
    graph: Graph,
}

impl Neo4jGateway {
    /// Opens a connection. `uri` is a `bolt://host:port` address.
    pub async fn connect(uri: &str, user: &str, password: &str) -> Result<Self> {
        let graph = Graph::new(uri, user, password)
            .await
            .map_err(|e| GraphFsError::Io(e.to_string()))?;
        Ok(Self { graph })
    }

    /// Logs `cypher` at `trace!` (never the bound values) and the elapsed
    /// time of `f` at `warn!` if it crosses [`SLOW_QUERY_THRESHOLD`].
    async fn timed<T>(&self, cypher: &str, f: impl std::future::Future<Output = Result<T>>) -> Result<T> {
        trace!(cypher, "graph query");
        let start = Instant::now();
        let result = f.await;
        let elapsed = start.elapsed();
        if elapsed > SLOW_QUERY_THRESHOLD {
            warn!(cypher, ?elapsed, "slow graph query");
        }
        result
    }

    async fn run(&self, cypher: &str, q: neo4rs::Query) -> Result<()> {
        self.timed(cypher, async { self.graph.run(q).await.map_err(|e| GraphFsError::Io(e.to_string())) })
            .await
    }

    async fn exists(&self, cypher: &str, q: neo4rs::Query) -> Result<bool> {
        self.timed(cypher, async {
            let mut rows = self.graph.execute(q).await.map_err(|e| GraphFsError::Io(e.to_string()))?;
            Ok(rows.next().await.map_err(|e| GraphFsError::Io(e.to_string()))?.is_some())
        })
        .await
    }

    async fn collect_names(&self, cypher: &str, q: neo4rs::Query) -> Result<Vec<String>> {
        self.timed(cypher, async {
            let mut rows = self.graph.execute(q).await.map_err(|e| GraphFsError::Io(e.to_string()))?;
            let mut names = Vec::new();
            while let Some(row) = rows.next().await.map_err(|e| GraphFsError::Io(e.to_string()))? {
                let name: String = row.get("name").map_err(|e| GraphFsError::Io(e.to_string()))?;
                names.push(name);
            }
            Ok(names)
        })
        .await
    }
}

#[async_trait]
impl GraphGateway for Neo4jGateway {
    async fn is_group(&self, name: &str) -> Result<bool> {
        validate_identifier(name)?;
        let cypher = "MATCH (g:Group {name: $name}) RETURN g LIMIT 1";
        self.exists(cypher, query(cypher).param("name", name)).await
    }

    async fn is_file(&self, name: &str) -> Result<bool> {
        validate_identifier(name)?;
        let cypher = "MATCH (f:File {name: $name}) RETURN f LIMIT 1";
        self.exists(cypher, query(cypher).param("name", name)).await
    }

    async fn create_group(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let cypher = "CREATE (:Group {name: $name})";
        self.run(cypher, query(cypher).param("name", name)).await
    }

    async fn create_file(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let cypher = "CREATE (:File {name: $name})";
        self.run(cypher, query(cypher).param("name", name)).await
    }

    async fn link_file_to_group(&self, file: &str, group: &str) -> Result<()> {
        validate_identifier(file)?;
        validate_identifier(group)?;
        let cypher = "MATCH (f:File {name: $file}), (g:Group {name: $group}) \
                      CREATE (f)-[:isInGroup]->(g)";
        self.run(cypher, query(cypher).param("file", file).param("group", group)).await
    }

    async fn unlink_file_from_group(&self, file: &str, group: &str) -> Result<()> {
        validate_identifier(file)?;
        validate_identifier(group)?;
        let cypher = "MATCH (f:File {name: $file})-[r:isInGroup]->(g:Group {name: $group}) \
                      DELETE r";
        self.run(cypher, query(cypher).param("file", file).param("group", group)).await
    }

    async fn delete_group(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let cypher = "MATCH (g:Group {name: $name}) DETACH DELETE g";
        self.run(cypher, query(cypher).param("name", name)).await
    }

    async fn delete_file(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let cypher = "MATCH (f:File {name: $name}) DETACH DELETE f";
        self.run(cypher, query(cypher).param("name", name)).await
    }

    async fn rename_group(&self, old: &str, new: &str) -> Result<()> {
        validate_identifier(old)?;
        validate_identifier(new)?;
        let cypher = "MATCH (g:Group {name: $old}) SET g.name = $new";
        self.run(cypher, query(cypher).param("old", old).param("new", new)).await
    }

    async fn rename_file(&self, old: &str, new: &str) -> Result<()> {
        validate_identifier(old)?;
        validate_identifier(new)?;
        let cypher = "MATCH (f:File {name: $old}) SET f.name = $new";
        self.run(cypher, query(cypher).param("old", old).param("new", new)).await
    }

    async fn read_file_value(&self, name: &str) -> Result<Option<Vec<u8>>> {
        validate_identifier(name)?;
        let cypher = "MATCH (f:File {name: $name}) RETURN f.value AS value";
        let q = query(cypher).param("name", name);
        self.timed(cypher, async {
            let mut rows = self.graph.execute(q).await.map_err(|e| GraphFsError::Io(e.to_string()))?;
            match rows.next().await.map_err(|e| GraphFsError::Io(e.to_string()))? {
                Some(row) => Ok(row.get::<Vec<u8>>("value").ok()),
                None => Err(GraphFsError::NotFound),
            }
        })
        .await
    }

    async fn write_file_value(&self, name: &str, value: &[u8]) -> Result<()> {
        validate_identifier(name)?;
        let cypher = "MATCH (f:File {name: $name}) SET f.value = $value";
        self.run(cypher, query(cypher).param("name", name).param("value", value.to_vec())).await
    }

    async fn clear_file_value(&self, name: &str) -> Result<()> {
        validate_identifier(name)?;
        let cypher = "MATCH (f:File {name: $name}) REMOVE f.value";
        self.run(cypher, query(cypher).param("name", name)).await
    }

    async fn list_groups_under_filter(&self, groups: &[String]) -> Result<Vec<String>> {
        for g in groups {
            validate_identifier(g)?;
        }

        if groups.is_empty() {
            let cypher = "MATCH (g:Group) RETURN g.name AS name";
            return self.collect_names(cypher, query(cypher)).await;
        }

        // A candidate group `cand` narrows `groups` when some file is linked
        // to every group in the filter AND to `cand`: `size(groups)` is the
        // filter's arity, `count(DISTINCT g)` the number of distinct filter
        // groups that file actually touches.
        let cypher = "MATCH (f:File)-[:isInGroup]->(g:Group) \
                      WHERE g.name IN $groups \
                      WITH f, count(DISTINCT g) AS hits, size($groups) AS needed \
                      WHERE hits = needed \
                      MATCH (f)-[:isInGroup]->(cand:Group) \
                      WHERE NOT cand.name IN $groups \
                      RETURN DISTINCT cand.name AS name";
        self.collect_names(cypher, query(cypher).param("groups", groups.to_vec())).await
    }

    async fn list_files_under_filter(&self, groups: &[String]) -> Result<Vec<String>> {
        for g in groups {
            validate_identifier(g)?;
        }

        if groups.is_empty() {
            let cypher = "MATCH (f:File) RETURN f.name AS name";
            return self.collect_names(cypher, query(cypher)).await;
        }

        let cypher = "MATCH (f:File)-[:isInGroup]->(g:Group) \
                      WHERE g.name IN $groups \
                      WITH f, count(DISTINCT g) AS hits, size($groups) AS needed \
                      WHERE hits = needed \
                      RETURN f.name AS name";
        self.collect_names(cypher, query(cypher).param("groups", groups.to_vec())).await
    }

    async fn group_has_files(&self, name: &str) -> Result<bool> {
        validate_identifier(name)?;
        let cypher = "MATCH (:File)-[:isInGroup]->(:Group {name: $name}) RETURN 1 LIMIT 1";
        self.exists(cypher, query(cypher).param("name", name)).await
    }
}
