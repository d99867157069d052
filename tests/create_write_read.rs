//! Integration coverage for `create`/`write`/`read`/`truncate` (§4.6
//! scenarios 2-4).

use graphfs::error::GraphFsError;
use graphfs::graph::in_memory::InMemoryGateway;
use graphfs::ops::{create, getattr, mkdir, read, truncate, write};
use graphfs::ops::attr::Kind;

#[tokio::test]
async fn write_then_read_round_trips_the_value() {
    let gw = InMemoryGateway::new();
    create::create(&gw, "/x", &[]).await.unwrap();

    write::write(&gw, "/x", b"hello").await.unwrap();
    assert_eq!(read::read(&gw, "/x").await.unwrap(), b"hello");

    let attr = getattr::getattr(&gw, "/x").await.unwrap();
    assert_eq!(attr.kind, Kind::File);
    assert_eq!(attr.size, 5);
}

#[tokio::test]
async fn truncate_clears_the_value_regardless_of_length() {
    let gw = InMemoryGateway::new();
    create::create(&gw, "/x", &[]).await.unwrap();
    write::write(&gw, "/x", b"hello").await.unwrap();

    truncate::truncate(&gw, "/x").await.unwrap();

    let attr = getattr::getattr(&gw, "/x").await.unwrap();
    assert_eq!(attr.size, 0);
}

#[tokio::test]
async fn create_with_missing_prefix_is_not_found() {
    let gw = InMemoryGateway::new();
    assert_eq!(create::create(&gw, "/a/x", &["a".to_string()]).await, Err(GraphFsError::NotFound));
}

#[tokio::test]
async fn create_collides_with_an_existing_file_name_in_another_group() {
    // §8 scenario 2: create("/a/x") then create("/b/x") fails with EEXIST --
    // "x" already exists but isn't linked to "b", so this isn't a
    // re-creation of what's already visible there, it's a name collision.
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    mkdir::mkdir(&gw, "/b").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();

    assert_eq!(
        create::create(&gw, "/b/x", &["b".to_string()]).await,
        Err(GraphFsError::Exists)
    );
}

#[tokio::test]
async fn recreating_a_file_already_visible_in_this_group_is_idempotent() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();

    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();
    assert!(gw.is_file("x").await.unwrap());
}
