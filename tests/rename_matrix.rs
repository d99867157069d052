//! Integration coverage for the §4.5 rename/move decision matrix (§8
//! scenario 6), driven through `ops::rename` against `InMemoryGateway`.

use graphfs::error::GraphFsError;
use graphfs::graph::in_memory::InMemoryGateway;
use graphfs::ops::{create, mkdir, rename, write};

#[tokio::test]
async fn root_as_source_is_permission_denied() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    assert_eq!(
        rename::rename(&gw, "/", "/a").await.unwrap_err(),
        GraphFsError::Permission
    );
}

#[tokio::test]
async fn root_as_destination_is_a_no_op() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    rename::rename(&gw, "/a", "/").await.unwrap();
    assert!(gw.is_group("a").await.unwrap());
}

#[tokio::test]
async fn moving_a_group_onto_itself_is_permission_denied() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    mkdir::mkdir(&gw, "/b").await.unwrap();
    let err = rename::rename(&gw, "/a", "/b/a").await.unwrap_err();
    assert_eq!(err, GraphFsError::Permission);
}

#[tokio::test]
async fn renaming_a_group_to_an_absent_name_keeps_its_files() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();

    rename::rename(&gw, "/a", "/c").await.unwrap();

    assert!(!gw.is_group("a").await.unwrap());
    assert!(gw.is_group("c").await.unwrap());
    assert_eq!(
        gw.list_files_under_filter(&["c".to_string()]).await.unwrap(),
        vec!["x".to_string()]
    );
}

#[tokio::test]
async fn renaming_a_group_onto_an_existing_group_or_file_is_permission_denied() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    mkdir::mkdir(&gw, "/b").await.unwrap();
    create::create(&gw, "/x", &[]).await.unwrap();

    assert_eq!(
        rename::rename(&gw, "/a", "/b").await.unwrap_err(),
        GraphFsError::Permission
    );
    assert_eq!(
        rename::rename(&gw, "/a", "/x").await.unwrap_err(),
        GraphFsError::Permission
    );
}

#[tokio::test]
async fn renaming_a_file_onto_an_existing_file_copies_content_and_deletes_source() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();
    write::write(&gw, "/a/x", b"payload").await.unwrap();
    create::create(&gw, "/y", &[]).await.unwrap();

    rename::rename(&gw, "/a/x", "/y").await.unwrap();

    assert!(!gw.is_file("x").await.unwrap());
    assert_eq!(gw.read_file_value("y").await.unwrap(), Some(b"payload".to_vec()));
    assert_eq!(
        gw.list_files_under_filter(&["a".to_string()]).await.unwrap(),
        vec!["y".to_string()]
    );
}

#[tokio::test]
async fn renaming_a_file_onto_a_group_is_permission_denied() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    create::create(&gw, "/x", &[]).await.unwrap();

    assert_eq!(
        rename::rename(&gw, "/x", "/a").await.unwrap_err(),
        GraphFsError::Permission
    );
    // no mutation on the rejected attempt (Open Question O2).
    assert!(gw.is_file("x").await.unwrap());
}

#[tokio::test]
async fn renaming_a_file_to_an_absent_name_moves_groups() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    mkdir::mkdir(&gw, "/b").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();

    rename::rename(&gw, "/a/x", "/b/y").await.unwrap();

    assert!(!gw.is_file("x").await.unwrap());
    assert!(gw.is_file("y").await.unwrap());
    assert_eq!(
        gw.list_files_under_filter(&["b".to_string()]).await.unwrap(),
        vec!["y".to_string()]
    );
    assert!(gw.list_files_under_filter(&["a".to_string()]).await.unwrap().is_empty());
}

#[tokio::test]
async fn same_leaf_name_moves_a_file_between_groups_without_renaming_it() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    mkdir::mkdir(&gw, "/b").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();

    rename::rename(&gw, "/a/x", "/b/x").await.unwrap();

    assert!(gw.is_file("x").await.unwrap());
    assert_eq!(
        gw.list_files_under_filter(&["b".to_string()]).await.unwrap(),
        vec!["x".to_string()]
    );
    assert!(gw.list_files_under_filter(&["a".to_string()]).await.unwrap().is_empty());
}
