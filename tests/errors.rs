//! Integration coverage for the §7 error taxonomy: each `GraphFsError`
//! variant, the `ops::*` call that should produce it, and its errno.

use graphfs::error::GraphFsError;
use graphfs::graph::in_memory::InMemoryGateway;
use graphfs::ops::{create, getattr, mkdir, read, rename, rmdir, unlink, write};

#[tokio::test]
async fn not_found_maps_to_enoent() {
    let gw = InMemoryGateway::new();
    let err = getattr::getattr(&gw, "/missing").await.unwrap_err();
    assert_eq!(err, GraphFsError::NotFound);
    assert_eq!(err.to_errno(), libc::ENOENT);
}

#[tokio::test]
async fn exists_maps_to_eexist() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    let err = mkdir::mkdir(&gw, "/a").await.unwrap_err();
    assert_eq!(err, GraphFsError::Exists);
    assert_eq!(err.to_errno(), libc::EEXIST);
}

#[tokio::test]
async fn not_empty_maps_to_enotempty() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    create::create(&gw, "/a/x", &["a".to_string()]).await.unwrap();
    let err = rmdir::rmdir(&gw, "/a").await.unwrap_err();
    assert_eq!(err, GraphFsError::NotEmpty);
    assert_eq!(err.to_errno(), libc::ENOTEMPTY);
}

#[tokio::test]
async fn is_dir_maps_to_eisdir() {
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    let err = write::write(&gw, "/a", b"x").await.unwrap_err();
    assert_eq!(err, GraphFsError::IsDir);
    assert_eq!(err.to_errno(), libc::EISDIR);
}

#[tokio::test]
async fn permission_maps_to_eperm() {
    let gw = InMemoryGateway::new();
    let err = mkdir::mkdir(&gw, "/").await.unwrap_err();
    assert_eq!(err, GraphFsError::Permission);
    assert_eq!(err.to_errno(), libc::EPERM);

    let err = unlink::unlink(&gw, "/").await.unwrap_err();
    assert_eq!(err, GraphFsError::Permission);

    mkdir::mkdir(&gw, "/a").await.unwrap();
    mkdir::mkdir(&gw, "/b").await.unwrap();
    let err = rename::rename(&gw, "/a", "/b").await.unwrap_err();
    assert_eq!(err, GraphFsError::Permission);
}

#[tokio::test]
async fn invalid_maps_to_einval() {
    let gw = InMemoryGateway::new();
    create::create(&gw, "/x", &[]).await.unwrap();
    let err = write::write(&gw, "/x", &[0xff, 0xfe, 0xfd]).await.unwrap_err();
    assert_eq!(err, GraphFsError::Invalid);
    assert_eq!(err.to_errno(), libc::EINVAL);
}

#[tokio::test]
async fn rmdir_on_the_root_is_permission_denied() {
    let gw = InMemoryGateway::new();
    let err = rmdir::rmdir(&gw, "/").await.unwrap_err();
    assert_eq!(err, GraphFsError::Permission);
}

#[tokio::test]
async fn unlinking_a_group_is_permission_denied_not_is_dir() {
    // §4.6: unlink on a group leaf is EPERM (the kernel routes directory
    // removal through rmdir, never unlink).
    let gw = InMemoryGateway::new();
    mkdir::mkdir(&gw, "/a").await.unwrap();
    let err = unlink::unlink(&gw, "/a").await.unwrap_err();
    assert_eq!(err, GraphFsError::Permission);
}

#[tokio::test]
async fn read_after_unlink_is_not_found() {
    let gw = InMemoryGateway::new();
    create::create(&gw, "/x", &[]).await.unwrap();
    unlink::unlink(&gw, "/x").await.unwrap();
    let err = read::read(&gw, "/x").await.unwrap_err();
    assert_eq!(err, GraphFsError::NotFound);
}
