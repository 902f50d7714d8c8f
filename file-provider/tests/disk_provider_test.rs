/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::collections::BTreeSet;

use file_provider::error::ErrorKind;
use file_provider::io::InputStream;
use file_provider::provider::disk::{DiskDirectoryProvider, DiskFileProvider};
use file_provider::{DirectoryProvider, FileProvider};
use tempfile::tempdir;

#[tokio::test]
async fn test_create_and_open_roundtrip() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    let detail = provider.create_file("docs/readme.md").await.unwrap();
    assert_eq!("readme.md", detail.name());
    assert_eq!("docs", detail.directory_path());
    assert_eq!("docs/readme.md", detail.path());
    assert_eq!(Some(0), detail.size());

    let body = provider.open_file("docs/readme.md").await.unwrap();
    let data = body.collect().await.unwrap();
    assert!(data.to_vec().is_empty());
}

#[tokio::test]
async fn test_write_stream_from_buffer() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    provider
        .write_stream("notes.txt", InputStream::from_static(b"every adolescent dog goes bonkers early"))
        .await
        .unwrap();

    let body = provider.open_file("notes.txt").await.unwrap();
    let data = body.collect().await.unwrap();
    assert_eq!(
        b"every adolescent dog goes bonkers early".as_slice(),
        data.to_vec().as_slice()
    );

    let detail = provider.get_file("notes.txt").await.unwrap();
    assert_eq!(Some(39), detail.size());
    assert!(detail.last_modified().is_some());
}

#[tokio::test]
async fn test_write_stream_from_path_with_offset_and_length() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    let source = root.path().join("source.bin");
    std::fs::write(&source, b"hello stream world").unwrap();

    let stream = InputStream::read_from()
        .path(&source)
        .offset(6)
        .length(6)
        .build()
        .unwrap();
    provider.write_stream("chunk.bin", stream).await.unwrap();

    let body = provider.open_file("chunk.bin").await.unwrap();
    let data = body.collect().await.unwrap();
    assert_eq!(b"stream".as_slice(), data.to_vec().as_slice());
}

#[tokio::test]
async fn test_truncate_sets_length_to_zero() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    provider
        .write_stream("log.txt", InputStream::from_static(b"old contents"))
        .await
        .unwrap();
    provider.truncate_file("log.txt").await.unwrap();

    let detail = provider.get_file("log.txt").await.unwrap();
    assert_eq!(Some(0), detail.size());
}

#[tokio::test]
async fn test_truncate_missing_file_is_not_found() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    let err = provider.truncate_file("absent.txt").await.unwrap_err();
    assert_eq!(&ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn test_delete_file_reports_prior_existence() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    provider.create_file("tmp.dat").await.unwrap();
    assert!(provider.delete_file("tmp.dat").await.unwrap());
    assert!(!provider.delete_file("tmp.dat").await.unwrap());
}

#[tokio::test]
async fn test_open_missing_file_is_not_found() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    let err = provider.open_file("absent.txt").await.unwrap_err();
    assert_eq!(&ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn test_get_file_for_missing_path_has_no_metadata() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    let detail = provider.get_file("future/file.txt").await.unwrap();
    assert_eq!("file.txt", detail.name());
    assert_eq!("future", detail.directory_path());
    assert_eq!(None, detail.size());
    assert!(detail.last_modified().is_none());
}

#[tokio::test]
async fn test_list_files_recurses() {
    let root = tempdir().unwrap();
    let files = DiskFileProvider::new(root.path());
    let dirs = DiskDirectoryProvider::new(root.path());

    files.create_file("a.txt").await.unwrap();
    files.create_file("sub/b.txt").await.unwrap();
    files.create_file("sub/deep/c.txt").await.unwrap();

    let all = dirs.list_files("").await.unwrap();
    let paths: BTreeSet<String> = all.iter().map(|f| f.path()).collect();
    let expected: BTreeSet<String> = ["a.txt", "sub/b.txt", "sub/deep/c.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(expected, paths);

    let under_sub = dirs.list_files("sub").await.unwrap();
    let paths: BTreeSet<String> = under_sub.iter().map(|f| f.path()).collect();
    let expected: BTreeSet<String> = ["sub/b.txt", "sub/deep/c.txt"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(expected, paths);
}

#[tokio::test]
async fn test_list_files_missing_directory_is_not_found() {
    let root = tempdir().unwrap();
    let dirs = DiskDirectoryProvider::new(root.path());

    let err = dirs.list_files("no/such/dir").await.unwrap_err();
    assert_eq!(&ErrorKind::NotFound, err.kind());
}

#[tokio::test]
async fn test_directory_lifecycle() {
    let root = tempdir().unwrap();
    let dirs = DiskDirectoryProvider::new(root.path());

    assert!(!dirs.directory_exists("cache/images").await.unwrap());
    let detail = dirs.create_directory("cache/images").await.unwrap();
    assert_eq!("cache/images", detail.path());
    assert!(dirs.directory_exists("cache/images").await.unwrap());

    assert!(dirs.delete_directory("cache/images", false).await.unwrap());
    assert!(!dirs.delete_directory("cache/images", false).await.unwrap());
}

#[tokio::test]
async fn test_delete_directory_recursive() {
    let root = tempdir().unwrap();
    let files = DiskFileProvider::new(root.path());
    let dirs = DiskDirectoryProvider::new(root.path());

    files.create_file("stage/a/one.txt").await.unwrap();
    files.create_file("stage/b/two.txt").await.unwrap();

    // non-recursive delete of a non-empty directory surfaces the I/O error
    let err = dirs.delete_directory("stage", false).await.unwrap_err();
    assert_eq!(&ErrorKind::IOError, err.kind());

    assert!(dirs.delete_directory("stage", true).await.unwrap());
    assert!(!dirs.directory_exists("stage").await.unwrap());
}

#[tokio::test]
async fn test_paths_are_normalized_before_use() {
    let root = tempdir().unwrap();
    let provider = DiskFileProvider::new(root.path());

    provider.create_file("/docs//./guide.md").await.unwrap();
    assert!(provider.file_exists("docs/guide.md").await.unwrap());

    let err = provider.file_exists("../escape.txt").await.unwrap_err();
    assert_eq!(&ErrorKind::InputInvalid, err.kind());
}
