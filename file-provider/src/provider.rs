/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

use async_trait::async_trait;

use crate::error::Error;
use crate::io::{Body, InputStream};
use crate::types::{DirectoryDetail, FileDetail};

/// Local filesystem backend
pub mod disk;

/// Amazon S3 backend
pub mod s3;

/// Storage backend for file content addressed by a logical path.
///
/// Paths are `/`-separated and resolved relative to a provider-specific root
/// (a directory on disk, a bucket in object storage). Implementations are
/// adapters: each operation marshals its parameters into the corresponding
/// backend call and surfaces whatever error the backend raises.
///
/// Not every backend supports every operation; unsupported operations fail
/// immediately with [`ErrorKind::Unsupported`](crate::error::ErrorKind::Unsupported)
/// before any backend activity.
#[async_trait]
pub trait FileProvider: fmt::Debug + Send + Sync {
    /// Resolve a logical path into a [`FileDetail`] record.
    ///
    /// Metadata fields are populated when the file exists; resolving a path
    /// that does not (yet) name a file is not an error.
    async fn get_file(&self, path: &str) -> Result<FileDetail, Error>;

    /// Create an empty file at `path`, replacing any existing content.
    async fn create_file(&self, path: &str) -> Result<FileDetail, Error>;

    /// Delete the file at `path`.
    ///
    /// Returns `false` when the backend can tell the file did not exist.
    async fn delete_file(&self, path: &str) -> Result<bool, Error>;

    /// Whether a file exists at `path`.
    async fn file_exists(&self, path: &str) -> Result<bool, Error>;

    /// Open the file at `path` for reading.
    ///
    /// Returns a [`Body`] streaming the file's contents. A missing file is a
    /// [`NotFound`](crate::error::ErrorKind::NotFound) error.
    async fn open_file(&self, path: &str) -> Result<Body, Error>;

    /// Set the length of the file at `path` to zero.
    async fn truncate_file(&self, path: &str) -> Result<(), Error>;

    /// Write `body` to the file at `path`, replacing any existing content.
    async fn write_stream(&self, path: &str, body: InputStream) -> Result<(), Error>;
}

/// Storage backend for the directories (or directory-like containers) that
/// hold a [`FileProvider`]'s files.
///
/// The empty path (or a bare `/`) addresses the provider root itself; for
/// object storage the root is the bucket and nested paths are key prefixes.
#[async_trait]
pub trait DirectoryProvider: fmt::Debug + Send + Sync {
    /// Create the directory at `path`, including any missing parents.
    async fn create_directory(&self, path: &str) -> Result<DirectoryDetail, Error>;

    /// Whether a directory exists at `path`.
    async fn directory_exists(&self, path: &str) -> Result<bool, Error>;

    /// Delete the directory at `path`.
    ///
    /// With `recursive` set, contents are deleted first; otherwise deleting a
    /// non-empty directory is an error. Returns `false` when the backend can
    /// tell there was nothing to delete.
    async fn delete_directory(&self, path: &str, recursive: bool) -> Result<bool, Error>;

    /// Recursively enumerate the files under `path`.
    async fn list_files(&self, path: &str) -> Result<Vec<FileDetail>, Error>;
}
