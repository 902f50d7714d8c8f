/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Local-filesystem backend.
//!
//! Logical paths are resolved under a configured root directory; every
//! operation is a direct call into async filesystem I/O.

use std::io::SeekFrom;
use std::path::{Path, PathBuf, MAIN_SEPARATOR};

use async_trait::async_trait;
use aws_smithy_types::DateTime;
use tokio::fs;
use tokio::io::{AsyncReadExt, AsyncSeekExt, AsyncWriteExt};
use walkdir::WalkDir;

use crate::error::{Error, ErrorKind};
use crate::io::{Body, InputStream, RawInputStream};
use crate::path;
use crate::provider::{DirectoryProvider, FileProvider};
use crate::types::{DirectoryDetail, FileDetail};

/// File provider rooted at a directory on the local filesystem.
///
/// All seven [`FileProvider`] operations are supported.
#[derive(Debug, Clone)]
pub struct DiskFileProvider {
    root: PathBuf,
}

impl DiskFileProvider {
    /// Create a provider that resolves logical paths under `root`.
    ///
    /// The root directory itself is not created until a file is.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this provider resolves logical paths against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a logical path into its normalized form and the concrete
    /// filesystem path under the root.
    fn resolve(&self, logical: &str) -> Result<(String, PathBuf), Error> {
        let normalized = path::normalize(logical)?;
        let full = self.root.join(&normalized);
        Ok((normalized, full))
    }
}

fn map_not_found(err: std::io::Error) -> Error {
    match err.kind() {
        std::io::ErrorKind::NotFound => Error::new(ErrorKind::NotFound, err),
        _ => err.into(),
    }
}

#[async_trait]
impl FileProvider for DiskFileProvider {
    async fn get_file(&self, path: &str) -> Result<FileDetail, Error> {
        let (normalized, full) = self.resolve(path)?;
        let (parent, name) = path::split(&normalized);
        let mut detail = FileDetail::new(name, parent);

        match fs::metadata(&full).await {
            Ok(meta) if meta.is_file() => {
                detail.size = Some(meta.len());
                detail.last_modified = meta.modified().ok().map(DateTime::from);
            }
            Ok(_) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => return Err(err.into()),
        }

        Ok(detail)
    }

    async fn create_file(&self, path: &str) -> Result<FileDetail, Error> {
        let (normalized, full) = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }
        fs::File::create(&full).await?;
        tracing::debug!("created file {normalized}");
        self.get_file(path).await
    }

    async fn delete_file(&self, path: &str) -> Result<bool, Error> {
        let (normalized, full) = self.resolve(path)?;
        match fs::remove_file(&full).await {
            Ok(()) => {
                tracing::debug!("deleted file {normalized}");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn file_exists(&self, path: &str) -> Result<bool, Error> {
        let (_, full) = self.resolve(path)?;
        match fs::metadata(&full).await {
            Ok(meta) => Ok(meta.is_file()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn open_file(&self, path: &str) -> Result<Body, Error> {
        let (_, full) = self.resolve(path)?;
        let file = fs::File::open(&full).await.map_err(map_not_found)?;
        Ok(Body::from_file(file))
    }

    async fn truncate_file(&self, path: &str) -> Result<(), Error> {
        let (normalized, full) = self.resolve(path)?;
        let file = fs::OpenOptions::new()
            .write(true)
            .open(&full)
            .await
            .map_err(map_not_found)?;
        file.set_len(0).await?;
        tracing::debug!("truncated file {normalized}");
        Ok(())
    }

    async fn write_stream(&self, path: &str, body: InputStream) -> Result<(), Error> {
        let (normalized, full) = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent).await?;
        }

        let mut dest = fs::File::create(&full).await?;
        match body.inner {
            RawInputStream::Buf(bytes) => {
                dest.write_all(&bytes).await?;
            }
            RawInputStream::Fs(src_body) => {
                let mut src = fs::File::open(&src_body.path).await?;
                if src_body.offset > 0 {
                    src.seek(SeekFrom::Start(src_body.offset)).await?;
                }
                let mut src = src.take(src_body.length);
                tokio::io::copy(&mut src, &mut dest).await?;
            }
        }
        dest.flush().await?;
        tracing::debug!("wrote stream to {normalized}");
        Ok(())
    }
}

/// Directory provider rooted at a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct DiskDirectoryProvider {
    root: PathBuf,
}

impl DiskDirectoryProvider {
    /// Create a provider that resolves logical directory paths under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this provider resolves logical paths against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, logical: &str) -> Result<(String, PathBuf), Error> {
        let normalized = path::normalize_dir(logical)?;
        let full = self.root.join(&normalized);
        Ok((normalized, full))
    }
}

/// Derive the logical key for a directory entry relative to the walked root.
fn entry_key(root: &Path, entry_path: &Path) -> String {
    let relative = entry_path
        .strip_prefix(root)
        .expect("entry under listed directory")
        .to_str()
        .expect("valid utf-8 path");

    if MAIN_SEPARATOR == path::DELIMITER {
        relative.to_owned()
    } else {
        relative.replace(MAIN_SEPARATOR, "/")
    }
}

#[async_trait]
impl DirectoryProvider for DiskDirectoryProvider {
    async fn create_directory(&self, path: &str) -> Result<DirectoryDetail, Error> {
        let (normalized, full) = self.resolve(path)?;
        fs::create_dir_all(&full).await?;
        Ok(DirectoryDetail::new(normalized))
    }

    async fn directory_exists(&self, path: &str) -> Result<bool, Error> {
        let (_, full) = self.resolve(path)?;
        match fs::metadata(&full).await {
            Ok(meta) => Ok(meta.is_dir()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn delete_directory(&self, path: &str, recursive: bool) -> Result<bool, Error> {
        let (normalized, full) = self.resolve(path)?;
        let result = if recursive {
            fs::remove_dir_all(&full).await
        } else {
            fs::remove_dir(&full).await
        };

        match result {
            Ok(()) => {
                tracing::debug!("deleted directory {normalized}");
                Ok(true)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err.into()),
        }
    }

    async fn list_files(&self, path: &str) -> Result<Vec<FileDetail>, Error> {
        let (normalized, full) = self.resolve(path)?;
        let mut files = Vec::new();

        for entry in WalkDir::new(&full) {
            let entry = entry.map_err(|err| {
                if err.io_error().map(|io| io.kind()) == Some(std::io::ErrorKind::NotFound) {
                    Error::new(ErrorKind::NotFound, err)
                } else {
                    Error::new(ErrorKind::IOError, err)
                }
            })?;
            if entry.depth() == 0 || !entry.file_type().is_file() {
                continue;
            }

            let meta = fs::metadata(entry.path()).await?;
            let key = entry_key(&full, entry.path());
            let (parent, name) = path::split(&key);

            let directory_path = if normalized.is_empty() {
                parent.to_owned()
            } else if parent.is_empty() {
                normalized.clone()
            } else {
                format!("{normalized}/{parent}")
            };

            let mut detail = FileDetail::new(name, directory_path);
            detail.size = Some(meta.len());
            detail.last_modified = meta.modified().ok().map(DateTime::from);
            files.push(detail);
        }

        Ok(files)
    }
}
