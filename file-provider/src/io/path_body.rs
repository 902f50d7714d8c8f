/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::io::error::Error;
use crate::io::stream::{InputStream, RawInputStream};

/// File-backed source of an [`InputStream`].
#[derive(Debug, Clone)]
pub(crate) struct PathBody {
    pub(crate) path: PathBuf,
    pub(crate) length: u64,
    pub(crate) offset: u64,
}

/// Builder for creating [`InputStream`] from a file/path.
///
/// ```no_run
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// use file_provider::io::InputStream;
///
/// // read the first 1024 bytes of the file
/// let stream = InputStream::read_from()
///     .path("docs/some-large-file.csv")
///     .length(1024)
///     .build()?;
/// # Ok(()) }
/// ```
#[derive(Debug, Default)]
pub struct PathBodyBuilder {
    path: Option<PathBuf>,
    length: Option<u64>,
    offset: Option<u64>,
}

impl PathBodyBuilder {
    /// Create a new [`PathBodyBuilder`].
    ///
    /// You must call [`path`](PathBodyBuilder::path) to set what to read from.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the path to read from.
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Specify the offset to start reading from (in bytes).
    ///
    /// When used in conjunction with [`length`](PathBodyBuilder::length), allows for reading a
    /// single "chunk" of a file. An offset greater than the file size is a build error.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Specify the length to read (in bytes).
    ///
    /// By default, the length of the file from the given offset is used.
    pub fn length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Returns a [`InputStream`] from this builder.
    pub fn build(self) -> Result<InputStream, Error> {
        let path = self.path.expect("path set");
        let file_size = fs::metadata(&path)?.len();
        let offset = self.offset.unwrap_or_default();

        if offset > file_size {
            return Err(Error::offset_greater_than_file_size());
        }

        let length = self.length.unwrap_or(file_size - offset);

        let body = PathBody {
            path,
            length,
            offset,
        };

        let stream = InputStream {
            inner: RawInputStream::Fs(body),
        };

        Ok(stream)
    }
}
