/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_smithy_types::DateTime;

use crate::path;

/// Details about a single file resolved by a [`FileProvider`](crate::FileProvider).
///
/// This is a thin record populated from backend response fields. Metadata
/// (size, last-modified) is present only when the backend reported it, i.e.
/// when the file existed at the time the record was produced.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct FileDetail {
    pub(crate) name: String,
    pub(crate) directory_path: String,
    pub(crate) size: Option<u64>,
    pub(crate) last_modified: Option<DateTime>,
}

impl FileDetail {
    pub(crate) fn new(name: impl Into<String>, directory_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            directory_path: directory_path.into(),
            size: None,
            last_modified: None,
        }
    }

    /// The file name, without any directory component.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical path of the directory containing this file, relative to the
    /// provider root. Empty for files directly under the root.
    pub fn directory_path(&self) -> &str {
        &self.directory_path
    }

    /// Size of the file in bytes, if the backend reported one.
    pub fn size(&self) -> Option<u64> {
        self.size
    }

    /// Last modification time, if the backend reported one.
    pub fn last_modified(&self) -> Option<&DateTime> {
        self.last_modified.as_ref()
    }

    /// The full logical path of this file relative to the provider root.
    pub fn path(&self) -> String {
        if self.directory_path.is_empty() {
            self.name.clone()
        } else {
            format!("{}{}{}", self.directory_path, path::DELIMITER, self.name)
        }
    }
}

/// Details about a directory resolved by a
/// [`DirectoryProvider`](crate::DirectoryProvider).
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct DirectoryDetail {
    pub(crate) path: String,
}

impl DirectoryDetail {
    pub(crate) fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Logical path of the directory relative to the provider root. Empty for
    /// the root itself.
    pub fn path(&self) -> &str {
        &self.path
    }
}
