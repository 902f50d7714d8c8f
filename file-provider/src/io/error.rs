/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// I/O related errors
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
}

#[derive(Debug)]
enum ErrorKind {
    OffsetGreaterThanFileSize,
    Io(std::io::Error),
}

impl Error {
    pub(crate) fn offset_greater_than_file_size() -> Self {
        Self {
            kind: ErrorKind::OffsetGreaterThanFileSize,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ErrorKind::OffsetGreaterThanFileSize => {
                write!(f, "offset must be less than or equal to file size")
            }
            ErrorKind::Io(_) => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::Io(err) => Some(err),
            ErrorKind::OffsetGreaterThanFileSize => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self {
            kind: ErrorKind::Io(value),
        }
    }
}
