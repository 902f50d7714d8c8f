/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Logical path handling shared by all providers.
//!
//! Callers address files with `/`-separated paths relative to a provider
//! root. Paths are normalized once here before any adapter marshals them
//! into backend parameters.

use std::borrow::Cow;
use std::path::{Path, MAIN_SEPARATOR};

use path_clean::PathClean;

use crate::error::{self, Error};

/// Delimiter used by logical paths regardless of platform.
pub(crate) const DELIMITER: char = '/';

/// Normalize a caller-supplied logical path.
///
/// Cleans `.`/`..`/repeated-separator segments, strips any leading delimiter,
/// and converts the platform separator to [`DELIMITER`]. Returns an
/// `InputInvalid` error if the path is empty, names the root itself, or
/// escapes the root via `..`.
pub(crate) fn normalize(path: &str) -> Result<String, Error> {
    let relative = path.trim_start_matches(DELIMITER);
    let cleaned = Path::new(relative).clean();
    let cleaned = cleaned.to_str().expect("valid utf-8 path");

    let cleaned = if MAIN_SEPARATOR == DELIMITER {
        Cow::Borrowed(cleaned)
    } else {
        Cow::Owned(cleaned.replace(MAIN_SEPARATOR, "/"))
    };

    if cleaned.is_empty() || cleaned == "." {
        return Err(error::invalid_input(format!(
            "path {path:?} does not name a file or directory"
        )));
    }

    if cleaned == ".." || cleaned.starts_with("../") {
        return Err(error::invalid_input(format!(
            "path {path:?} resolves outside of the provider root"
        )));
    }

    Ok(cleaned.into_owned())
}

/// Normalize a logical directory path, where the empty string (or a bare
/// delimiter) addresses the provider root.
pub(crate) fn normalize_dir(path: &str) -> Result<String, Error> {
    if path.is_empty() || path.chars().all(|c| c == DELIMITER) {
        return Ok(String::new());
    }
    normalize(path)
}

/// Split a normalized path into its parent directory and file name.
pub(crate) fn split(path: &str) -> (&str, &str) {
    match path.rsplit_once(DELIMITER) {
        Some((parent, name)) => (parent, name),
        None => ("", path),
    }
}
