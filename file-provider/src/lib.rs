/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Pluggable file storage providers.
//!
//! This crate defines a generic contract for file storage addressed by
//! logical, `/`-separated paths ([`FileProvider`] and [`DirectoryProvider`])
//! and ships one adapter per backend:
//!
//! - [`provider::disk`] stores files under a root directory on the local
//!   filesystem.
//! - [`provider::s3`] maps files onto objects in an Amazon S3 bucket, with
//!   every operation a direct call-through to the AWS SDK client.
//!
//! Durability, retries, and consistency remain the responsibility of the
//! underlying backend; adapters only marshal parameters into backend calls.

#![warn(
    missing_debug_implementations,
    missing_docs,
    rustdoc::missing_crate_level_docs,
    unreachable_pub,
    rust_2018_idioms
)]

/// Error types emitted by `file-provider`
pub mod error;

/// Common types used by `file-provider`
pub mod types;

/// Types and helpers for I/O
pub mod io;

/// Provider contracts and storage backends
pub mod provider;

pub(crate) mod path;

pub use provider::{DirectoryProvider, FileProvider};
