/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

mod aggregated_bytes;
mod body;

/// Error types related to I/O abstractions
pub mod error;
mod path_body;
mod size_hint;
mod stream;

// re-exports
pub use self::aggregated_bytes::AggregatedBytes;
pub(crate) use self::stream::RawInputStream;
pub use self::body::Body;
pub use self::path_body::PathBodyBuilder;
pub use self::size_hint::SizeHint;
pub use self::stream::InputStream;
