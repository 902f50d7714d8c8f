/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use bytes_utils::SegmentedBuf;
use futures_util::StreamExt;
use tokio_util::io::ReaderStream;

use crate::error::{Error, ErrorKind};
use crate::io::aggregated_bytes::AggregatedBytes;

/// Stream of binary data representing a file's contents.
///
/// Wraps the backend-specific read stream (an object-storage response body or
/// a chunked local-file reader) behind a single type.
#[derive(Debug)]
pub struct Body {
    inner: Inner,
}

#[derive(Debug)]
enum Inner {
    /// Contents of an object fetched from remote storage
    Object(ByteStream),
    /// Contents streamed from a local file
    File(ReaderStream<tokio::fs::File>),
    /// Empty body
    Empty,
}

impl Body {
    /// Create a new empty body
    pub fn empty() -> Self {
        Self { inner: Inner::Empty }
    }

    pub(crate) fn from_byte_stream(stream: ByteStream) -> Self {
        Self {
            inner: Inner::Object(stream),
        }
    }

    pub(crate) fn from_file(file: tokio::fs::File) -> Self {
        Self {
            inner: Inner::File(ReaderStream::new(file)),
        }
    }

    /// Pull the next chunk of data off the stream.
    ///
    /// Returns [None] when there is no more data.
    pub async fn next(&mut self) -> Option<Result<Bytes, Error>> {
        match &mut self.inner {
            Inner::Object(stream) => stream
                .next()
                .await
                .map(|chunk| chunk.map_err(|err| Error::new(ErrorKind::IOError, err))),
            Inner::File(stream) => stream
                .next()
                .await
                .map(|chunk| chunk.map_err(Error::from)),
            Inner::Empty => None,
        }
    }

    /// Consume the stream and aggregate all of its chunks.
    ///
    /// The chunks are kept as non-contiguous segments; use
    /// [`AggregatedBytes::into_bytes`] to copy them into contiguous memory.
    pub async fn collect(mut self) -> Result<AggregatedBytes, Error> {
        let mut output = SegmentedBuf::new();
        while let Some(chunk) = self.next().await {
            output.push(chunk?);
        }
        Ok(AggregatedBytes(output))
    }
}
