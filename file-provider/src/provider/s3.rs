/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Amazon S3 backend.
//!
//! Files map onto objects in a single bucket; each operation is a direct
//! call-through to the AWS SDK client. Durability, consistency, retries, and
//! request signing remain the SDK's responsibility.

use async_trait::async_trait;
use aws_sdk_s3::error::ProvideErrorMetadata;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Output;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{Delete, ObjectIdentifier};

use crate::error::{self, Error, ErrorKind};
use crate::io::{Body, InputStream};
use crate::path;
use crate::provider::{DirectoryProvider, FileProvider};
use crate::types::{DirectoryDetail, FileDetail};

/// File provider backed by an Amazon S3 bucket.
///
/// Logical paths are normalized into object keys. `truncate_file` and
/// `write_stream` are not supported by this backend and fail unconditionally
/// with [`ErrorKind::Unsupported`].
#[derive(Debug, Clone)]
pub struct S3FileProvider {
    client: aws_sdk_s3::Client,
    bucket: String,
    content_type: Option<String>,
}

impl S3FileProvider {
    /// Create a new `S3FileProvider` builder
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// Create a provider for `bucket` using AWS configuration loaded from the
    /// environment.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::builder()
            .client(aws_sdk_s3::Client::new(&shared_config))
            .bucket(bucket)
            .build()
    }

    /// Create a provider addressing the same bucket (and reusing the client)
    /// as an existing [`S3BucketProvider`].
    pub fn from_bucket_provider(provider: &S3BucketProvider) -> Self {
        Self::builder()
            .client(provider.client().clone())
            .bucket(provider.bucket())
            .build()
    }

    /// The bucket this provider resolves logical paths against.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The underlying S3 client instance used to send requests.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }
}

/// Fluent style builder for [`S3FileProvider`]
#[derive(Debug, Clone, Default)]
pub struct Builder {
    client: Option<aws_sdk_s3::Client>,
    bucket: Option<String>,
    content_type: Option<String>,
}

impl Builder {
    /// Set an explicit S3 client to use.
    pub fn client(mut self, client: aws_sdk_s3::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the bucket logical paths resolve against.
    pub fn bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = Some(bucket.into());
        self
    }

    /// Content type to set on objects created by
    /// [`create_file`](crate::FileProvider::create_file).
    ///
    /// Nothing is set by default.
    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Consumes the builder and constructs a [`S3FileProvider`]
    pub fn build(self) -> S3FileProvider {
        S3FileProvider {
            client: self.client.expect("client set"),
            bucket: self.bucket.expect("bucket set"),
            content_type: self.content_type,
        }
    }
}

#[async_trait]
impl FileProvider for S3FileProvider {
    async fn get_file(&self, path: &str) -> Result<FileDetail, Error> {
        let key = path::normalize(path)?;
        let (parent, name) = path::split(&key);
        let mut detail = FileDetail::new(name, parent);

        let resp = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await;

        match resp {
            Ok(head) => {
                detail.size = head.content_length().and_then(|len| u64::try_from(len).ok());
                detail.last_modified = head.last_modified().cloned();
            }
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false) => {}
            Err(err) => return Err(err.into()),
        }

        Ok(detail)
    }

    async fn create_file(&self, path: &str) -> Result<FileDetail, Error> {
        let key = path::normalize(path)?;
        tracing::debug!("creating object {key}");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .set_content_type(self.content_type.clone())
            .body(ByteStream::from_static(&[]))
            .send()
            .await?;

        let (parent, name) = path::split(&key);
        let mut detail = FileDetail::new(name, parent);
        detail.size = Some(0);
        Ok(detail)
    }

    async fn delete_file(&self, path: &str) -> Result<bool, Error> {
        let key = path::normalize(path)?;
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await?;

        // the service does not distinguish deleting an absent key
        tracing::debug!("deleted object {key}");
        Ok(true)
    }

    async fn file_exists(&self, path: &str) -> Result<bool, Error> {
        let key = path::normalize(path)?;
        let resp = self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await;

        match resp {
            Ok(_) => Ok(true),
            Err(err)
                if err
                    .as_service_error()
                    .map(|e| e.is_not_found())
                    .unwrap_or(false) =>
            {
                Ok(false)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn open_file(&self, path: &str) -> Result<Body, Error> {
        let key = path::normalize(path)?;
        let resp = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|err| {
                if err
                    .as_service_error()
                    .map(|e| e.is_no_such_key())
                    .unwrap_or(false)
                {
                    Error::new(ErrorKind::NotFound, err)
                } else {
                    err.into()
                }
            })?;

        Ok(Body::from_byte_stream(resp.body))
    }

    async fn truncate_file(&self, _path: &str) -> Result<(), Error> {
        Err(error::unsupported("truncate_file", "s3"))
    }

    async fn write_stream(&self, _path: &str, _body: InputStream) -> Result<(), Error> {
        Err(error::unsupported("write_stream", "s3"))
    }
}

/// Directory provider treating an Amazon S3 bucket as the root directory and
/// object key prefixes as nested directories.
#[derive(Debug, Clone)]
pub struct S3BucketProvider {
    client: aws_sdk_s3::Client,
    bucket: String,
}

impl S3BucketProvider {
    /// Create a provider over `bucket` with an explicit S3 client.
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    /// Create a provider for `bucket` using AWS configuration loaded from the
    /// environment.
    pub async fn from_env(bucket: impl Into<String>) -> Self {
        let shared_config = aws_config::from_env().load().await;
        Self::new(aws_sdk_s3::Client::new(&shared_config), bucket)
    }

    /// The bucket acting as this provider's root directory.
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The underlying S3 client instance used to send requests.
    pub fn client(&self) -> &aws_sdk_s3::Client {
        &self.client
    }

    /// Delete every object under `prefix`, in service-page batches.
    ///
    /// Returns the number of objects deleted.
    async fn delete_objects_under(&self, prefix: Option<String>) -> Result<usize, Error> {
        let mut deleted = 0;
        let mut paginator =
            ListObjectsPaginator::new(self.client.clone(), self.bucket.clone(), prefix);

        while let Some(page) = paginator.next_page().await {
            let page = page?;
            let objects = page
                .contents()
                .iter()
                .filter_map(|obj| obj.key())
                .map(|key| ObjectIdentifier::builder().key(key).build())
                .collect::<Result<Vec<_>, _>>()?;

            if objects.is_empty() {
                continue;
            }

            deleted += objects.len();
            let delete = Delete::builder().set_objects(Some(objects)).build()?;
            self.client
                .delete_objects()
                .bucket(&self.bucket)
                .delete(delete)
                .send()
                .await?;
        }

        tracing::debug!("deleted {deleted} objects from {}", self.bucket);
        Ok(deleted)
    }
}

/// Object key prefix addressing the contents of a normalized directory path.
fn key_prefix(normalized: &str) -> Option<String> {
    if normalized.is_empty() {
        None
    } else {
        Some(format!("{normalized}{}", path::DELIMITER))
    }
}

#[async_trait]
impl DirectoryProvider for S3BucketProvider {
    async fn create_directory(&self, path: &str) -> Result<DirectoryDetail, Error> {
        let normalized = path::normalize_dir(path)?;
        if normalized.is_empty() {
            self.client
                .create_bucket()
                .bucket(&self.bucket)
                .send()
                .await?;
            tracing::debug!("created bucket {}", self.bucket);
        }
        // key prefixes spring into existence with their first object
        Ok(DirectoryDetail::new(normalized))
    }

    async fn directory_exists(&self, path: &str) -> Result<bool, Error> {
        let normalized = path::normalize_dir(path)?;
        if normalized.is_empty() {
            let resp = self
                .client
                .head_bucket()
                .bucket(&self.bucket)
                .send()
                .await;
            return match resp {
                Ok(_) => Ok(true),
                Err(err)
                    if err
                        .as_service_error()
                        .map(|e| e.is_not_found())
                        .unwrap_or(false) =>
                {
                    Ok(false)
                }
                Err(err) => Err(err.into()),
            };
        }

        let resp = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(key_prefix(&normalized))
            .max_keys(1)
            .send()
            .await?;

        Ok(resp.key_count().unwrap_or(0) > 0)
    }

    async fn delete_directory(&self, path: &str, recursive: bool) -> Result<bool, Error> {
        let normalized = path::normalize_dir(path)?;

        let deleted = if recursive {
            self.delete_objects_under(key_prefix(&normalized)).await?
        } else {
            0
        };

        if normalized.is_empty() {
            return match self
                .client
                .delete_bucket()
                .bucket(&self.bucket)
                .send()
                .await
            {
                Ok(_) => {
                    tracing::debug!("deleted bucket {}", self.bucket);
                    Ok(true)
                }
                Err(err) if err.code() == Some("NoSuchBucket") => Ok(false),
                Err(err) => Err(err.into()),
            };
        }

        if recursive {
            return Ok(deleted > 0);
        }

        // a prefix only exists through the objects under it, so a
        // non-recursive delete can only ever apply to an absent directory
        if self.directory_exists(path).await? {
            return Err(error::invalid_input(format!(
                "directory {path:?} is not empty"
            )));
        }
        Ok(false)
    }

    async fn list_files(&self, path: &str) -> Result<Vec<FileDetail>, Error> {
        let normalized = path::normalize_dir(path)?;
        let mut paginator = ListObjectsPaginator::new(
            self.client.clone(),
            self.bucket.clone(),
            key_prefix(&normalized),
        );

        let mut files = Vec::new();
        while let Some(page) = paginator.next_page().await {
            let page = page?;
            for obj in page.contents() {
                let Some(key) = obj.key() else { continue };
                let (parent, name) = path::split(key);
                if name.is_empty() {
                    // zero-byte directory marker objects end in the delimiter
                    continue;
                }

                let mut detail = FileDetail::new(name, parent);
                detail.size = obj.size().and_then(|len| u64::try_from(len).ok());
                detail.last_modified = obj.last_modified().cloned();
                files.push(detail);
            }
        }

        Ok(files)
    }
}

/// Paginator for the `ListObjectsV2` operation over continuation tokens.
///
/// Pagination itself stays the service's concern; this only drives the token
/// loop.
#[derive(Debug)]
struct ListObjectsPaginator {
    client: aws_sdk_s3::Client,
    bucket: String,
    prefix: Option<String>,
    state: State,
}

#[derive(Debug, PartialEq)]
enum State {
    Start,
    Next(String),
    Done,
}

impl ListObjectsPaginator {
    fn new(client: aws_sdk_s3::Client, bucket: String, prefix: Option<String>) -> Self {
        Self {
            client,
            bucket,
            prefix,
            state: State::Start,
        }
    }

    async fn next_page(&mut self) -> Option<Result<ListObjectsV2Output, Error>> {
        let continuation_token = match &self.state {
            State::Start => None,
            State::Next(token) => Some(token.clone()),
            State::Done => return None,
        };

        let result = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .set_prefix(self.prefix.clone())
            .set_continuation_token(continuation_token)
            .send()
            .await;

        match result {
            Ok(output) => {
                let truncated = output.is_truncated().unwrap_or(false);
                self.state = match output.next_continuation_token() {
                    Some(token) if truncated => State::Next(token.to_owned()),
                    _ => State::Done,
                };
                Some(Ok(output))
            }
            Err(err) => {
                self.state = State::Done;
                Some(Err(err.into()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::operation::get_object::{GetObjectError, GetObjectOutput};
    use aws_sdk_s3::operation::head_object::{HeadObjectError, HeadObjectOutput};
    use aws_sdk_s3::operation::put_object::PutObjectOutput;
    use aws_sdk_s3::primitives::ByteStream;
    use aws_sdk_s3::types::error::{NoSuchKey, NotFound};
    use aws_smithy_mocks::{mock, mock_client, RuleMode};

    use crate::error::ErrorKind;
    use crate::io::InputStream;
    use crate::provider::FileProvider;

    use super::S3FileProvider;

    fn provider(client: aws_sdk_s3::Client) -> S3FileProvider {
        S3FileProvider::builder()
            .client(client)
            .bucket("test-bucket")
            .build()
    }

    #[tokio::test]
    async fn test_create_file_sends_put_object() {
        let put_object = mock!(aws_sdk_s3::Client::put_object)
            .match_requests(|r| {
                r.bucket() == Some("test-bucket")
                    && r.key() == Some("a/b.txt")
                    && r.content_type() == Some("text/plain")
            })
            .then_output(|| PutObjectOutput::builder().build());
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&put_object]);

        let provider = S3FileProvider::builder()
            .client(client)
            .bucket("test-bucket")
            .content_type("text/plain")
            .build();

        let detail = provider.create_file("a//b.txt").await.unwrap();
        assert_eq!("b.txt", detail.name());
        assert_eq!("a", detail.directory_path());
        assert_eq!(Some(0), detail.size());
    }

    #[tokio::test]
    async fn test_file_exists_maps_not_found() {
        let head_object = mock!(aws_sdk_s3::Client::head_object)
            .then_error(|| HeadObjectError::NotFound(NotFound::builder().build()));
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_object]);

        assert!(!provider(client).file_exists("missing.txt").await.unwrap());
    }

    #[tokio::test]
    async fn test_get_file_populates_metadata() {
        let head_object = mock!(aws_sdk_s3::Client::head_object)
            .match_requests(|r| r.key() == Some("reports/q1.csv"))
            .then_output(|| HeadObjectOutput::builder().content_length(42).build());
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_object]);

        let detail = provider(client).get_file("reports/q1.csv").await.unwrap();
        assert_eq!("q1.csv", detail.name());
        assert_eq!("reports", detail.directory_path());
        assert_eq!(Some(42), detail.size());
    }

    #[tokio::test]
    async fn test_open_file_not_found() {
        let get_object = mock!(aws_sdk_s3::Client::get_object)
            .then_error(|| GetObjectError::NoSuchKey(NoSuchKey::builder().build()));
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&get_object]);

        let err = provider(client).open_file("missing.txt").await.unwrap_err();
        assert_eq!(&ErrorKind::NotFound, err.kind());
    }

    #[tokio::test]
    async fn test_open_file_streams_object() {
        let get_object = mock!(aws_sdk_s3::Client::get_object)
            .match_requests(|r| r.bucket() == Some("test-bucket") && r.key() == Some("data.bin"))
            .then_output(|| {
                GetObjectOutput::builder()
                    .body(ByteStream::from_static(b"object contents"))
                    .build()
            });
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&get_object]);

        let body = provider(client).open_file("data.bin").await.unwrap();
        let data = body.collect().await.unwrap();
        assert_eq!(b"object contents".as_slice(), data.to_vec().as_slice());
    }

    #[tokio::test]
    async fn test_unsupported_operations_fail_without_requests() {
        // no request should ever be sent, the rule is never matched
        let head_object = mock!(aws_sdk_s3::Client::head_object)
            .then_output(|| HeadObjectOutput::builder().build());
        let client = mock_client!(aws_sdk_s3, RuleMode::Sequential, &[&head_object]);
        let provider = provider(client);

        let err = provider.truncate_file("a.txt").await.unwrap_err();
        assert_eq!(&ErrorKind::Unsupported, err.kind());

        let err = provider
            .write_stream("a.txt", InputStream::from_static(b"data"))
            .await
            .unwrap_err();
        assert_eq!(&ErrorKind::Unsupported, err.kind());
    }
}
