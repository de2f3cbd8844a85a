//! Integration tests against a live S3-compatible server
//!
//! Run with: `cargo test -p s3glob-s3 --features integration`
//!
//! Required environment:
//! - `S3GLOB_TEST_ENDPOINT`: server URL, e.g. `http://localhost:9000`
//! - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`: credentials for it

#![cfg(feature = "integration")]

use anyhow::Context;
use futures::TryStreamExt;
use s3glob_core::{BackendError, Error, ObjectStore, glob_search, list_keys, parse_path};
use s3glob_s3::{ClientOptions, S3Client};

const TEST_KEYS: [&str; 3] = ["a.csv", "b/a.csv", "b/c.txt"];

async fn client() -> anyhow::Result<S3Client> {
    let endpoint =
        std::env::var("S3GLOB_TEST_ENDPOINT").context("S3GLOB_TEST_ENDPOINT must be set")?;
    let options = ClientOptions {
        endpoint_url: Some(endpoint),
        force_path_style: true,
        ..Default::default()
    };
    Ok(S3Client::new(&options).await)
}

/// Create a uniquely named bucket holding `TEST_KEYS`
async fn seeded_bucket(client: &S3Client) -> anyhow::Result<String> {
    let bucket = format!("s3glob-test-{}", jiff::Timestamp::now().as_nanosecond());
    client.inner().create_bucket().bucket(&bucket).send().await?;

    for key in TEST_KEYS {
        client
            .inner()
            .put_object()
            .bucket(&bucket)
            .key(key)
            .body(aws_sdk_s3::primitives::ByteStream::from_static(b"data"))
            .send()
            .await?;
    }

    Ok(bucket)
}

async fn matching_urls(client: &S3Client, input: &str) -> anyhow::Result<Vec<String>> {
    let path = parse_path(input)?;
    let urls = glob_search(client, &path)?
        .map_ok(|o| path.url_for(&o.key))
        .try_collect()
        .await?;
    Ok(urls)
}

#[tokio::test]
async fn test_glob_search_live() -> anyhow::Result<()> {
    let client = client().await?;
    let bucket = seeded_bucket(&client).await?;

    let urls = matching_urls(&client, &format!("s3://{bucket}/*.csv")).await?;
    assert_eq!(urls, vec![format!("s3://{bucket}/a.csv")]);

    let urls = matching_urls(&client, &format!("s3://{bucket}/**/*.csv")).await?;
    assert_eq!(
        urls,
        vec![format!("s3://{bucket}/a.csv"), format!("s3://{bucket}/b/a.csv")]
    );

    let urls = matching_urls(&client, &format!("s3://{bucket}/*.json")).await?;
    assert!(urls.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_metadata_is_populated() -> anyhow::Result<()> {
    let client = client().await?;
    let bucket = seeded_bucket(&client).await?;

    let objects: Vec<_> = list_keys(&client, &bucket, "b/").try_collect().await?;
    assert_eq!(objects.len(), 2);
    assert!(objects.iter().all(|o| o.size_bytes == Some(4)));
    assert!(objects.iter().all(|o| o.last_modified.is_some()));
    assert_eq!(client.backend_name(), "s3");

    Ok(())
}

#[tokio::test]
async fn test_missing_bucket_is_not_found() -> anyhow::Result<()> {
    let client = client().await?;
    let path = parse_path("s3://s3glob-bucket-that-does-not-exist/**")?;

    let result: Result<Vec<_>, Error> = glob_search(&client, &path)?.try_collect().await;
    assert!(matches!(
        result,
        Err(Error::Backend(BackendError::NotFound(_)))
    ));

    Ok(())
}
