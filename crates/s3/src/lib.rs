//! s3glob-s3: S3 SDK adapter for s3glob
//!
//! Implements the `ObjectStore` trait from s3glob-core on top of aws-sdk-s3.
//! Credentials, region and endpoint come from the standard AWS provider
//! chain, optionally overridden through [`ClientOptions`].

mod client;

pub use client::{ClientOptions, DEFAULT_REGION, S3Client};
