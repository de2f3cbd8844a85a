//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3glob-core.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use jiff::Timestamp;
use s3glob_core::{BackendError, ListOptions, ListResult, ObjectInfo, ObjectStore, Result};

/// Region used when the provider chain does not resolve one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Error codes that mean the caller is not allowed to list
const AUTH_ERROR_CODES: [&str; 6] = [
    "AccessDenied",
    "AllAccessDisabled",
    "InvalidAccessKeyId",
    "SignatureDoesNotMatch",
    "ExpiredToken",
    "InvalidToken",
];

/// Overrides layered on top of the ambient AWS configuration
#[derive(Debug, Clone, Default)]
pub struct ClientOptions {
    /// Region, instead of the provider chain's
    pub region: Option<String>,
    /// Custom endpoint for S3-compatible servers
    pub endpoint_url: Option<String>,
    /// Named profile from the shared config files
    pub profile: Option<String>,
    /// Use path-style instead of virtual-hosted-style addressing
    pub force_path_style: bool,
}

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
}

impl S3Client {
    /// Create a client from the ambient AWS configuration
    ///
    /// Credentials are resolved lazily, so missing or invalid credentials
    /// surface as an error on the first request.
    pub async fn new(options: &ClientOptions) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(profile) = &options.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &options.region {
            loader = loader.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &options.endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let config = loader.load().await;

        let mut builder =
            aws_sdk_s3::config::Builder::from(&config).force_path_style(options.force_path_style);
        if config.region().is_none() {
            builder = builder.region(Region::new(DEFAULT_REGION));
        }
        let s3_config = builder.build();

        tracing::debug!(
            region = ?s3_config.region(),
            endpoint = options.endpoint_url.as_deref(),
            path_style = options.force_path_style,
            "Created S3 client"
        );

        Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        }
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<ListResult> {
        let response = self
            .inner
            .list_objects_v2()
            .bucket(bucket)
            .set_prefix(options.prefix)
            .set_max_keys(options.max_keys)
            .set_continuation_token(options.continuation_token)
            .send()
            .await
            .map_err(|e| classify_sdk_error(&e, bucket))?;

        let items = response.contents().iter().map(object_info).collect();

        Ok(ListResult {
            items,
            truncated: response.is_truncated().unwrap_or(false),
            continuation_token: response.next_continuation_token().map(str::to_string),
        })
    }

    fn backend_name(&self) -> &'static str {
        "s3"
    }
}

fn object_info(object: &aws_sdk_s3::types::Object) -> ObjectInfo {
    let mut info = ObjectInfo::new(object.key().unwrap_or_default());
    info.size_bytes = object.size();

    if let Some(modified) = object.last_modified() {
        info.last_modified = Timestamp::from_second(modified.secs()).ok();
    }

    info
}

/// Map an SDK failure onto the backend error kinds
fn classify_sdk_error<E>(error: &SdkError<E>, bucket: &str) -> BackendError
where
    E: ProvideErrorMetadata + std::error::Error + 'static,
{
    match error {
        SdkError::ServiceError(service_err) => {
            let err = service_err.err();
            let status = service_err.raw().status().as_u16();
            let mut msg = format!("Service error (HTTP {status})");
            if let Some(code) = err.code() {
                msg.push_str(&format!(": {code}"));
            }
            if let Some(message) = err.message() {
                msg.push_str(&format!(": {message}"));
            }
            classify(err.code(), Some(status), msg, bucket)
        }
        SdkError::ResponseError(response_err) => {
            let status = response_err.raw().status().as_u16();
            let msg = format!("Response error: {}", DisplayErrorContext(error));
            classify(None, Some(status), msg, bucket)
        }
        SdkError::TimeoutError(_) => BackendError::Network("Request timeout".to_string()),
        SdkError::DispatchFailure(_) => {
            let msg = format!("Network dispatch error: {}", DisplayErrorContext(error));
            classify(None, None, msg, bucket)
        }
        _ => classify(None, None, DisplayErrorContext(error).to_string(), bucket),
    }
}

fn classify(code: Option<&str>, status: Option<u16>, msg: String, bucket: &str) -> BackendError {
    if code == Some("NoSuchBucket") || (code.is_none() && status == Some(404)) {
        return BackendError::NotFound(format!("Bucket not found: {bucket}"));
    }

    let auth_code = code.is_some_and(|c| AUTH_ERROR_CODES.contains(&c));
    let auth_status = matches!(status, Some(401 | 403));
    // Credential chain failures happen before any response exists
    let no_credentials = status.is_none() && msg.to_lowercase().contains("credentials");

    if auth_code || auth_status || no_credentials {
        BackendError::Auth(msg)
    } else {
        BackendError::Network(msg)
    }
}
