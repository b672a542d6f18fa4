// SPDX-FileCopyrightText: 2025 UnionTech Software Technology Co., Ltd.
//
// SPDX-License-Identifier: MIT

use std::path::Path;
use std::thread;
use std::time::Duration;
use regex::Regex;
use serde::Deserialize;
use thiserror::Error as TeError;
use tracing::{debug, info, warn};

use super::payload::BuildPayload;
use super::settings::BuildApiSettings;

/// Anything shorter cannot be a packaged bundle.
pub const MIN_BUNDLE_BYTES: usize = 100;
const MAX_BUNDLE_BYTES: u64 = 200 * 1024 * 1024;

#[derive(TeError, Debug)]
pub enum BuildApiError {
    #[error("Fail to serialize build payload: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Error making request: {0}")]
    Ureq(#[from] ureq::Error),
    #[error("Build API responded with HTTP {status}: {message}")]
    Status { status: u16, message: String },
    #[error("Build API returned {0} bytes, which is too small to be a bundle")]
    Undersized(usize),
    #[error("Build failed after {attempts} attempts (at {timestamp}), last error: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: Box<BuildApiError>, timestamp: String },
}

/// Raw answer of the build endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

/// One POST of a JSON body to the build endpoint.
pub trait BuildTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<TransportResponse, ureq::Error>;
}

pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        // Non-200 answers carry a JSON error body we want to read.
        let config = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build();
        UreqTransport { agent: ureq::Agent::new_with_config(config) }
    }
}

impl BuildTransport for UreqTransport {
    fn post_json(&self, url: &str, body: &[u8]) -> Result<TransportResponse, ureq::Error> {
        let mut response = self.agent.post(url)
            .header("Content-Type", "application/json")
            .send(body)?;
        let status = response.status().as_u16();
        let content_disposition = response.headers()
            .get("content-disposition")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.body_mut().with_config().limit(MAX_BUNDLE_BYTES).read_to_vec()?;
        Ok(TransportResponse { status, content_disposition, body })
    }
}

#[derive(Deserialize, Debug, Default)]
struct ApiErrorDetails {
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct ApiErrorBody {
    #[serde(default)]
    error: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    details: Option<ApiErrorDetails>,
}

fn describe_error_body(body: &[u8]) -> String {
    let Ok(parsed) = serde_json::from_slice::<ApiErrorBody>(body) else {
        return String::from_utf8_lossy(body).chars().take(200).collect();
    };
    let mut description = match (parsed.error.is_empty(), parsed.message.is_empty()) {
        (false, false) => format!("{}: {}", parsed.error, parsed.message),
        (true, false) => parsed.message,
        _ => parsed.error,
    };
    if let Some(details) = parsed.details.filter(|d| !d.errors.is_empty()) {
        description.push_str(&format!(" ({})", details.errors.join("; ")));
    }
    description
}

/// File name hint of a `Content-Disposition` header, stripped of any path.
pub fn filename_from_content_disposition(header: &str) -> Option<String> {
    let pattern = Regex::new(r#"(?i)filename\*?\s*=\s*(?:UTF-8'')?"?([^";]+)"?"#).ok()?;
    let raw = pattern.captures(header)?.get(1)?.as_str().trim();
    let name = Path::new(raw).file_name()?.to_str()?;
    let sanitized: String = name.chars()
        .map(|c| if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    (!sanitized.trim_matches('.').is_empty()).then_some(sanitized)
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltBundle {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

pub struct BuildApiClient<T: BuildTransport> {
    transport: T,
    url: String,
    max_retries: u32,
    initial_backoff: Duration,
}

impl BuildApiClient<UreqTransport> {
    pub fn from_settings(settings: &BuildApiSettings) -> Self {
        BuildApiClient::new(UreqTransport::new(settings.timeout), &settings.url)
            .with_retries(settings.max_retries, settings.initial_backoff)
    }
}

impl<T: BuildTransport> BuildApiClient<T> {
    pub fn new(transport: T, url: &str) -> Self {
        BuildApiClient {
            transport,
            url: url.to_string(),
            max_retries: 3,
            initial_backoff: Duration::from_secs(1),
        }
    }

    pub fn with_retries(mut self, max_retries: u32, initial_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.initial_backoff = initial_backoff;
        self
    }

    fn attempt(&self, body: &[u8], fallback_file_name: &str) -> Result<BuiltBundle, BuildApiError> {
        let response = self.transport.post_json(&self.url, body)?;
        if response.status != 200 {
            return Err(BuildApiError::Status { status: response.status, message: describe_error_body(&response.body) });
        }
        if response.body.len() < MIN_BUNDLE_BYTES {
            return Err(BuildApiError::Undersized(response.body.len()));
        }
        let file_name = response.content_disposition.as_deref()
            .and_then(filename_from_content_disposition)
            .unwrap_or_else(|| fallback_file_name.to_string());
        Ok(BuiltBundle { file_name, bytes: response.body })
    }

    /// Posts `payload`, retrying with exponential backoff.
    ///
    /// Makes at most `1 + max_retries` attempts. Every failure is retried,
    /// including HTTP errors and undersized bodies.
    pub fn build(&self, payload: &BuildPayload, fallback_file_name: &str) -> Result<BuiltBundle, BuildApiError> {
        let body = payload.to_json()?;
        let attempts = self.max_retries.saturating_add(1);
        let mut last_error = None;
        for attempt in 0..attempts {
            debug!("Posting {} bytes to {} (attempt {}/{attempts})", body.len(), self.url, attempt + 1);
            match self.attempt(&body, fallback_file_name) {
                Ok(bundle) => {
                    info!("Received bundle {:?} ({} bytes)", bundle.file_name, bundle.bytes.len());
                    return Ok(bundle);
                },
                Err(err) => {
                    warn!("Build attempt {}/{attempts} failed: {err}", attempt + 1);
                    last_error = Some(err);
                },
            }
            if attempt + 1 < attempts {
                let backoff = self.initial_backoff.saturating_mul(2u32.saturating_pow(attempt));
                thread::sleep(backoff);
            }
        }
        Err(BuildApiError::RetriesExhausted {
            attempts,
            last_error: Box::new(last_error.unwrap_or(BuildApiError::Undersized(0))),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::BTreeMap;
    use crate::build_api::payload::PayloadMetadata;

    struct ScriptedTransport {
        responses: RefCell<Vec<Result<TransportResponse, ureq::Error>>>,
        calls: RefCell<usize>,
    }

    impl ScriptedTransport {
        fn new(mut responses: Vec<Result<TransportResponse, ureq::Error>>) -> Self {
            responses.reverse();
            ScriptedTransport { responses: RefCell::new(responses), calls: RefCell::new(0) }
        }
    }

    impl BuildTransport for ScriptedTransport {
        fn post_json(&self, _url: &str, _body: &[u8]) -> Result<TransportResponse, ureq::Error> {
            *self.calls.borrow_mut() += 1;
            self.responses.borrow_mut().pop().unwrap()
        }
    }

    fn ok(body_len: usize, content_disposition: Option<&str>) -> Result<TransportResponse, ureq::Error> {
        Ok(TransportResponse { status: 200, content_disposition: content_disposition.map(str::to_string), body: vec![7; body_len] })
    }

    fn payload() -> BuildPayload {
        BuildPayload {
            metadata: PayloadMetadata { name: "Forest".to_string(), version: "1.0.0".to_string(), primary_language: "en".to_string(), description: None },
            categories: vec![],
            fields: vec![],
            icons: vec![],
            translations: BTreeMap::new(),
        }
    }

    fn client(responses: Vec<Result<TransportResponse, ureq::Error>>, max_retries: u32) -> BuildApiClient<ScriptedTransport> {
        BuildApiClient::new(ScriptedTransport::new(responses), "http://localhost/build").with_retries(max_retries, Duration::ZERO)
    }

    #[test]
    fn tst_retries_until_success() {
        let client = client(vec![
            Err(ureq::Error::Io(std::io::Error::new(std::io::ErrorKind::TimedOut, "timed out"))),
            Ok(TransportResponse { status: 502, content_disposition: None, body: b"bad gateway".to_vec() }),
            ok(10, None),
            ok(4096, Some("attachment; filename=\"forest-1.0.0.comapeocat\"")),
        ], 3);
        let bundle = client.build(&payload(), "fallback.comapeocat").unwrap();
        assert_eq!(bundle.file_name, "forest-1.0.0.comapeocat");
        assert_eq!(bundle.bytes.len(), 4096);
        assert_eq!(*client.transport.calls.borrow(), 4);
    }

    #[test]
    fn tst_exhausted_retries_report_last_error() {
        let error_body = br#"{"error":"ValidationError","message":"Invalid config","details":{"errors":["fields[0]: missing type"]}}"#;
        let client = client(vec![
            ok(10, None),
            Ok(TransportResponse { status: 400, content_disposition: None, body: error_body.to_vec() }),
        ], 1);
        match client.build(&payload(), "fallback.comapeocat") {
            Err(BuildApiError::RetriesExhausted { attempts, last_error, timestamp }) => {
                assert_eq!(attempts, 2);
                assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
                match *last_error {
                    BuildApiError::Status { status, message } => {
                        assert_eq!(status, 400);
                        assert_eq!(message, "ValidationError: Invalid config (fields[0]: missing type)");
                    },
                    other => panic!("unexpected last error: {other}"),
                }
            },
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn tst_fallback_file_name() {
        let client = client(vec![ok(512, Some("attachment"))], 0);
        let bundle = client.build(&payload(), "forest-1.0.0.comapeocat").unwrap();
        assert_eq!(bundle.file_name, "forest-1.0.0.comapeocat");
    }

    #[test]
    fn tst_content_disposition_file_names() {
        assert_eq!(filename_from_content_disposition("attachment; filename=config.comapeocat").as_deref(), Some("config.comapeocat"));
        assert_eq!(filename_from_content_disposition("attachment; filename*=UTF-8''bosque%20v2.comapeocat").as_deref(), Some("bosque_20v2.comapeocat"));
        assert_eq!(filename_from_content_disposition("attachment; filename=\"../../etc/passwd\"").as_deref(), Some("passwd"));
        assert_eq!(filename_from_content_disposition("inline"), None);
    }
}
